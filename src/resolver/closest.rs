// Copyright 2023 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Resolution steps for names that own no records.
//!
//! The best-match search walks toward the apex for the closest
//! enclosing records. Depending on what it finds, the response is a
//! referral (NS records at an ancestor), a wildcard-synthesized answer
//! per [RFC 4592] (owner names rewritten to the query name), or a
//! negative answer: NXDOMAIN with the zone SOA when the original
//! question name does not exist, per [RFC 2308].
//!
//! [RFC 2308]: https://datatracker.ietf.org/doc/html/rfc2308
//! [RFC 4592]: https://datatracker.ietf.org/doc/html/rfc4592

use std::sync::Arc;

use crate::hints;
use crate::message::{Message, Question, Rcode};
use crate::name::Name;
use crate::rr::{predicate, Record, Type};
use crate::zone::{Zone, ZoneCache};

use super::{best_match, CnameChain, Resolver, Step};

impl<C> Resolver<C>
where
    C: ZoneCache,
{
    /// Resolves a name that owns no records of its own, from the
    /// closest enclosing match.
    pub(super) fn resolve_closest_match(
        &self,
        response: &mut Message,
        qname: &Name,
        qtype: Type,
        question: &Question,
        zone: &Arc<Zone>,
        chain: &mut CnameChain,
    ) -> Step {
        let best = best_match::search(&self.cache, qname);

        let ns_records: Vec<Record> = best
            .iter()
            .filter(|r| predicate::match_type(Type::NS)(r))
            .cloned()
            .collect();
        let soa_present = best.iter().any(|r| predicate::match_type(Type::SOA)(r));

        if !ns_records.is_empty() && !soa_present {
            // Delegation at an ancestor: refer to the child zone. No
            // wildcard synthesis happens under a zone cut.
            response.flags.aa = false;
            response.authority.extend(ns_records);
            Step::Done
        } else if best.iter().any(|r| predicate::match_wildcard()(r)) {
            self.resolve_wildcard_match(response, qname, qtype, best, zone, chain)
        } else if qname == &question.qname {
            // The question name does not exist in the zone.
            response.flags.aa = true;
            response.rcode = Rcode::NxDomain;
            response.authority.extend(zone.authority().iter().cloned());
            Step::Done
        } else {
            // A CNAME chain led to a name with no data to offer. The
            // chain in the answers stands; the best we can add is a
            // pointer at the root.
            if self.root_hints_enabled {
                let (ns_hints, a_hints) = hints::root_hints();
                response.authority.extend(ns_hints);
                response.additional.extend(a_hints);
            }
            Step::Done
        }
    }

    /// Answers from a wildcard match: every record's owner name is
    /// rewritten to the query name, and the result is then resolved
    /// like an exact match.
    fn resolve_wildcard_match(
        &self,
        response: &mut Message,
        qname: &Name,
        qtype: Type,
        best: Vec<Record>,
        zone: &Arc<Zone>,
        chain: &mut CnameChain,
    ) -> Step {
        let substituted: Vec<Record> = best
            .into_iter()
            .map(|mut record| {
                record.name = record.name.wildcard_substitution(qname);
                record
            })
            .collect();

        let cnames: Vec<Record> = substituted
            .iter()
            .filter(|r| predicate::match_type(Type::CNAME)(r))
            .cloned()
            .collect();
        if !cnames.is_empty() {
            if qtype == Type::CNAME {
                response.flags.aa = true;
                response.answers.extend(cnames);
                return Step::Done;
            }
            return self.resolve_cname_chase(response, qtype, cnames, zone, chain);
        }

        let filtered: Vec<Record> = if qtype == Type::ANY {
            self.handlers.filter_any(substituted.clone())
        } else {
            substituted
                .iter()
                .filter(|r| predicate::match_type(qtype)(r))
                .cloned()
                .collect()
        };
        if !filtered.is_empty() {
            response.flags.aa = true;
            response.answers.extend(filtered);
            return Step::Done;
        }

        let produced = self.handlers.dispatch(qname, qtype, &substituted, response);
        if !produced.is_empty() {
            let signed = self.dnssec.maybe_sign_rrset(response, produced, zone);
            response.flags.aa = true;
            response.answers.extend(signed);
        } else {
            // The wildcard exists but offers nothing of the requested
            // type: a no-data response.
            response.flags.aa = true;
            response.rcode = Rcode::NoError;
            response.authority.extend(zone.authority().iter().cloned());
        }
        Step::Done
    }
}
