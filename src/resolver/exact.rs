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

//! Resolution steps for names that own records.
//!
//! When the effective query name itself owns records, the answer is
//! decided here: CNAME records are chased (with loop detection and a
//! bounded chain), records matching the QTYPE are answered
//! authoritatively, NS records below the apex turn the response into a
//! referral, and a name with records but none of the requested type
//! yields a no-data response carrying the zone SOA.

use std::sync::Arc;

use crate::message::{Message, Rcode};
use crate::name::Name;
use crate::rr::{predicate, Record, Type};
use crate::zone::{Zone, ZoneCache};

use super::{zone_cut, CnameChain, Resolver, Step};

impl<C> Resolver<C>
where
    C: ZoneCache,
{
    /// Resolves a name that owns records (`matched` is non-empty).
    pub(super) fn resolve_exact_match(
        &self,
        response: &mut Message,
        qname: &Name,
        qtype: Type,
        matched: Vec<Record>,
        zone: &Arc<Zone>,
        chain: &mut CnameChain,
    ) -> Step {
        let cnames: Vec<Record> = matched
            .iter()
            .filter(|r| predicate::match_type(Type::CNAME)(r))
            .cloned()
            .collect();
        if !cnames.is_empty() {
            if qtype == Type::CNAME {
                // The CNAME itself was asked for; no chasing.
                response.flags.aa = true;
                response.answers.extend(cnames);
                Step::Done
            } else {
                self.resolve_cname_chase(response, qtype, cnames, zone, chain)
            }
        } else {
            let type_matches: Vec<Record> = if qtype == Type::ANY {
                self.handlers.filter_any(matched.clone())
            } else {
                matched
                    .iter()
                    .filter(|r| predicate::match_type(qtype)(r))
                    .cloned()
                    .collect()
            };
            if type_matches.is_empty() {
                self.resolve_no_exact_type_match(response, qname, qtype, &matched, zone)
            } else {
                let soa_present = matched.iter().any(|r| predicate::match_type(Type::SOA)(r));
                self.resolve_exact_type_match(response, qname, qtype, type_matches, soa_present, zone)
            }
        }
    }

    /// Answers a name whose records include matches for the QTYPE.
    fn resolve_exact_type_match(
        &self,
        response: &mut Message,
        qname: &Name,
        qtype: Type,
        type_matches: Vec<Record>,
        soa_present: bool,
        zone: &Arc<Zone>,
    ) -> Step {
        if qtype == Type::NS && !soa_present {
            // An NS match without an SOA at the same name is not the
            // apex speaking for itself: restart below the delegation
            // for the name server addresses.
            let target = type_matches
                .last()
                .expect("type_matches is non-empty")
                .name
                .clone();
            self.restart_delegated_query(target, Type::A, zone)
        } else if qtype == Type::NS {
            // NS with SOA alongside: the zone apex.
            response.flags.aa = true;
            response.rcode = Rcode::NoError;
            response.answers.extend(type_matches);
            Step::Done
        } else {
            // A match at or below a zone cut is non-authoritative
            // data; the child zone speaks for it, even when the
            // matched name is the delegation point itself.
            if let Some(cut_ns) = zone_cut::find(&self.cache, zone, qname) {
                response.flags.aa = false;
                response.authority.extend(cut_ns);
                return Step::Done;
            }

            let answers = if qtype == Type::DNSKEY && qname == zone.name() {
                let keys = self.dnssec.dnskey_rrset(response, zone);
                if keys.is_empty() {
                    type_matches
                } else {
                    keys
                }
            } else {
                type_matches
            };
            response.flags.aa = true;
            response.answers.extend(answers);
            Step::Done
        }
    }

    /// Handles a name that owns records, none of which match the QTYPE:
    /// a referral if NS records delegate the name away, records from a
    /// custom handler if one claims the QTYPE, and otherwise a no-data
    /// response.
    fn resolve_no_exact_type_match(
        &self,
        response: &mut Message,
        qname: &Name,
        qtype: Type,
        matched: &[Record],
        zone: &Arc<Zone>,
    ) -> Step {
        let ns_records: Vec<Record> = matched
            .iter()
            .filter(|r| predicate::match_type(Type::NS)(r))
            .cloned()
            .collect();
        if !ns_records.is_empty() && qname != zone.name() {
            response.flags.aa = false;
            response.authority.extend(ns_records);
            return Step::Done;
        }

        let produced = self.handlers.dispatch(qname, qtype, matched, response);
        if !produced.is_empty() {
            let signed = self.dnssec.maybe_sign_rrset(response, produced, zone);
            response.flags.aa = true;
            response.answers.extend(signed);
        } else {
            response.flags.aa = true;
            response.rcode = Rcode::NoError;
            response.authority.extend(zone.authority().iter().cloned());
        }
        Step::Done
    }

    /// Chases a CNAME: detects loops, appends the records to the
    /// answers and the chain, and restarts resolution at the target.
    /// Also used for wildcard-synthesized CNAMEs by the closest-match
    /// step.
    pub(super) fn resolve_cname_chase(
        &self,
        response: &mut Message,
        qtype: Type,
        cnames: Vec<Record>,
        zone: &Arc<Zone>,
        chain: &mut CnameChain,
    ) -> Step {
        let last = cnames.last().expect("cnames is non-empty").clone();
        if chain.contains(&last) {
            log::debug!("cname loop detected at {}", last.name);
            response.flags.aa = true;
            response.rcode = Rcode::ServFail;
            return Step::Done;
        }

        for record in cnames {
            if chain.try_push(record.clone()).is_err() {
                // An over-long chain fails the same way a loop does.
                log::debug!("cname chain limit reached at {}", record.name);
                response.flags.aa = true;
                response.rcode = Rcode::ServFail;
                return Step::Done;
            }
            response.answers.push(record);
        }
        response.flags.aa = true;

        let target = match last.data.cname() {
            Some(target) => target.clone(),
            None => {
                response.rcode = Rcode::ServFail;
                return Step::Done;
            }
        };

        if self.cache.record_name_in_zone(zone.name(), &target) {
            if let Some(cut_ns) = zone_cut::find(&self.cache, zone, &target) {
                // The target lies below a zone cut: refer, keeping
                // only the CNAMEs that point under the delegation.
                let cut_name = cut_ns.last().expect("cut is non-empty").name.clone();
                response.answers.retain(|record| {
                    matches!(record.data.cname(), Some(t) if t.eq_or_subdomain_of(&cut_name))
                });
                response.flags.aa = false;
                response.authority.extend(cut_ns);
                Step::Done
            } else {
                Step::Restart {
                    qname: target,
                    qtype,
                    zone: Arc::clone(zone),
                }
            }
        } else if self.cache.in_zone(&target) {
            match self.cache.find_zone(&target, None) {
                Ok(other_zone) => Step::Restart {
                    qname: target,
                    qtype,
                    zone: other_zone,
                },
                Err(_) => Step::Done,
            }
        } else {
            // The chain leaves our authority; the CNAME records
            // already in the answers are all we can say.
            Step::Done
        }
    }

    /// Restarts resolution at a delegated name, switching zones when
    /// the name lies in a different locally hosted zone. When the name
    /// is outside our authority altogether, the response is complete
    /// as it stands.
    fn restart_delegated_query(&self, qname: Name, qtype: Type, zone: &Arc<Zone>) -> Step {
        if self.cache.record_name_in_zone(zone.name(), &qname) {
            Step::Restart {
                qname,
                qtype,
                zone: Arc::clone(zone),
            }
        } else {
            match self.cache.find_zone(&qname, zone.authority().last()) {
                Ok(other_zone) => Step::Restart {
                    qname,
                    qtype,
                    zone: other_zone,
                },
                Err(_) => Step::Done,
            }
        }
    }
}
