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

//! The query resolution pipeline of an authoritative DNS server.
//!
//! The [`Resolver`] structure is the heart of this module. Given a
//! decoded query message, it selects the nearest authoritative zone
//! from its [`ZoneCache`], resolves the first question against that
//! zone per [RFC 1034 § 4.3.2] (wildcards per [RFC 4592], CNAME chains
//! per [RFC 6604], negative answers per [RFC 2308]), and returns the
//! decoded response message. It is a pure function of its inputs: all
//! failures surface as response RCODEs, never as errors, and no input
//! is ever mutated.
//!
//! Resolution advances as a small state machine. Each step inspects
//! the records at the current effective name and either finishes the
//! response or restarts at a new name (a CNAME target or a delegated
//! name server name); a driver loop runs steps until one finishes.
//! The CNAME chain that carries restart history is bounded, so
//! resolution always terminates.
//!
//! [RFC 1034 § 4.3.2]: https://datatracker.ietf.org/doc/html/rfc1034#section-4.3.2
//! [RFC 2308]: https://datatracker.ietf.org/doc/html/rfc2308
//! [RFC 4592]: https://datatracker.ietf.org/doc/html/rfc4592
//! [RFC 6604]: https://datatracker.ietf.org/doc/html/rfc6604

use std::net::IpAddr;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::dnssec::{NoSigning, SigningHook};
use crate::events::{EventSink, NullSink, ResolutionEvent};
use crate::handler::HandlerRegistry;
use crate::hints;
use crate::message::{Message, Question, Rcode};
use crate::name::Name;
use crate::rr::{clamp_to_soa_minimum, Record, Type};
use crate::zone::{CacheError, Zone, ZoneCache};

mod additional;
mod best_match;
mod closest;
mod exact;
mod sort;
mod zone_cut;

/// The maximum number of links in a CNAME chain that we will follow
/// before giving up and returning SERVFAIL.
///
/// By "links" we mean the number of CNAME records seen before reaching
/// the actual canonical name. For instance, the following answer shows
/// three links by our reckoning:
///
/// ```text
/// a.bailiwick.test.       3600    IN      CNAME   b.bailiwick.test.
/// b.bailiwick.test.       3600    IN      CNAME   c.bailiwick.test.
/// c.bailiwick.test.       3600    IN      CNAME   d.bailiwick.test.
/// d.bailiwick.test.       3600    IN      A       127.0.0.1
/// ```
pub const MAX_CNAME_CHAIN_LEN: usize = 8;

/// The CNAME records already followed in the current resolution.
///
/// The chain is append-only: each CNAME is pushed before resolution
/// restarts at its target, and a record that is already present
/// indicates a loop. The fixed capacity bounds chain length, so an
/// over-long chain fails the same way a loop does.
pub(crate) type CnameChain = ArrayVec<Record, MAX_CNAME_CHAIN_LEN>;

/// The outcome of one resolution step.
pub(crate) enum Step {
    /// Resolution restarts with a new effective name and type.
    Restart {
        qname: Name,
        qtype: Type,
        zone: Arc<Zone>,
    },

    /// The response is complete.
    Done,
}

////////////////////////////////////////////////////////////////////////
// RESOLVER PUBLIC API                                                //
////////////////////////////////////////////////////////////////////////

/// The query resolution core, abstracted from any network I/O and any
/// zone storage backend.
///
/// A `Resolver` is created over a [`ZoneCache`] with [`Resolver::new`].
/// Optional collaborators — custom record handlers, a DNSSEC signing
/// engine, a telemetry sink, and the root-hints toggle — are attached
/// through the setter methods. [`Resolver::resolve`] then produces a
/// response message for each query message.
pub struct Resolver<C> {
    cache: C,
    handlers: HandlerRegistry,
    dnssec: Box<dyn SigningHook>,
    events: Box<dyn EventSink>,
    root_hints_enabled: bool,
}

impl<C> Resolver<C>
where
    C: ZoneCache,
{
    /// Creates a new `Resolver` over the provided zone cache, with no
    /// custom handlers, no signing engine, no telemetry, and root
    /// hints enabled.
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            handlers: HandlerRegistry::new(),
            dnssec: Box::new(NoSigning),
            events: Box::new(NullSink),
            root_hints_enabled: true,
        }
    }

    /// Replaces the record-handler registry.
    pub fn set_handlers(&mut self, handlers: HandlerRegistry) {
        self.handlers = handlers;
    }

    /// Attaches a DNSSEC signing engine.
    pub fn set_signing_hook(&mut self, hook: Box<dyn SigningHook>) {
        self.dnssec = hook;
    }

    /// Attaches a telemetry sink.
    pub fn set_event_sink(&mut self, sink: Box<dyn EventSink>) {
        self.events = sink;
    }

    /// Enables or disables the root hints attached to responses for
    /// names outside our authority.
    pub fn set_root_hints(&mut self, enabled: bool) {
        self.root_hints_enabled = enabled;
    }

    /// Returns the zone cache this resolver reads from.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Resolves a query message into a response message.
    ///
    /// `authority_hints` are SOA records the caller already associates
    /// with the query (the last one anchors zone lookup when the QNAME
    /// alone matches no zone), and `client` is the querying address,
    /// which is reported to the telemetry sink.
    ///
    /// At most the first question is resolved. A message with no
    /// question is returned unchanged.
    pub fn resolve(&self, message: &Message, authority_hints: &[Record], client: IpAddr) -> Message {
        let question = match message.first_question() {
            Some(q) => q.clone(),
            None => return message.clone(),
        };

        let mut response = message.clone();
        response.questions.truncate(1);
        response.flags.ra = false;
        response.flags.ad = false;
        response.flags.cd = false;

        self.events.notify(ResolutionEvent::HandlingStarted {
            qname: question.qname.clone(),
            qtype: question.qtype,
            client,
        });
        if response.edns.as_ref().map_or(false, |opt| opt.dnssec_ok) {
            self.events.notify(ResolutionEvent::DnssecRequested {
                qname: question.qname.clone(),
                qtype: question.qtype,
            });
        }

        // RRSIG records are only served alongside the RRsets they
        // cover; direct queries for them are refused.
        if question.qtype == Type::RRSIG {
            response.flags.aa = false;
            response.rcode = Rcode::Refused;
        } else {
            self.resolve_question(&mut response, &question, authority_hints);
        }

        self.events.notify(ResolutionEvent::HandlingFinished {
            qname: question.qname.clone(),
            qtype: question.qtype,
            rcode: response.rcode,
            client,
        });
        response
    }

    /// Resolves the selected question into `response`.
    fn resolve_question(
        &self,
        response: &mut Message,
        question: &Question,
        authority_hints: &[Record],
    ) {
        match self.cache.find_zone(&question.qname, authority_hints.last()) {
            Ok(zone) => {
                log::debug!(
                    "resolving {} {} in zone {}",
                    question.qname,
                    question.qtype,
                    zone.name()
                );
                self.resolve_in_zone(response, question, &zone);
                self.finish(response, Some(&zone), question);
            }
            Err(CacheError::NotAuthoritative) => {
                // Not our bailiwick. Point the client at the root,
                // if configured to.
                response.flags.aa = true;
                response.rcode = Rcode::NoError;
                if self.root_hints_enabled {
                    let (ns_records, a_records) = hints::root_hints();
                    response.authority.extend(ns_records);
                    response.additional.extend(a_records);
                }
                self.finish(response, None, question);
            }
            Err(error) => {
                log::error!("zone cache failed for {}: {}", question.qname, error);
                response.flags.aa = false;
                response.rcode = Rcode::ServFail;
            }
        }
    }

    /// The resolution driver: advances steps until the response is
    /// complete.
    fn resolve_in_zone(&self, response: &mut Message, question: &Question, zone: &Arc<Zone>) {
        let mut chain = CnameChain::new();
        let mut qname = question.qname.clone();
        let mut qtype = question.qtype;
        let mut zone = Arc::clone(zone);
        loop {
            let matched = self.cache.get_records_by_name(&qname);
            let step = if matched.is_empty() {
                self.resolve_closest_match(response, &qname, qtype, question, &zone, &mut chain)
            } else {
                self.resolve_exact_match(response, &qname, qtype, matched, &zone, &mut chain)
            };
            match step {
                Step::Restart {
                    qname: next_qname,
                    qtype: next_qtype,
                    zone: next_zone,
                } => {
                    qname = next_qname;
                    qtype = next_qtype;
                    zone = next_zone;
                }
                Step::Done => break,
            }
        }
    }

    /// Post-resolution pass: negative-caching TTLs, the signing hook,
    /// additional-section processing, and the deterministic answer
    /// order.
    fn finish(&self, response: &mut Message, zone: Option<&Arc<Zone>>, question: &Question) {
        for record in &mut response.authority {
            if let Some(soa) = record.data.soa().cloned() {
                clamp_to_soa_minimum(record, &soa);
            }
        }
        if let Some(zone) = zone {
            let handled = self.dnssec.handle(
                std::mem::take(response),
                zone,
                &question.qname,
                question.qtype,
            );
            *response = handled;
        }
        additional::process(&self.cache, response);
        sort::sort_answers(response);
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests;
