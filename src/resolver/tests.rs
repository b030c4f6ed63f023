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

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Mutex;

use crate::events::{EventSink, ResolutionEvent};
use crate::handler::{HandlerError, HandlerRegistry, RecordHandler, Version};
use crate::message::{Message, Question, Rcode};
use crate::name::Name;
use crate::rr::{Rdata, Record, SoaData, Ttl, Type};
use crate::zone::{MemoryZoneCache, Zone};

use super::{Resolver, MAX_CNAME_CHAIN_LEN};

////////////////////////////////////////////////////////////////////////
// HELPERS                                                            //
////////////////////////////////////////////////////////////////////////

const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));

fn name(from: &str) -> Name {
    from.parse().unwrap()
}

fn soa(owner: &str) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::Soa(SoaData {
            mname: name("ns1.example.com."),
            rname: name("admin.example.com."),
            serial: 2023010101,
            refresh: 86400,
            retry: 7200,
            expire: 604800,
            minimum: 300,
        }),
    )
}

fn a(owner: &str, address: [u8; 4]) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::A {
            address: address.into(),
        },
    )
}

fn ns(owner: &str, nsdname: &str) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::Ns {
            nsdname: name(nsdname),
        },
    )
}

fn cname(owner: &str, target: &str) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::Cname {
            cname: name(target),
        },
    )
}

fn mx(owner: &str, exchange: &str) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::Mx {
            preference: 10,
            exchange: name(exchange),
        },
    )
}

fn txt(owner: &str) -> Record {
    Record::new(
        name(owner),
        Ttl::from(3600),
        Rdata::Txt {
            strings: vec![b"hello".to_vec()],
        },
    )
}

/// Builds a resolver over a single example.com zone containing the
/// given records plus the apex SOA and NS.
fn example_resolver(mut records: Vec<Record>) -> Resolver<MemoryZoneCache> {
    records.insert(0, soa("example.com."));
    records.insert(1, ns("example.com.", "ns1.example.com."));
    let cache = MemoryZoneCache::new();
    cache.put(Zone::new(name("example.com."), "v1", records));
    Resolver::new(cache)
}

fn ask(resolver: &Resolver<MemoryZoneCache>, qname: &str, qtype: Type) -> Message {
    let query = Message::query(1, Question::new(name(qname), qtype));
    resolver.resolve(&query, &[], CLIENT)
}

////////////////////////////////////////////////////////////////////////
// POSITIVE ANSWERS                                                   //
////////////////////////////////////////////////////////////////////////

#[test]
fn exact_a_query_is_answered_authoritatively() {
    let resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    let response = ask(&resolver, "www.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers, vec![a("www.example.com.", [1, 2, 3, 4])]);
    assert!(response.authority.is_empty());
}

#[test]
fn any_query_returns_everything_at_the_name() {
    let resolver = example_resolver(vec![
        a("www.example.com.", [1, 2, 3, 4]),
        txt("www.example.com."),
    ]);
    let response = ask(&resolver, "www.example.com.", Type::ANY);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers.len(), 2);
}

#[test]
fn apex_ns_query_is_answered_from_the_apex() {
    let resolver = example_resolver(Vec::new());
    let response = ask(&resolver, "example.com.", Type::NS);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers, vec![ns("example.com.", "ns1.example.com.")]);
}

#[test]
fn mx_answers_carry_exchange_addresses_in_additional() {
    let resolver = example_resolver(vec![
        mx("example.com.", "mail.example.com."),
        a("mail.example.com.", [1, 1, 1, 1]),
    ]);
    let response = ask(&resolver, "example.com.", Type::MX);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers, vec![mx("example.com.", "mail.example.com.")]);
    assert_eq!(response.additional, vec![a("mail.example.com.", [1, 1, 1, 1])]);
}

////////////////////////////////////////////////////////////////////////
// NEGATIVE ANSWERS                                                   //
////////////////////////////////////////////////////////////////////////

#[test]
fn missing_names_get_nxdomain_with_clamped_soa() {
    let resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    let response = ask(&resolver, "nope.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NxDomain);
    assert!(response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(response.authority.len(), 1);
    let authority = &response.authority[0];
    assert_eq!(authority.rr_type(), Type::SOA);
    // RFC 2308: the negative TTL is min(record TTL, SOA MINIMUM).
    assert_eq!(u32::from(authority.ttl), 300);
}

#[test]
fn existing_names_without_the_type_get_no_data() {
    let resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    let response = ask(&resolver, "www.example.com.", Type::AAAA);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(response.authority.len(), 1);
    assert_eq!(response.authority[0].rr_type(), Type::SOA);
}

#[test]
fn rrsig_queries_are_refused() {
    let resolver = example_resolver(Vec::new());
    let response = ask(&resolver, "www.example.com.", Type::RRSIG);
    assert_eq!(response.rcode, Rcode::Refused);
    assert!(!response.flags.aa);
    assert!(response.answers.is_empty());
}

////////////////////////////////////////////////////////////////////////
// WILDCARDS                                                          //
////////////////////////////////////////////////////////////////////////

#[test]
fn wildcard_answers_take_the_query_name() {
    let resolver = example_resolver(vec![a("*.example.com.", [5, 6, 7, 8])]);
    let response = ask(&resolver, "anything.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers, vec![a("anything.example.com.", [5, 6, 7, 8])]);
    assert!(response.answers.iter().all(|r| !r.name.is_wildcard()));
}

#[test]
fn wildcard_cname_is_chased_to_the_target() {
    let resolver = example_resolver(vec![
        cname("*.example.com.", "target.example.com."),
        a("target.example.com.", [5, 6, 7, 8]),
    ]);
    let response = ask(&resolver, "anything.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(
        response.answers,
        vec![
            cname("anything.example.com.", "target.example.com."),
            a("target.example.com.", [5, 6, 7, 8]),
        ]
    );
}

#[test]
fn wildcard_without_the_type_gets_no_data() {
    let resolver = example_resolver(vec![txt("*.example.com.")]);
    let response = ask(&resolver, "host.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(response.authority.len(), 1);
    assert_eq!(response.authority[0].rr_type(), Type::SOA);
}

#[test]
fn exact_names_shadow_the_wildcard() {
    let resolver = example_resolver(vec![
        a("host.example.com.", [1, 1, 1, 1]),
        a("*.example.com.", [2, 2, 2, 2]),
    ]);
    let response = ask(&resolver, "host.example.com.", Type::A);
    assert_eq!(response.answers, vec![a("host.example.com.", [1, 1, 1, 1])]);
}

////////////////////////////////////////////////////////////////////////
// CNAME CHAINS                                                       //
////////////////////////////////////////////////////////////////////////

#[test]
fn cname_chains_are_followed_within_the_zone() {
    let resolver = example_resolver(vec![
        cname("start.example.com.", "middle.example.com."),
        cname("middle.example.com.", "end.example.com."),
        a("end.example.com.", [9, 8, 7, 6]),
    ]);
    let response = ask(&resolver, "start.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(
        response.answers,
        vec![
            cname("start.example.com.", "middle.example.com."),
            cname("middle.example.com.", "end.example.com."),
            a("end.example.com.", [9, 8, 7, 6]),
        ]
    );
}

#[test]
fn cname_queries_are_not_chased() {
    let resolver = example_resolver(vec![
        cname("alias.example.com.", "www.example.com."),
        a("www.example.com.", [1, 2, 3, 4]),
    ]);
    let response = ask(&resolver, "alias.example.com.", Type::CNAME);
    assert_eq!(
        response.answers,
        vec![cname("alias.example.com.", "www.example.com.")]
    );
}

#[test]
fn cname_loops_fail_with_servfail() {
    let resolver = example_resolver(vec![
        cname("a.example.com.", "b.example.com."),
        cname("b.example.com.", "a.example.com."),
    ]);
    let response = ask(&resolver, "a.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::ServFail);
    assert!(response.flags.aa);
}

#[test]
fn over_long_cname_chains_fail_like_loops() {
    let owners: Vec<char> = ('a'..='z').collect();
    let mut records = Vec::new();
    for window in owners.windows(2).take(MAX_CNAME_CHAIN_LEN + 2) {
        records.push(cname(
            &format!("{}.example.com.", window[0]),
            &format!("{}.example.com.", window[1]),
        ));
    }
    let resolver = example_resolver(records);
    let response = ask(&resolver, "a.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::ServFail);
    assert!(response.flags.aa);
}

#[test]
fn cname_leaving_the_bailiwick_stops_the_chase() {
    let resolver = example_resolver(vec![cname(
        "alias.example.com.",
        "www.unrelated.net.",
    )]);
    let response = ask(&resolver, "alias.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(
        response.answers,
        vec![cname("alias.example.com.", "www.unrelated.net.")]
    );
}

#[test]
fn cname_crossing_into_another_local_zone_restarts_there() {
    let cache = MemoryZoneCache::new();
    cache.put(Zone::new(
        name("example.com."),
        "v1",
        vec![
            soa("example.com."),
            cname("alias.example.com.", "www.example.org."),
        ],
    ));
    cache.put(Zone::new(
        name("example.org."),
        "v1",
        vec![
            Record::new(
                name("example.org."),
                Ttl::from(3600),
                Rdata::Soa(SoaData {
                    mname: name("ns1.example.org."),
                    rname: name("admin.example.org."),
                    serial: 1,
                    refresh: 86400,
                    retry: 7200,
                    expire: 604800,
                    minimum: 60,
                }),
            ),
            a("www.example.org.", [4, 4, 4, 4]),
        ],
    ));
    let resolver = Resolver::new(cache);
    let response = ask(&resolver, "alias.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(
        response.answers,
        vec![
            cname("alias.example.com.", "www.example.org."),
            a("www.example.org.", [4, 4, 4, 4]),
        ]
    );
}

////////////////////////////////////////////////////////////////////////
// DELEGATIONS                                                        //
////////////////////////////////////////////////////////////////////////

#[test]
fn names_below_a_delegation_get_a_referral_with_glue() {
    let resolver = example_resolver(vec![
        ns("sub.example.com.", "ns1.sub.example.com."),
        a("ns1.sub.example.com.", [9, 9, 9, 9]),
    ]);
    let response = ask(&resolver, "host.sub.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(!response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(
        response.authority,
        vec![ns("sub.example.com.", "ns1.sub.example.com.")]
    );
    assert_eq!(response.additional, vec![a("ns1.sub.example.com.", [9, 9, 9, 9])]);
    // A referral carries NS and never an SOA.
    assert!(response.authority.iter().all(|r| r.rr_type() == Type::NS));
}

#[test]
fn data_at_a_delegation_point_is_not_answered_authoritatively() {
    let resolver = example_resolver(vec![
        ns("sub.example.com.", "ns1.sub.example.com."),
        txt("sub.example.com."),
    ]);
    let response = ask(&resolver, "sub.example.com.", Type::TXT);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(!response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(
        response.authority,
        vec![ns("sub.example.com.", "ns1.sub.example.com.")]
    );
}

#[test]
fn data_below_a_delegation_point_gets_a_referral() {
    // The A record at ns1.sub.example.com. is glue: the NS records at
    // the ancestor sub.example.com. delegate everything beneath them.
    let resolver = example_resolver(vec![
        ns("sub.example.com.", "ns1.sub.example.com."),
        a("ns1.sub.example.com.", [9, 9, 9, 9]),
    ]);
    let response = ask(&resolver, "ns1.sub.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(!response.flags.aa);
    assert!(response.answers.is_empty());
    assert_eq!(
        response.authority,
        vec![ns("sub.example.com.", "ns1.sub.example.com.")]
    );
    // The glue address still reaches the client, as additional data.
    assert_eq!(response.additional, vec![a("ns1.sub.example.com.", [9, 9, 9, 9])]);
}

#[test]
fn ns_queries_at_a_delegation_point_get_a_referral() {
    let resolver = example_resolver(vec![
        ns("sub.example.com.", "ns1.sub.example.com."),
        a("ns1.sub.example.com.", [9, 9, 9, 9]),
    ]);
    let response = ask(&resolver, "sub.example.com.", Type::NS);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(!response.flags.aa);
    assert_eq!(
        response.authority,
        vec![ns("sub.example.com.", "ns1.sub.example.com.")]
    );
}

#[test]
fn cname_targets_below_a_zone_cut_become_referrals() {
    let resolver = example_resolver(vec![
        cname("alias.example.com.", "host.sub.example.com."),
        ns("sub.example.com.", "ns1.sub.example.com."),
    ]);
    let response = ask(&resolver, "alias.example.com.", Type::A);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(!response.flags.aa);
    assert_eq!(
        response.answers,
        vec![cname("alias.example.com.", "host.sub.example.com.")]
    );
    assert_eq!(
        response.authority,
        vec![ns("sub.example.com.", "ns1.sub.example.com.")]
    );
}

////////////////////////////////////////////////////////////////////////
// OUTSIDE OUR AUTHORITY                                              //
////////////////////////////////////////////////////////////////////////

#[test]
fn foreign_names_get_root_hints_when_enabled() {
    let resolver = example_resolver(Vec::new());
    let response = ask(&resolver, "com.", Type::NS);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.authority.len(), 13);
    assert!(response.authority.iter().all(|r| r.rr_type() == Type::NS));
    assert_eq!(response.additional.len(), 13);
    assert!(response.additional.iter().all(|r| r.rr_type() == Type::A));
}

#[test]
fn foreign_names_get_an_empty_answer_when_hints_are_off() {
    let mut resolver = example_resolver(Vec::new());
    resolver.set_root_hints(false);
    let response = ask(&resolver, "com.", Type::NS);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert!(response.authority.is_empty());
    assert!(response.additional.is_empty());
}

////////////////////////////////////////////////////////////////////////
// MESSAGE HANDLING                                                   //
////////////////////////////////////////////////////////////////////////

#[test]
fn messages_without_questions_pass_through() {
    let resolver = example_resolver(Vec::new());
    let mut query = Message::new(7);
    query.rcode = Rcode::FormErr;
    let response = resolver.resolve(&query, &[], CLIENT);
    assert_eq!(response, query);
}

#[test]
fn recursion_and_dnssec_flags_are_cleared() {
    let resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    let mut query = Message::query(1, Question::new(name("www.example.com."), Type::A));
    query.flags.ra = true;
    query.flags.ad = true;
    query.flags.cd = true;
    let response = resolver.resolve(&query, &[], CLIENT);
    assert!(!response.flags.ra);
    assert!(!response.flags.ad);
    assert!(!response.flags.cd);
}

#[test]
fn only_the_first_question_is_resolved() {
    let resolver = example_resolver(vec![
        a("www.example.com.", [1, 2, 3, 4]),
        a("other.example.com.", [5, 5, 5, 5]),
    ]);
    let mut query = Message::query(1, Question::new(name("www.example.com."), Type::A));
    query
        .questions
        .push(Question::new(name("other.example.com."), Type::A));
    let response = resolver.resolve(&query, &[], CLIENT);
    assert_eq!(response.answers, vec![a("www.example.com.", [1, 2, 3, 4])]);
}

#[test]
fn resolution_is_deterministic() {
    let resolver = example_resolver(vec![
        cname("start.example.com.", "end.example.com."),
        a("end.example.com.", [9, 8, 7, 6]),
        a("end.example.com.", [9, 8, 7, 5]),
        mx("end.example.com.", "mail.example.com."),
        a("mail.example.com.", [1, 1, 1, 1]),
    ]);
    let first = ask(&resolver, "start.example.com.", Type::A);
    let second = ask(&resolver, "start.example.com.", Type::A);
    assert_eq!(first, second);
}

#[test]
fn the_authority_hint_anchors_zone_selection() {
    let resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    // The QNAME matches no zone, but the hint points into example.com,
    // which then answers NXDOMAIN as the anchored authority.
    let query = Message::query(1, Question::new(name("www.example.net."), Type::A));
    let hints = [soa("example.com.")];
    let response = resolver.resolve(&query, &hints, CLIENT);
    assert_eq!(response.rcode, Rcode::NxDomain);
    assert!(response.flags.aa);
    assert_eq!(response.authority.len(), 1);
    assert_eq!(response.authority[0].rr_type(), Type::SOA);
}

////////////////////////////////////////////////////////////////////////
// HANDLERS AND EVENTS                                                //
////////////////////////////////////////////////////////////////////////

struct SpfHandler;

impl RecordHandler for SpfHandler {
    fn module_id(&self) -> &str {
        "spf"
    }

    fn types(&self) -> &[Type] {
        &[Type::SPF]
    }

    fn handle(
        &self,
        qname: &Name,
        _qtype: Type,
        matched: &[Record],
    ) -> Result<Vec<Record>, HandlerError> {
        // Serve TXT data at the name as SPF.
        Ok(matched
            .iter()
            .filter(|r| r.rr_type() == Type::TXT)
            .map(|r| Record::new(qname.clone(), r.ttl, r.data.clone()))
            .collect())
    }
}

#[test]
fn custom_handlers_answer_unclaimed_types() {
    let mut resolver = example_resolver(vec![txt("www.example.com.")]);
    let mut handlers = HandlerRegistry::new();
    handlers.register(Box::new(SpfHandler), Version::V1);
    resolver.set_handlers(handlers);

    let response = ask(&resolver, "www.example.com.", Type::SPF);
    assert_eq!(response.rcode, Rcode::NoError);
    assert!(response.flags.aa);
    assert_eq!(response.answers, vec![txt("www.example.com.")]);
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<&'static str>>,
}

impl EventSink for RecordingSink {
    fn notify(&self, event: ResolutionEvent) {
        let kind = match event {
            ResolutionEvent::HandlingStarted { .. } => "started",
            ResolutionEvent::HandlingFinished { .. } => "finished",
            ResolutionEvent::DnssecRequested { .. } => "dnssec",
        };
        self.events.lock().unwrap().push(kind);
    }
}

#[test]
fn telemetry_brackets_each_resolution() {
    use std::sync::Arc;

    struct SharedSink(Arc<RecordingSink>);
    impl EventSink for SharedSink {
        fn notify(&self, event: ResolutionEvent) {
            self.0.notify(event);
        }
    }

    let sink = Arc::new(RecordingSink::default());
    let mut resolver = example_resolver(vec![a("www.example.com.", [1, 2, 3, 4])]);
    resolver.set_event_sink(Box::new(SharedSink(Arc::clone(&sink))));

    ask(&resolver, "www.example.com.", Type::A);
    let events = sink.events.lock().unwrap();
    assert_eq!(*events, vec!["started", "finished"]);
}
