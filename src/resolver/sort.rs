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

//! Deterministic ordering of the answer section.
//!
//! Responses must come out identically for identical inputs. Exact
//! duplicate records are dropped, CNAME records come first — in chain
//! order, so that each CNAME precedes the record its target names —
//! and everything else follows in a total order over owner name, RR
//! type, and record data.

use std::cmp::Ordering;

use crate::message::Message;
use crate::rr::{Record, Type};

/// Sorts the answer section in place and removes exact duplicates.
pub(super) fn sort_answers(message: &mut Message) {
    let mut deduped: Vec<Record> = Vec::with_capacity(message.answers.len());
    for record in message.answers.drain(..) {
        if !deduped.contains(&record) {
            deduped.push(record);
        }
    }

    let (cnames, mut rest): (Vec<Record>, Vec<Record>) = deduped
        .into_iter()
        .partition(|record| record.rr_type() == Type::CNAME);
    rest.sort_by(compare);

    message.answers = order_cname_chain(cnames);
    message.answers.extend(rest);
}

/// The total order over `(owner, type, rdata)` used outside CNAME
/// chains.
fn compare(a: &Record, b: &Record) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.rr_type().cmp(&b.rr_type()))
        .then_with(|| a.data.cmp(&b.data))
}

/// Orders CNAME records canonically: a record whose target is the owner
/// of another record precedes it, producing head-to-tail chains.
/// Records not linked into any chain fall back to the total order.
fn order_cname_chain(mut cnames: Vec<Record>) -> Vec<Record> {
    cnames.sort_by(compare);
    let mut ordered = Vec::with_capacity(cnames.len());
    while !cnames.is_empty() {
        // Pick a chain head: a record that no remaining record links
        // to.
        let head = cnames
            .iter()
            .position(|candidate| {
                !cnames
                    .iter()
                    .any(|other| other.data.cname() == Some(&candidate.name))
            })
            .unwrap_or(0);
        let mut link = cnames.remove(head);
        loop {
            let target = link.data.cname().cloned();
            ordered.push(link);
            let next = target.and_then(|t| cnames.iter().position(|c| c.name == t));
            match next {
                Some(index) => link = cnames.remove(index),
                None => break,
            }
        }
    }
    ordered
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
