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

//! Composable predicates over resource records.
//!
//! The resolution pipeline repeatedly narrows record sets by owner
//! name, RR type, or data variant. The factories in this module return
//! first-class predicate functions for use with [`Iterator::filter`]
//! and friends, and [`not`] composes their negations.
//!
//! Since the EDNS(0) OPT pseudo-record is a distinct type that never
//! enters the record sections (see
//! [`OptRecord`](crate::message::OptRecord)), these predicates can
//! never observe one.

use crate::name::Name;
use crate::rr::{Rdata, Record, Type};

/// Returns a predicate matching records owned by `name` (compared
/// case-insensitively).
pub fn match_name(name: &Name) -> impl Fn(&Record) -> bool + '_ {
    move |record| record.name == *name
}

/// Returns a predicate matching records of the given RR type.
pub fn match_type(rr_type: Type) -> impl Fn(&Record) -> bool {
    move |record| record.rr_type() == rr_type
}

/// Returns a predicate matching records of any of the given RR types.
pub fn match_types(rr_types: Vec<Type>) -> impl Fn(&Record) -> bool {
    move |record| rr_types.contains(&record.rr_type())
}

/// Returns a predicate matching records owned by `name` with the given
/// RR type.
pub fn match_name_and_type(name: &Name, rr_type: Type) -> impl Fn(&Record) -> bool + '_ {
    move |record| record.name == *name && record.rr_type() == rr_type
}

/// Returns a predicate matching records whose owner name is a wildcard.
pub fn match_wildcard() -> impl Fn(&Record) -> bool {
    |record| record.name.is_wildcard()
}

/// Returns a predicate matching NS records that delegate to `target`
/// (that is, whose name server domain name equals `target`).
pub fn match_delegation(target: &Name) -> impl Fn(&Record) -> bool + '_ {
    move |record| matches!(&record.data, Rdata::Ns { nsdname } if *nsdname == *target)
}

/// Negates a record predicate.
pub fn not<P>(predicate: P) -> impl Fn(&Record) -> bool
where
    P: Fn(&Record) -> bool,
{
    move |record| !predicate(record)
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
