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

//! Implementation of the [`Record`] type and record-set helpers.

use crate::class::Class;
use crate::name::Name;

use super::rdata::SoaData;
use super::{Rdata, Ttl, Type};

////////////////////////////////////////////////////////////////////////
// RESOURCE RECORDS                                                   //
////////////////////////////////////////////////////////////////////////

/// A decoded DNS resource record.
///
/// The RR type is not stored separately; it is derived from the
/// [`Rdata`] variant through [`Record::rr_type`]. Equality is
/// structural, with the owner name compared case-insensitively; the
/// CNAME chain uses this to detect records it has already followed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Record {
    pub name: Name,
    pub class: Class,
    pub ttl: Ttl,
    pub data: Rdata,
}

impl Record {
    /// Creates a new IN-class record.
    pub fn new(name: Name, ttl: Ttl, data: Rdata) -> Self {
        Self {
            name,
            class: Class::IN,
            ttl,
            data,
        }
    }

    /// Returns the RR type of this record.
    pub fn rr_type(&self) -> Type {
        self.data.rr_type()
    }
}

////////////////////////////////////////////////////////////////////////
// RRSET GROUPING                                                     //
////////////////////////////////////////////////////////////////////////

/// Groups records into RRsets by RR type.
///
/// The groups appear in the order in which each type first occurs in
/// `records`, and records keep their original order within each group.
/// DNSSEC signing consumes answers one RRset at a time, which is where
/// this grouping is needed.
pub fn records_to_rrsets(records: &[Record]) -> Vec<Vec<Record>> {
    let mut rrsets: Vec<(Type, Vec<Record>)> = Vec::new();
    for record in records {
        let rr_type = record.rr_type();
        match rrsets.iter_mut().find(|(t, _)| *t == rr_type) {
            Some((_, rrset)) => rrset.push(record.clone()),
            None => rrsets.push((rr_type, vec![record.clone()])),
        }
    }
    rrsets.into_iter().map(|(_, rrset)| rrset).collect()
}

////////////////////////////////////////////////////////////////////////
// NEGATIVE CACHING TTL (RFC 2308 § 3)                                //
////////////////////////////////////////////////////////////////////////

/// Clamps the TTL of an SOA record down to the SOA MINIMUM field.
///
/// Per [RFC 2308 § 3], the TTL of the SOA record in a negative response
/// is not the record's own TTL, but the lesser of that TTL and the SOA
/// MINIMUM field. Records that do not carry SOA data are left
/// untouched.
///
/// [RFC 2308 § 3]: https://datatracker.ietf.org/doc/html/rfc2308#section-3
pub fn clamp_to_soa_minimum(record: &mut Record, soa: &SoaData) {
    if record.data.soa().is_some() {
        record.ttl = record.ttl.min(Ttl::from(soa.minimum));
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
