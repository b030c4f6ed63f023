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

//! Zone snapshots and the [`ZoneCache`] trait.
//!
//! A [`Zone`] is an immutable snapshot of one zone's records, indexed
//! by owner name and by RR type. The resolver never mutates a zone;
//! loaders build a whole new snapshot and publish it through the cache,
//! so concurrent resolutions see consistent data without locking record
//! structures.
//!
//! The [`ZoneCache`] trait abstracts the storage backend holding the
//! zones for which the server is authoritative. Its essential operation
//! is [`ZoneCache::find_zone`], the nearest-ancestor search of
//! [RFC 1034 § 4.3.2] step 2. [`MemoryZoneCache`] is a plain
//! in-process backend.
//!
//! [RFC 1034 § 4.3.2]: https://datatracker.ietf.org/doc/html/rfc1034#section-4.3.2

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::name::Name;
use crate::rr::{predicate, Record, Type};

mod memory;
pub use memory::MemoryZoneCache;

////////////////////////////////////////////////////////////////////////
// ZONES                                                              //
////////////////////////////////////////////////////////////////////////

/// An immutable snapshot of a DNS zone.
#[derive(Clone, Debug)]
pub struct Zone {
    name: Name,
    version: String,
    authority: Vec<Record>,
    records: Vec<Record>,
    records_by_name: HashMap<Name, Vec<Record>>,
    records_by_type: HashMap<Type, Vec<Record>>,
    signing_keys: Option<SigningKeys>,
}

impl Zone {
    /// Builds a zone snapshot from a flat record list. The apex SOA
    /// record(s) become the zone's authority, and the by-name and
    /// by-type indexes are computed up front.
    pub fn new(name: Name, version: impl Into<String>, records: Vec<Record>) -> Self {
        let authority = records
            .iter()
            .filter(|r| predicate::match_name_and_type(&name, Type::SOA)(r))
            .cloned()
            .collect();
        let mut records_by_name: HashMap<Name, Vec<Record>> = HashMap::new();
        let mut records_by_type: HashMap<Type, Vec<Record>> = HashMap::new();
        for record in &records {
            records_by_name
                .entry(record.name.clone())
                .or_default()
                .push(record.clone());
            records_by_type
                .entry(record.rr_type())
                .or_default()
                .push(record.clone());
        }
        Self {
            name,
            version: version.into(),
            authority,
            records,
            records_by_name,
            records_by_type,
            signing_keys: None,
        }
    }

    /// Attaches signing keys to this zone.
    pub fn with_signing_keys(mut self, keys: SigningKeys) -> Self {
        self.signing_keys = Some(keys);
        self
    }

    /// Returns the zone's name (the domain name of its apex).
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the zone's opaque version tag.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the SOA record(s) at the zone's apex.
    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    /// Returns all records of the zone.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records in the zone.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the records owned by `name` (compared
    /// case-insensitively), or an empty slice when the name owns
    /// nothing.
    pub fn records_by_name(&self, name: &Name) -> &[Record] {
        self.records_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the records of the given RR type, or an empty slice.
    pub fn records_by_type(&self, rr_type: Type) -> &[Record] {
        self.records_by_type
            .get(&rr_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the zone's signing keys, if any.
    pub fn signing_keys(&self) -> Option<&SigningKeys> {
        self.signing_keys.as_ref()
    }
}

/// The DNSKEY material a signing hook serves for a zone. The resolver
/// itself only hands these through; key management and signing live
/// behind the [`SigningHook`](crate::dnssec::SigningHook) seam.
#[derive(Clone, Debug)]
pub struct SigningKeys {
    /// The DNSKEY records published at the zone apex.
    pub dnskeys: Vec<Record>,
}

////////////////////////////////////////////////////////////////////////
// THE ZONE CACHE TRAIT                                               //
////////////////////////////////////////////////////////////////////////

/// Trait for zone storage backends.
///
/// The resolver reads all zone data through this interface and never
/// writes through it. Implementations must answer lookups with
/// case-insensitive name comparison, and must return zones as
/// [`Arc`]-shared snapshots so that resolutions in flight keep a
/// consistent view while loaders publish new versions.
pub trait ZoneCache {
    /// Finds the zone that is the nearest ancestor to `qname`. When no
    /// zone covers `qname`, the owner name of `fallback` (the anchor
    /// record the caller received along with the query, if any) is
    /// tried before giving up with [`CacheError::NotAuthoritative`].
    fn find_zone(&self, qname: &Name, fallback: Option<&Record>) -> Result<Arc<Zone>, CacheError>;

    /// Returns all records owned by `name`, searched case-
    /// insensitively across the zones of the cache.
    fn get_records_by_name(&self, name: &Name) -> Vec<Record>;

    /// Returns the records owned by `name` with the given RR type.
    fn get_records_by_name_and_type(&self, name: &Name, rr_type: Type) -> Vec<Record> {
        self.get_records_by_name(name)
            .into_iter()
            .filter(|r| r.rr_type() == rr_type)
            .collect()
    }

    /// Returns the NS records owned by `name`, excluding those at a
    /// zone apex (apex NS records mark authority, not delegation).
    fn get_delegations(&self, name: &Name) -> Vec<Record>;

    /// Returns the SOA record(s) of the zone covering `qname`.
    fn get_authority(&self, qname: &Name) -> Result<Vec<Record>, CacheError>;

    /// Returns whether some locally hosted zone covers `name`.
    fn in_zone(&self, name: &Name) -> bool;

    /// Returns whether `qname` falls within the zone named `zone_name`.
    fn record_name_in_zone(&self, zone_name: &Name, qname: &Name) -> bool;

    /// Returns the zone whose apex is exactly `zone_name`.
    fn get_zone_with_records(&self, zone_name: &Name) -> Result<Arc<Zone>, CacheError>;
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error returned by [`ZoneCache`] operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheError {
    /// No locally hosted zone covers the requested name.
    NotAuthoritative,

    /// No zone exists with the requested apex name.
    ZoneNotFound,

    /// No authority (SOA) records exist for the requested name.
    AuthorityNotFound,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotAuthoritative => f.write_str("not authoritative for the requested name"),
            Self::ZoneNotFound => f.write_str("zone not found"),
            Self::AuthorityNotFound => f.write_str("authority records not found"),
        }
    }
}

impl std::error::Error for CacheError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
