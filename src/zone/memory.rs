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

//! An in-memory [`ZoneCache`] backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::name::Name;
use crate::rr::{Record, Type};

use super::{CacheError, Zone, ZoneCache};

/// A [`ZoneCache`] holding zones in a process-local map.
///
/// Zones are stored as [`Arc`] snapshots keyed by apex name. Loaders
/// publish a new snapshot with [`MemoryZoneCache::put`]; resolutions
/// that hold an `Arc` from before the swap keep reading the old
/// snapshot, so no reader ever observes a half-loaded zone. The
/// interior lock guards only the map itself.
#[derive(Debug, Default)]
pub struct MemoryZoneCache {
    zones: RwLock<HashMap<Name, Arc<Zone>>>,
}

impl MemoryZoneCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a zone snapshot, replacing any previous snapshot of
    /// the same zone.
    pub fn put(&self, zone: Zone) {
        let mut zones = self.zones.write().expect("zone map lock poisoned");
        zones.insert(zone.name().clone(), Arc::new(zone));
    }

    /// Removes a zone from the cache.
    pub fn delete(&self, zone_name: &Name) {
        let mut zones = self.zones.write().expect("zone map lock poisoned");
        zones.remove(zone_name);
    }

    /// Returns the number of zones in the cache.
    pub fn zone_count(&self) -> usize {
        self.zones.read().expect("zone map lock poisoned").len()
    }

    /// Walks `name` toward the root, returning the zone that is its
    /// nearest enclosing ancestor (or the zone at `name` itself).
    fn nearest_zone(&self, name: &Name) -> Option<Arc<Zone>> {
        let zones = self.zones.read().expect("zone map lock poisoned");
        (0..=name.len())
            .map(|skip| name.suffix(skip))
            .find_map(|candidate| zones.get(&candidate).cloned())
    }
}

impl ZoneCache for MemoryZoneCache {
    fn find_zone(&self, qname: &Name, fallback: Option<&Record>) -> Result<Arc<Zone>, CacheError> {
        self.nearest_zone(qname)
            .or_else(|| fallback.and_then(|record| self.nearest_zone(&record.name)))
            .ok_or(CacheError::NotAuthoritative)
    }

    fn get_records_by_name(&self, name: &Name) -> Vec<Record> {
        match self.nearest_zone(name) {
            Some(zone) => zone.records_by_name(name).to_vec(),
            None => Vec::new(),
        }
    }

    fn get_delegations(&self, name: &Name) -> Vec<Record> {
        match self.nearest_zone(name) {
            Some(zone) if zone.name() != name => zone
                .records_by_name(name)
                .iter()
                .filter(|r| r.rr_type() == Type::NS)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn get_authority(&self, qname: &Name) -> Result<Vec<Record>, CacheError> {
        match self.nearest_zone(qname) {
            Some(zone) if !zone.authority().is_empty() => Ok(zone.authority().to_vec()),
            _ => Err(CacheError::AuthorityNotFound),
        }
    }

    fn in_zone(&self, name: &Name) -> bool {
        self.nearest_zone(name).is_some()
    }

    fn record_name_in_zone(&self, zone_name: &Name, qname: &Name) -> bool {
        let zones = self.zones.read().expect("zone map lock poisoned");
        zones.contains_key(zone_name) && qname.eq_or_subdomain_of(zone_name)
    }

    fn get_zone_with_records(&self, zone_name: &Name) -> Result<Arc<Zone>, CacheError> {
        let zones = self.zones.read().expect("zone map lock poisoned");
        zones
            .get(zone_name)
            .cloned()
            .ok_or(CacheError::ZoneNotFound)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
