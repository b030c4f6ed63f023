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

//! Detection of delegation boundaries within a zone.
//!
//! A zone cut is marked by NS records at a name below the zone apex.
//! Any name at or under such a cut is spoken for by the child zone, so
//! resolution crossing the boundary must turn into a referral instead
//! of an authoritative answer.

use crate::name::Name;
use crate::rr::Record;
use crate::zone::{Zone, ZoneCache};

/// Walks from just below the zone apex down to `qname`, returning the
/// NS records of the topmost zone cut crossed, if any. Returns `None`
/// when `qname` is outside the zone or no cut lies on the path.
pub(super) fn find<C: ZoneCache>(cache: &C, zone: &Zone, qname: &Name) -> Option<Vec<Record>> {
    if !qname.eq_or_subdomain_of(zone.name()) {
        return None;
    }
    let below_apex = qname.len() - zone.name().len();
    for skip in (0..below_apex).rev() {
        let ancestor = qname.suffix(skip);
        let delegations = cache.get_delegations(&ancestor);
        if !delegations.is_empty() {
            return Some(delegations);
        }
    }
    None
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
