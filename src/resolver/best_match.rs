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

//! The best-match search for names that own no records.
//!
//! When the query name itself owns nothing, [RFC 1034 § 4.3.2] step 3
//! has us look for the closest enclosing match: walking label by label
//! toward the zone apex, a wildcard owner at each depth is preferred
//! over the plain ancestor name at the same depth, and either beats
//! anything further up. The records returned here feed the
//! closest-match resolution step, which decides between wildcard
//! synthesis, a referral, and NXDOMAIN.
//!
//! [RFC 1034 § 4.3.2]: https://datatracker.ietf.org/doc/html/rfc1034#section-4.3.2

use crate::name::{LabelBuf, Name};
use crate::rr::Record;
use crate::zone::ZoneCache;

/// Searches for the records that best match `qname`, walking from the
/// most-specific suffix toward the root. Returns an empty vector when
/// the labels are exhausted without a match.
pub(super) fn search<C: ZoneCache>(cache: &C, qname: &Name) -> Vec<Record> {
    for depth in 1..=qname.len() {
        let suffix = qname.suffix(depth);
        if let Ok(wildcard) = suffix.prepend(LabelBuf::asterisk()) {
            let matches = cache.get_records_by_name(&wildcard);
            if !matches.is_empty() {
                return matches;
            }
        }
        if !suffix.is_empty() {
            let matches = cache.get_records_by_name(&suffix);
            if !matches.is_empty() {
                return matches;
            }
        }
    }
    Vec::new()
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
