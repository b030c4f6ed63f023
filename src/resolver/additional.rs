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

//! Additional-section (glue) processing.
//!
//! For certain RR types, [RFC 1034] and [RFC 1035] call for "additional
//! section processing": available address records for domain names
//! embedded in the RDATA are included in the additional section, so
//! that resolvers are spared the follow-up queries they would
//! otherwise need — in the referral case, queries that could not even
//! be answered without the glue. This implementation covers the NS name
//! server name and the MX mail exchange; [RFC 3596] extends the address
//! records to AAAA.
//!
//! Everything here is best-effort extra information (see
//! [RFC 2181 § 9]): when no addresses are found the response simply
//! goes out without them.
//!
//! [RFC 1034]: https://datatracker.ietf.org/doc/html/rfc1034
//! [RFC 1035]: https://datatracker.ietf.org/doc/html/rfc1035
//! [RFC 2181 § 9]: https://datatracker.ietf.org/doc/html/rfc2181#section-9
//! [RFC 3596]: https://datatracker.ietf.org/doc/html/rfc3596

use crate::message::Message;
use crate::name::Name;
use crate::rr::Type;
use crate::zone::ZoneCache;

/// Fills the additional section with A/AAAA records for the targets of
/// NS and MX records in the answer and authority sections. Existing
/// additional records are preserved.
pub(super) fn process<C: ZoneCache>(cache: &C, message: &mut Message) {
    let mut targets: Vec<Name> = Vec::new();
    for record in message.answers_and_authority() {
        if let Some(target) = record.data.glue_target() {
            if !targets.contains(target) {
                targets.push(target.clone());
            }
        }
    }
    if targets.is_empty() {
        return;
    }

    let mut glue = Vec::new();
    for target in &targets {
        for record in cache.get_records_by_name(target) {
            if matches!(record.rr_type(), Type::A | Type::AAAA) {
                glue.push(record);
            }
        }
    }
    message.additional.extend(glue);
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
