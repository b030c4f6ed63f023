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

//! The DNSSEC signing seam.
//!
//! The resolver does not generate signatures; a signing engine is
//! attached through the [`SigningHook`] trait. The hook has exactly one
//! post-resolution call site (between resolution and additional-section
//! processing), plus two record-level entry points: one for records
//! produced by custom handlers and one for serving the apex DNSKEY
//! RRset. When no engine is attached, [`NoSigning`] leaves messages
//! untouched.

use crate::message::Message;
use crate::name::Name;
use crate::rr::{Record, Type};
use crate::zone::Zone;

/// Hook for a DNSSEC signing engine.
///
/// All methods have pass-through defaults, so an implementation only
/// overrides the behavior it provides.
pub trait SigningHook: Send + Sync {
    /// Post-resolution signing of a complete response.
    fn handle(&self, message: Message, zone: &Zone, qname: &Name, qtype: Type) -> Message {
        let _ = (zone, qname, qtype);
        message
    }

    /// Signs a record set produced outside the zone data (e.g. by a
    /// custom record handler) before it is merged into the answers.
    fn maybe_sign_rrset(&self, message: &Message, records: Vec<Record>, zone: &Zone) -> Vec<Record> {
        let _ = (message, zone);
        records
    }

    /// Returns the DNSKEY RRset to serve at the zone apex. The default
    /// serves the keys published in the zone snapshot, if any.
    fn dnskey_rrset(&self, message: &Message, zone: &Zone) -> Vec<Record> {
        let _ = message;
        zone.signing_keys()
            .map(|keys| keys.dnskeys.clone())
            .unwrap_or_default()
    }
}

/// The no-op [`SigningHook`] used when DNSSEC is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSigning;

impl SigningHook for NoSigning {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::rr::{Rdata, Ttl};
    use crate::zone::SigningKeys;

    use super::*;

    #[test]
    fn no_signing_is_a_pass_through() {
        let zone = Zone::new("example.com.".parse().unwrap(), "v1", Vec::new());
        let qname: Name = "www.example.com.".parse().unwrap();
        let message = Message::new(7);
        let handled = NoSigning.handle(message.clone(), &zone, &qname, Type::A);
        assert_eq!(handled, message);

        let records = vec![Record::new(
            qname,
            Ttl::from(60),
            Rdata::Txt {
                strings: vec![b"x".to_vec()],
            },
        )];
        assert_eq!(
            NoSigning.maybe_sign_rrset(&message, records.clone(), &zone),
            records
        );
    }

    #[test]
    fn default_dnskey_rrset_comes_from_the_zone() {
        let apex: Name = "example.com.".parse().unwrap();
        let dnskey = Record::new(
            apex.clone(),
            Ttl::from(3600),
            Rdata::Dnskey {
                flags: 257,
                protocol: 3,
                algorithm: 8,
                public_key: vec![1, 2, 3],
            },
        );
        let zone = Zone::new(apex, "v1", Vec::new()).with_signing_keys(SigningKeys {
            dnskeys: vec![dnskey.clone()],
        });
        let message = Message::new(7);
        assert_eq!(NoSigning.dnskey_rrset(&message, &zone), vec![dnskey]);

        let unsigned = Zone::new("example.net.".parse().unwrap(), "v1", Vec::new());
        assert!(NoSigning.dnskey_rrset(&message, &unsigned).is_empty());
    }
}
