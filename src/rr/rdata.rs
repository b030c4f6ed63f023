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

//! Implementation of decoded record data.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::name::Name;

use super::Type;

////////////////////////////////////////////////////////////////////////
// RDATA                                                              //
////////////////////////////////////////////////////////////////////////

/// Decoded record data, tagged by RR type.
///
/// The resolver works with messages whose records have already been
/// decoded from the wire, so RDATA is a tagged union over type-specific
/// structures rather than an octet string. Types without a dedicated
/// variant are carried verbatim in [`Rdata::Unknown`], following the
/// opaque treatment prescribed by [RFC 3597].
///
/// Note that the EDNS(0) OPT pseudo-record is *not* represented here:
/// it is a separate structure ([`OptRecord`](crate::message::OptRecord))
/// kept out of the record sections entirely, so that record filtering
/// can never mistake it for ordinary record data.
///
/// The derived [`Ord`] implementation provides the total order over
/// RDATA that deterministic answer sorting requires.
///
/// [RFC 3597]: https://datatracker.ietf.org/doc/html/rfc3597
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rdata {
    A {
        address: Ipv4Addr,
    },
    Aaaa {
        address: Ipv6Addr,
    },
    Ns {
        nsdname: Name,
    },
    Cname {
        cname: Name,
    },
    Ptr {
        ptrdname: Name,
    },
    Soa(SoaData),
    Mx {
        preference: u16,
        exchange: Name,
    },
    Txt {
        strings: Vec<Vec<u8>>,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Name,
    },
    Naptr {
        order: u16,
        preference: u16,
        flags: Vec<u8>,
        services: Vec<u8>,
        regexp: Vec<u8>,
        replacement: Name,
    },
    Ds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    Dnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },
    Rrsig {
        type_covered: Type,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer_name: Name,
        signature: Vec<u8>,
    },
    Nsec {
        next_name: Name,
        types: Vec<Type>,
    },
    Unknown {
        rr_type: Type,
        octets: Vec<u8>,
    },
}

impl Rdata {
    /// Returns the RR type that this record data belongs to.
    pub fn rr_type(&self) -> Type {
        match self {
            Self::A { .. } => Type::A,
            Self::Aaaa { .. } => Type::AAAA,
            Self::Ns { .. } => Type::NS,
            Self::Cname { .. } => Type::CNAME,
            Self::Ptr { .. } => Type::PTR,
            Self::Soa(_) => Type::SOA,
            Self::Mx { .. } => Type::MX,
            Self::Txt { .. } => Type::TXT,
            Self::Srv { .. } => Type::SRV,
            Self::Naptr { .. } => Type::NAPTR,
            Self::Ds { .. } => Type::DS,
            Self::Dnskey { .. } => Type::DNSKEY,
            Self::Rrsig { .. } => Type::RRSIG,
            Self::Nsec { .. } => Type::NSEC,
            Self::Unknown { rr_type, .. } => *rr_type,
        }
    }

    /// Returns the CNAME target when this is CNAME data.
    pub fn cname(&self) -> Option<&Name> {
        match self {
            Self::Cname { cname } => Some(cname),
            _ => None,
        }
    }

    /// Returns the SOA fields when this is SOA data.
    pub fn soa(&self) -> Option<&SoaData> {
        match self {
            Self::Soa(soa) => Some(soa),
            _ => None,
        }
    }

    /// Returns the domain name that additional-section processing
    /// should look up addresses for: the name server name of NS data or
    /// the mail exchange of MX data.
    pub fn glue_target(&self) -> Option<&Name> {
        match self {
            Self::Ns { nsdname } => Some(nsdname),
            Self::Mx { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}

/// The fields of SOA record data ([RFC 1035 § 3.3.13]).
///
/// [RFC 1035 § 3.3.13]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3.13
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SoaData {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rr_type_follows_the_variant() {
        let a = Rdata::A {
            address: Ipv4Addr::LOCALHOST,
        };
        assert_eq!(a.rr_type(), Type::A);

        let unknown = Rdata::Unknown {
            rr_type: Type::from(0xff00),
            octets: vec![1, 2, 3],
        };
        assert_eq!(unknown.rr_type(), Type::from(0xff00));
    }

    #[test]
    fn glue_targets_cover_ns_and_mx_only() {
        let ns = Rdata::Ns {
            nsdname: "ns1.example.com.".parse().unwrap(),
        };
        let mx = Rdata::Mx {
            preference: 10,
            exchange: "mail.example.com.".parse().unwrap(),
        };
        let a = Rdata::A {
            address: Ipv4Addr::LOCALHOST,
        };
        assert_eq!(ns.glue_target().unwrap().to_string(), "ns1.example.com.");
        assert_eq!(mx.glue_target().unwrap().to_string(), "mail.example.com.");
        assert!(a.glue_target().is_none());
    }
}
