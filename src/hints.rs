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

//! The root name server hints.
//!
//! When the server is not authoritative for a query and root hints are
//! enabled, the response carries the thirteen root server NS records in
//! the authority section and their addresses in the additional section,
//! pointing the client at the top of the hierarchy. The hints are
//! static, well-known data and are compiled in.

use std::net::Ipv4Addr;

use crate::name::Name;
use crate::rr::{Rdata, Record, Ttl};

/// The TTL of the root NS records (6 days, as distributed in the
/// canonical root hints file).
const ROOT_NS_TTL: u32 = 518_400;

/// The TTL of the root server address records.
const ROOT_A_TTL: u32 = 3_600_000;

/// The thirteen root servers and their well-known IPv4 addresses.
const ROOT_SERVERS: [(&str, Ipv4Addr); 13] = [
    ("a.root-servers.net", Ipv4Addr::new(198, 41, 0, 4)),
    ("b.root-servers.net", Ipv4Addr::new(199, 9, 14, 201)),
    ("c.root-servers.net", Ipv4Addr::new(192, 33, 4, 12)),
    ("d.root-servers.net", Ipv4Addr::new(199, 7, 91, 13)),
    ("e.root-servers.net", Ipv4Addr::new(192, 203, 230, 10)),
    ("f.root-servers.net", Ipv4Addr::new(192, 5, 5, 241)),
    ("g.root-servers.net", Ipv4Addr::new(192, 112, 36, 4)),
    ("h.root-servers.net", Ipv4Addr::new(198, 97, 190, 53)),
    ("i.root-servers.net", Ipv4Addr::new(192, 36, 148, 17)),
    ("j.root-servers.net", Ipv4Addr::new(192, 58, 128, 30)),
    ("k.root-servers.net", Ipv4Addr::new(193, 0, 14, 129)),
    ("l.root-servers.net", Ipv4Addr::new(199, 7, 83, 42)),
    ("m.root-servers.net", Ipv4Addr::new(202, 12, 27, 33)),
];

/// Returns the root hints: the thirteen NS records at the root, and
/// the thirteen corresponding A records.
pub fn root_hints() -> (Vec<Record>, Vec<Record>) {
    let mut ns_records = Vec::with_capacity(ROOT_SERVERS.len());
    let mut a_records = Vec::with_capacity(ROOT_SERVERS.len());
    for (server, address) in ROOT_SERVERS {
        let server_name: Name = server.parse().expect("root server names are well-formed");
        ns_records.push(Record::new(
            Name::root(),
            Ttl::from(ROOT_NS_TTL),
            Rdata::Ns {
                nsdname: server_name.clone(),
            },
        ));
        a_records.push(Record::new(
            server_name,
            Ttl::from(ROOT_A_TTL),
            Rdata::A { address },
        ));
    }
    (ns_records, a_records)
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
