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

//! The query-resolution core of an authoritative DNS server.
//!
//! Bailiwick implements the message-answering logic of an
//! authoritative-only nameserver — [RFC 1034 § 4.3.2] resolution with
//! wildcard synthesis ([RFC 4592]), CNAME chains ([RFC 6604]),
//! referrals, negative caching ([RFC 2308]), and additional-section
//! glue — over decoded DNS messages. Listening sockets, the wire
//! codec, and zone provisioning are deliberately outside: an embedding
//! server decodes a query, calls [`resolver::Resolver::resolve`], and
//! encodes the returned response.
//!
//! Zone data reaches the resolver through the
//! [`zone::ZoneCache`] trait; [`zone::MemoryZoneCache`] is the
//! built-in in-process backend. Custom record types plug in through
//! [`handler::HandlerRegistry`], a DNSSEC signing engine through
//! [`dnssec::SigningHook`], and telemetry through
//! [`events::EventSink`].
//!
//! [RFC 1034 § 4.3.2]: https://datatracker.ietf.org/doc/html/rfc1034#section-4.3.2
//! [RFC 2308]: https://datatracker.ietf.org/doc/html/rfc2308
//! [RFC 4592]: https://datatracker.ietf.org/doc/html/rfc4592
//! [RFC 6604]: https://datatracker.ietf.org/doc/html/rfc6604

pub mod class;
pub mod dnssec;
pub mod events;
pub mod handler;
pub mod hints;
pub mod message;
pub mod name;
pub mod resolver;
pub mod rr;
pub mod zone;

mod util;
