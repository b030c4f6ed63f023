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

//! Fire-and-forget resolution telemetry.

use std::net::IpAddr;

use crate::message::Rcode;
use crate::name::Name;
use crate::rr::Type;

/// An event emitted during resolution. Sinks must not block; the
/// resolver does not wait on them.
#[derive(Clone, Debug)]
pub enum ResolutionEvent {
    /// A question is about to be resolved.
    HandlingStarted {
        qname: Name,
        qtype: Type,
        client: IpAddr,
    },

    /// Resolution of a question has finished.
    HandlingFinished {
        qname: Name,
        qtype: Type,
        rcode: Rcode,
        client: IpAddr,
    },

    /// A client signaled DNSSEC support (the EDNS DO bit) on a query.
    DnssecRequested { qname: Name, qtype: Type },
}

/// A consumer of [`ResolutionEvent`]s.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: ResolutionEvent);
}

/// An [`EventSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&self, _event: ResolutionEvent) {}
}

/// An [`EventSink`] that forwards events to the `log` facade at debug
/// level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&self, event: ResolutionEvent) {
        match event {
            ResolutionEvent::HandlingStarted {
                qname,
                qtype,
                client,
            } => {
                log::debug!("resolving {} {} for {}", qname, qtype, client);
            }
            ResolutionEvent::HandlingFinished {
                qname,
                qtype,
                rcode,
                client,
            } => {
                log::debug!(
                    "resolved {} {} for {}: {:?}",
                    qname,
                    qtype,
                    client,
                    rcode
                );
            }
            ResolutionEvent::DnssecRequested { qname, qtype } => {
                log::debug!("dnssec requested for {} {}", qname, qtype);
            }
        }
    }
}
