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

//! Pluggable record-type handlers.
//!
//! Some deployments serve record types the core does not interpret, or
//! synthesize records at query time (geo-routing, service discovery).
//! A [`RecordHandler`] plugs such behavior into the resolution
//! pipeline: when a name exists but matching by RR type produces
//! nothing, the resolver offers the query to every registered handler
//! claiming the QTYPE.
//!
//! Two calling conventions are supported. [`Version::V1`] handlers see
//! the query name, type, and matched records; [`Version::V2`] handlers
//! additionally see the full query message. Records a handler produces
//! are passed through the signing hook before they are merged into the
//! answer section.
//!
//! A handler that fails is treated as having produced nothing: the
//! registry logs the error and resolution continues, so a misbehaving
//! plugin degrades to a no-data answer instead of taking the query
//! down.

use std::fmt;

use crate::message::Message;
use crate::name::Name;
use crate::rr::{Record, Type};

////////////////////////////////////////////////////////////////////////
// THE HANDLER TRAIT                                                  //
////////////////////////////////////////////////////////////////////////

/// A pluggable handler for one or more RR types.
pub trait RecordHandler: Send + Sync {
    /// An identifier for the handler, used in logging.
    fn module_id(&self) -> &str;

    /// The RR types this handler serves. The handler is also invoked
    /// for ANY queries.
    fn types(&self) -> &[Type];

    /// Produces records for a query ([`Version::V1`] convention).
    fn handle(
        &self,
        qname: &Name,
        qtype: Type,
        matched: &[Record],
    ) -> Result<Vec<Record>, HandlerError>;

    /// Produces records for a query with access to the full query
    /// message ([`Version::V2`] convention). The default forwards to
    /// [`RecordHandler::handle`].
    fn handle_with_message(
        &self,
        qname: &Name,
        qtype: Type,
        matched: &[Record],
        message: &Message,
    ) -> Result<Vec<Record>, HandlerError> {
        let _ = message;
        self.handle(qname, qtype, matched)
    }

    /// Filters a record set for an ANY query. Handlers that synthesize
    /// records can use this to withhold internal bookkeeping records
    /// from ANY answers. The default keeps everything.
    fn filter(&self, records: Vec<Record>) -> Vec<Record> {
        records
    }
}

/// The calling convention a handler was registered under.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Version {
    V1,
    V2,
}

////////////////////////////////////////////////////////////////////////
// THE REGISTRY                                                       //
////////////////////////////////////////////////////////////////////////

/// The set of registered [`RecordHandler`]s.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Registration>,
}

struct Registration {
    handler: Box<dyn RecordHandler>,
    version: Version,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under the given calling convention.
    pub fn register(&mut self, handler: Box<dyn RecordHandler>, version: Version) {
        self.handlers.push(Registration { handler, version });
    }

    /// Returns whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Offers a query to every handler claiming `qtype` (or every
    /// handler, for ANY queries) and returns the concatenation of their
    /// records. Handler failures are logged and contribute nothing.
    pub fn dispatch(
        &self,
        qname: &Name,
        qtype: Type,
        matched: &[Record],
        message: &Message,
    ) -> Vec<Record> {
        let mut produced = Vec::new();
        for registration in &self.handlers {
            if qtype != Type::ANY && !registration.handler.types().contains(&qtype) {
                continue;
            }
            let result = match registration.version {
                Version::V1 => registration.handler.handle(qname, qtype, matched),
                Version::V2 => registration
                    .handler
                    .handle_with_message(qname, qtype, matched, message),
            };
            match result {
                Ok(records) => produced.extend(records),
                Err(error) => log::warn!(
                    "record handler {} failed for {} {}: {}",
                    registration.handler.module_id(),
                    qname,
                    qtype,
                    error
                ),
            }
        }
        produced
    }

    /// Runs a record set through every handler's ANY-query filter.
    pub fn filter_any(&self, records: Vec<Record>) -> Vec<Record> {
        self.handlers
            .iter()
            .fold(records, |records, registration| {
                registration.handler.filter(records)
            })
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error produced by a [`RecordHandler`].
#[derive(Debug)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HandlerError {}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::rr::{Rdata, Ttl};

    use super::*;

    struct StaticHandler {
        types: Vec<Type>,
        fail: bool,
    }

    impl RecordHandler for StaticHandler {
        fn module_id(&self) -> &str {
            "static"
        }

        fn types(&self) -> &[Type] {
            &self.types
        }

        fn handle(
            &self,
            qname: &Name,
            _qtype: Type,
            _matched: &[Record],
        ) -> Result<Vec<Record>, HandlerError> {
            if self.fail {
                Err(HandlerError::new("backend unavailable"))
            } else {
                Ok(vec![Record::new(
                    qname.clone(),
                    Ttl::from(60),
                    Rdata::A {
                        address: Ipv4Addr::new(10, 0, 0, 1),
                    },
                )])
            }
        }

        fn filter(&self, records: Vec<Record>) -> Vec<Record> {
            records
                .into_iter()
                .filter(|r| r.rr_type() != Type::TXT)
                .collect()
        }
    }

    fn qname() -> Name {
        "svc.example.com.".parse().unwrap()
    }

    #[test]
    fn dispatch_respects_claimed_types() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            Box::new(StaticHandler {
                types: vec![Type::A],
                fail: false,
            }),
            Version::V1,
        );

        let message = Message::new(1);
        assert_eq!(
            registry.dispatch(&qname(), Type::A, &[], &message).len(),
            1
        );
        assert!(registry
            .dispatch(&qname(), Type::MX, &[], &message)
            .is_empty());
        // ANY queries reach every handler.
        assert_eq!(
            registry.dispatch(&qname(), Type::ANY, &[], &message).len(),
            1
        );
    }

    #[test]
    fn failing_handlers_contribute_nothing() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            Box::new(StaticHandler {
                types: vec![Type::A],
                fail: true,
            }),
            Version::V1,
        );
        registry.register(
            Box::new(StaticHandler {
                types: vec![Type::A],
                fail: false,
            }),
            Version::V2,
        );

        let message = Message::new(1);
        let produced = registry.dispatch(&qname(), Type::A, &[], &message);
        assert_eq!(produced.len(), 1);
    }

    #[test]
    fn any_filtering_chains_through_handlers() {
        let mut registry = HandlerRegistry::new();
        registry.register(
            Box::new(StaticHandler {
                types: vec![Type::A],
                fail: false,
            }),
            Version::V1,
        );

        let records = vec![
            Record::new(
                qname(),
                Ttl::from(60),
                Rdata::Txt {
                    strings: vec![b"internal".to_vec()],
                },
            ),
            Record::new(
                qname(),
                Ttl::from(60),
                Rdata::A {
                    address: Ipv4Addr::new(10, 0, 0, 1),
                },
            ),
        ];
        let filtered = registry.filter_any(records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].rr_type(), Type::A);
    }
}
