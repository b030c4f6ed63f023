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

//! Decoded DNS message structures.
//!
//! The resolver consumes messages that an external codec has already
//! decoded, and produces messages for that codec to encode. Hence these
//! structures model the [RFC 1035 § 4.1] message sections directly,
//! with no wire-format concerns beyond the fields themselves.
//!
//! [RFC 1035 § 4.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1

use crate::class::Class;
use crate::name::Name;
use crate::rr::{Record, Type};

mod rcode;
pub use rcode::{IntoRcodeError, Rcode};

////////////////////////////////////////////////////////////////////////
// MESSAGES                                                           //
////////////////////////////////////////////////////////////////////////

/// A decoded DNS message.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    pub id: u16,
    pub flags: Flags,
    pub rcode: Rcode,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
    pub edns: Option<OptRecord>,
}

impl Message {
    /// Creates an empty message with the given ID.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Creates a query message for the given question.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            id,
            questions: vec![question],
            ..Default::default()
        }
    }

    /// Returns the first question, if any. Only the first question of a
    /// message is ever resolved; the rest are discarded.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns an iterator over the answer and authority sections, the
    /// two sections subject to additional-section processing.
    pub fn answers_and_authority(&self) -> impl Iterator<Item = &Record> {
        self.answers.iter().chain(self.authority.iter())
    }
}

/// The header flags of a DNS message that the resolver reads or writes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flags {
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub ad: bool,
    pub cd: bool,
}

////////////////////////////////////////////////////////////////////////
// QUESTIONS                                                          //
////////////////////////////////////////////////////////////////////////

/// The question section entry of a DNS message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    pub qname: Name,
    pub qtype: Type,
    pub qclass: Class,
}

impl Question {
    /// Creates an IN-class question.
    pub fn new(qname: Name, qtype: Type) -> Self {
        Self {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }
}

////////////////////////////////////////////////////////////////////////
// EDNS(0)                                                            //
////////////////////////////////////////////////////////////////////////

/// The decoded EDNS(0) OPT pseudo-record ([RFC 6891]).
///
/// OPT is carried in the additional section on the wire, but it is not
/// record data: it extends the message header. It is therefore a
/// structure of its own, held in [`Message::edns`] rather than among
/// the [`Record`]s, and record predicates can never observe one.
///
/// [RFC 6891]: https://datatracker.ietf.org/doc/html/rfc6891
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptRecord {
    /// The requestor's maximum UDP payload size.
    pub udp_payload_size: u16,
    pub extended_rcode: u8,
    pub version: u8,
    /// The DO bit: the requestor understands DNSSEC records.
    pub dnssec_ok: bool,
    /// Raw EDNS options (code, value), carried through untouched.
    pub options: Vec<(u16, Vec<u8>)>,
}

impl Default for OptRecord {
    fn default() -> Self {
        Self {
            udp_payload_size: 512,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
            options: Vec::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
