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

//! The error type for domain name construction and parsing.

use std::fmt;

/// An error that occurs when constructing or parsing a domain name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A label exceeds the limit of 63 octets.
    LabelTooLong,

    /// A label is empty (e.g. from consecutive dots in the presentation
    /// format).
    EmptyLabel,

    /// The name's uncompressed wire representation exceeds the limit of
    /// 255 octets.
    NameTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::LabelTooLong => f.write_str("label exceeds 63 octets"),
            Self::EmptyLabel => f.write_str("empty (null) label within a name"),
            Self::NameTooLong => f.write_str("name exceeds 255 octets"),
        }
    }
}

impl std::error::Error for Error {}
