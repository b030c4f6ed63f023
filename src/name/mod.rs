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

//! Implementation of data structures related to domain names.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

mod error;
mod label;
pub use error::Error;
pub use label::LabelBuf;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
const MAX_LABEL_LEN: usize = 63;

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A structure to represent a domain name.
///
/// A `Name` is a sequence of [`LabelBuf`]s, stored with the
/// most-specific label first. The root is the empty sequence. In
/// accordance with [RFC 1034 § 3.1], comparison of `Name`s is
/// ASCII-case-insensitive, while case is preserved in the internal
/// representation.
///
/// `Name`s are constructed through the [`FromStr`] implementation
/// (which accepts presentation format with or without the trailing
/// dot), through [`Name::from_labels`], or by deriving new names from
/// existing ones ([`Name::parent`], [`Name::suffix`],
/// [`Name::prepend`], [`Name::to_wildcard`]). Construction enforces the
/// DNS limits: each label is at most 63 octets, and the uncompressed
/// wire representation is at most 255 octets.
///
/// [RFC 1034 § 3.1]: https://datatracker.ietf.org/doc/html/rfc1034#section-3.1
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Name {
    labels: Vec<LabelBuf>,
}

impl Name {
    /// Returns the root domain name (the empty label sequence).
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Constructs a `Name` from a sequence of labels, most-specific
    /// label first. This fails if the resulting name would exceed the
    /// 255-octet wire-length limit.
    pub fn from_labels(labels: Vec<LabelBuf>) -> Result<Self, Error> {
        let name = Self { labels };
        if name.wire_len() > MAX_WIRE_LEN {
            Err(Error::NameTooLong)
        } else {
            Ok(name)
        }
    }

    /// Returns the labels of this `Name`, most-specific label first.
    pub fn labels(&self) -> &[LabelBuf] {
        &self.labels
    }

    /// Returns the number of labels in this `Name`. The root has zero
    /// labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether this `Name` is the root.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the length of the uncompressed on-the-wire
    /// representation of this `Name`.
    pub fn wire_len(&self) -> usize {
        1 + self
            .labels
            .iter()
            .map(|label| label.len() + 1)
            .sum::<usize>()
    }

    /// Returns the first (most-specific) label, or `None` for the root.
    pub fn first_label(&self) -> Option<&LabelBuf> {
        self.labels.first()
    }

    /// Returns the name formed by removing the first label, or `None`
    /// for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self.suffix(1))
        }
    }

    /// Returns the name formed by the labels from `skip` onward. When
    /// `skip` is at least the label count, this is the root.
    pub fn suffix(&self, skip: usize) -> Self {
        Self {
            labels: self.labels.iter().skip(skip).cloned().collect(),
        }
    }

    /// Returns the name formed by prepending `label` to this name.
    pub fn prepend(&self, label: LabelBuf) -> Result<Self, Error> {
        let mut labels = Vec::with_capacity(self.len() + 1);
        labels.push(label);
        labels.extend(self.labels.iter().cloned());
        Self::from_labels(labels)
    }

    /// Returns whether the first label of this `Name` is the asterisk
    /// label.
    pub fn is_wildcard(&self) -> bool {
        self.first_label().map_or(false, LabelBuf::is_asterisk)
    }

    /// Returns the wildcard name formed by replacing the first label of
    /// this `Name` with the asterisk label. For the root, this is the
    /// name whose sole label is the asterisk.
    pub fn to_wildcard(&self) -> Self {
        let mut labels = Vec::with_capacity(self.len().max(1));
        labels.push(LabelBuf::asterisk());
        labels.extend(self.labels.iter().skip(1).cloned());
        Self { labels }
    }

    /// Returns whether this `Name` equals `other` or is a subdomain of
    /// it.
    pub fn eq_or_subdomain_of(&self, other: &Name) -> bool {
        self == other || self.is_subdomain_of(other)
    }

    /// Returns whether this `Name` is a *proper* subdomain of `parent`.
    /// A name is never a subdomain of itself.
    pub fn is_subdomain_of(&self, parent: &Name) -> bool {
        self.len() > parent.len() && self.suffix(self.len() - parent.len()) == *parent
    }

    /// Returns whether this `Name` is matched by `pattern`.
    ///
    /// The match succeeds when `pattern` equals this name, or when
    /// `pattern` is a wildcard name whose non-wildcard suffix equals
    /// the corresponding suffix of this name. A pattern with more
    /// labels than this name never matches.
    pub fn matched_by(&self, pattern: &Name) -> bool {
        if self.len() < pattern.len() {
            false
        } else if pattern.is_wildcard() {
            self.suffix(self.len() - pattern.len() + 1) == pattern.suffix(1)
        } else {
            self == pattern
        }
    }

    /// Performs wildcard substitution: when this (owner) name matches
    /// `qname` as a pattern, the query name is returned in its place;
    /// otherwise the owner name is returned unchanged. Wildcard owner
    /// names are thus rewritten to the query name in synthesized
    /// answers.
    pub fn wildcard_substitution(&self, qname: &Name) -> Name {
        if qname.matched_by(self) {
            qname.clone()
        } else {
            self.clone()
        }
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `Name`s are totally ordered by comparing their label sequences
/// case-insensitively, starting from the most-specific label. This is a
/// deterministic order for response sorting, not the DNSSEC canonical
/// order.
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels.cmp(&other.labels)
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() || text == "." {
            return Ok(Self::root());
        }
        let text = text.strip_suffix('.').unwrap_or(text);
        let labels = text
            .split('.')
            .map(LabelBuf::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(labels)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            f.write_str(".")
        } else {
            for label in &self.labels {
                write!(f, "{}.", label)?;
            }
            Ok(())
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
