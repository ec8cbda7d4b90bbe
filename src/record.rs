//! Record kinds, raw answers, and the per-host record bag.
//!
//! `RecordKind` is the closed set of record categories the checker knows how
//! to verify. `Answer` is the typed payload a transport hands back for a
//! single record, and `RecordBag` collects one query round's worth of answers
//! for a host across all kinds.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use thiserror::Error;

/// DNS record categories supported by the checker.
///
/// This is a closed set: any other token fails to parse with
/// [`UnsupportedRecordKind`] rather than falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
    /// Canonical name record
    Cname,
    /// Mail exchanger record
    Mx,
    /// Text record
    Txt,
    /// Nameserver record
    Ns,
}

impl RecordKind {
    /// All supported kinds, in the order a host query round issues them.
    pub const ALL: [RecordKind; 6] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Cname,
        RecordKind::Mx,
        RecordKind::Txt,
        RecordKind::Ns,
    ];

    /// The lowercase token used in config files and CLI flags.
    pub fn token(&self) -> &'static str {
        match self {
            RecordKind::A => "a",
            RecordKind::Aaaa => "aaaa",
            RecordKind::Cname => "cname",
            RecordKind::Mx => "mx",
            RecordKind::Txt => "txt",
            RecordKind::Ns => "ns",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error returned when a record-kind token is not one of the supported six.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported record kind \"{token}\", supported kinds: a, aaaa, cname, mx, txt, ns")]
pub struct UnsupportedRecordKind {
    /// The token that failed to parse.
    pub token: String,
}

impl FromStr for RecordKind {
    type Err = UnsupportedRecordKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(RecordKind::A),
            "aaaa" => Ok(RecordKind::Aaaa),
            "cname" => Ok(RecordKind::Cname),
            "mx" => Ok(RecordKind::Mx),
            "txt" => Ok(RecordKind::Txt),
            "ns" => Ok(RecordKind::Ns),
            _ => Err(UnsupportedRecordKind {
                token: s.to_string(),
            }),
        }
    }
}

/// A mail exchanger entry: target host plus preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    /// Mail exchange hostname.
    pub exchange: String,
    /// Preference value (lower wins).
    pub preference: u16,
}

/// One typed answer record as returned by a transport.
///
/// A closed enum rather than raw wire data so scripted test transports can be
/// built without any DNS message machinery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A record payload.
    A(Ipv4Addr),
    /// AAAA record payload.
    Aaaa(Ipv6Addr),
    /// CNAME target.
    Cname(String),
    /// MX entry.
    Mx(MxRecord),
    /// TXT contents (character strings already joined).
    Txt(String),
    /// NS target.
    Ns(String),
}

impl Answer {
    /// The record kind this answer belongs to.
    pub fn kind(&self) -> RecordKind {
        match self {
            Answer::A(_) => RecordKind::A,
            Answer::Aaaa(_) => RecordKind::Aaaa,
            Answer::Cname(_) => RecordKind::Cname,
            Answer::Mx(_) => RecordKind::Mx,
            Answer::Txt(_) => RecordKind::Txt,
            Answer::Ns(_) => RecordKind::Ns,
        }
    }
}

/// Everything one query round returned for a single host.
///
/// Written once by the worker that queried the host, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBag {
    /// A record values.
    pub a: Vec<String>,
    /// AAAA record values.
    pub aaaa: Vec<String>,
    /// CNAME targets.
    pub cname: Vec<String>,
    /// MX entries.
    pub mx: Vec<MxRecord>,
    /// TXT values.
    pub txt: Vec<String>,
    /// NS targets.
    pub ns: Vec<String>,
}

impl RecordBag {
    /// Folds the answers from one lookup into the bag.
    ///
    /// Only answers matching `kind` are kept; records of other types that
    /// show up in the same response are dropped.
    pub fn absorb(&mut self, kind: RecordKind, answers: Vec<Answer>) {
        for answer in answers {
            if answer.kind() != kind {
                continue;
            }
            match answer {
                Answer::A(addr) => self.a.push(addr.to_string()),
                Answer::Aaaa(addr) => self.aaaa.push(addr.to_string()),
                Answer::Cname(target) => self.cname.push(target),
                Answer::Mx(mx) => self.mx.push(mx),
                Answer::Txt(text) => self.txt.push(text),
                Answer::Ns(target) => self.ns.push(target),
            }
        }
    }

    /// Returns the comparable string values stored for `kind`.
    ///
    /// MX entries are flattened to `"<exchange> <preference>"` in received
    /// order. An empty vector means "zero records found" and is a normal
    /// outcome, not an error.
    pub fn values_for(&self, kind: RecordKind) -> Vec<String> {
        match kind {
            RecordKind::A => self.a.clone(),
            RecordKind::Aaaa => self.aaaa.clone(),
            RecordKind::Cname => self.cname.clone(),
            RecordKind::Mx => self
                .mx
                .iter()
                .map(|mx| format!("{} {}", mx.exchange, mx.preference))
                .collect(),
            RecordKind::Txt => self.txt.clone(),
            RecordKind::Ns => self.ns.clone(),
        }
    }
}
