//! Transport boundary for DNS lookups.
//!
//! The rest of the crate only ever needs one operation: send a query for a
//! host and record kind, get back typed answers. [`Transport`] captures that
//! operation so the executor can run against the real resolver in production
//! and a scripted double in tests.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

use crate::record::{Answer, MxRecord, RecordKind};

/// Errors raised at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured DNS server is not a usable IP address.
    #[error("invalid DNS server address \"{0}\"")]
    InvalidServer(String),

    /// The underlying lookup failed (network, timeout, malformed response).
    #[error("{0}")]
    Lookup(#[from] ResolveError),
}

/// A single-operation DNS client: exchange one query, get the answers.
///
/// Implementations must be safe to share across concurrent host workers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Queries `host` for records of `kind` and returns the typed answers.
    ///
    /// Zero answers is a normal outcome (`Ok(vec![])`), distinct from a
    /// transport failure.
    async fn exchange(&self, host: &str, kind: RecordKind) -> Result<Vec<Answer>, TransportError>;
}

/// Production transport backed by hickory-resolver, pinned to one server.
#[derive(Debug)]
pub struct ResolverTransport {
    resolver: TokioAsyncResolver,
    server: String,
}

impl ResolverTransport {
    /// Builds a transport that sends every query to `server` (UDP port 53).
    ///
    /// Timeouts are kept short and search-domain appending is disabled so a
    /// slow or misconfigured server fails the affected host quickly instead
    /// of hanging the run.
    pub fn new(server: &str) -> Result<Self, TransportError> {
        let ip: IpAddr = server
            .parse()
            .map_err(|_| TransportError::InvalidServer(server.to_string()))?;

        let name_servers = NameServerConfigGroup::from_ips_clear(&[ip], 53, true);
        let config = ResolverConfig::from_parts(None, vec![], name_servers);

        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(5);
        opts.attempts = 2;
        opts.ndots = 0;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            server: server.to_string(),
        })
    }

    /// The server address this transport queries.
    pub fn server(&self) -> &str {
        &self.server
    }
}

#[async_trait]
impl Transport for ResolverTransport {
    async fn exchange(&self, host: &str, kind: RecordKind) -> Result<Vec<Answer>, TransportError> {
        match self.resolver.lookup(host, record_type(kind)).await {
            Ok(lookup) => Ok(to_answers(lookup.iter())),
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                // NXDomain / empty answer means "zero records", not a failure
                Ok(Vec::new())
            }
            Err(e) => {
                log::warn!("{kind} lookup failed for {host}: {e}");
                Err(e.into())
            }
        }
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::A => RecordType::A,
        RecordKind::Aaaa => RecordType::AAAA,
        RecordKind::Cname => RecordType::CNAME,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Txt => RecordType::TXT,
        RecordKind::Ns => RecordType::NS,
    }
}

fn to_answers<'a>(records: impl Iterator<Item = &'a RData>) -> Vec<Answer> {
    records
        .filter_map(|rdata| match rdata {
            RData::A(a) => Some(Answer::A(a.0)),
            RData::AAAA(aaaa) => Some(Answer::Aaaa(aaaa.0)),
            RData::CNAME(cname) => Some(Answer::Cname(cname.to_utf8())),
            RData::MX(mx) => Some(Answer::Mx(MxRecord {
                exchange: mx.exchange().to_utf8(),
                preference: mx.preference(),
            })),
            // TXT records can contain multiple character strings - join them
            RData::TXT(txt) => Some(Answer::Txt(
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect::<Vec<String>>()
                    .join(""),
            )),
            RData::NS(ns) => Some(Answer::Ns(ns.to_utf8())),
            _ => None,
        })
        .collect()
}
