//! Shared test helpers: a scripted transport double.

use std::collections::HashMap;

use async_trait::async_trait;
use hickory_resolver::error::ResolveError;

use dnscheck::record::{Answer, RecordKind};
use dnscheck::transport::{Transport, TransportError};

/// A transport that replays pre-programmed answers.
///
/// Hosts without a script entry return zero records for every kind; hosts
/// registered via [`fail_host`](Self::fail_host) error on every exchange.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: HashMap<(String, RecordKind), Vec<Answer>>,
    failing_hosts: Vec<String>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, host: &str, kind: RecordKind, answers: Vec<Answer>) -> Self {
        self.answers.insert((host.to_string(), kind), answers);
        self
    }

    pub fn fail_host(mut self, host: &str) -> Self {
        self.failing_hosts.push(host.to_string());
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn exchange(&self, host: &str, kind: RecordKind) -> Result<Vec<Answer>, TransportError> {
        if self.failing_hosts.iter().any(|h| h == host) {
            return Err(TransportError::Lookup(ResolveError::from(
                "connection refused",
            )));
        }
        Ok(self
            .answers
            .get(&(host.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }
}
