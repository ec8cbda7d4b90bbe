//! Host query worker: one round of lookups across all record kinds.

use thiserror::Error;

use crate::record::{RecordBag, RecordKind};
use crate::transport::{Transport, TransportError};

/// A host's query round failed at the transport level.
///
/// Partial results are discarded: a half-filled bag would be
/// indistinguishable from "no records found" for the kinds that never ran.
#[derive(Debug, Error)]
#[error("failed to query DNS for host {host}: {source}")]
pub struct QueryFailure {
    /// The host whose round failed.
    pub host: String,
    /// The transport error that ended the round.
    #[source]
    pub source: TransportError,
}

/// Queries `host` for every supported record kind and collects the answers.
///
/// The six lookups are independent of each other, but the round only
/// succeeds once all of them have returned; the first transport error fails
/// the whole host.
pub async fn query_host(host: &str, transport: &dyn Transport) -> Result<RecordBag, QueryFailure> {
    let mut bag = RecordBag::default();
    for kind in RecordKind::ALL {
        let answers = transport
            .exchange(host, kind)
            .await
            .map_err(|source| QueryFailure {
                host: host.to_string(),
                source,
            })?;
        bag.absorb(kind, answers);
    }
    Ok(bag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Answer;
    use async_trait::async_trait;
    use hickory_resolver::error::ResolveError;

    /// Answers A queries, errors on TXT, and returns nothing for the rest.
    struct FlakyTransport;

    #[async_trait]
    impl Transport for FlakyTransport {
        async fn exchange(
            &self,
            _host: &str,
            kind: RecordKind,
        ) -> Result<Vec<Answer>, TransportError> {
            match kind {
                RecordKind::A => Ok(vec![Answer::A("10.0.0.1".parse().unwrap())]),
                RecordKind::Txt => Err(TransportError::Lookup(ResolveError::from(
                    "connection refused",
                ))),
                _ => Ok(Vec::new()),
            }
        }
    }

    struct QuietTransport;

    #[async_trait]
    impl Transport for QuietTransport {
        async fn exchange(
            &self,
            _host: &str,
            kind: RecordKind,
        ) -> Result<Vec<Answer>, TransportError> {
            match kind {
                RecordKind::Ns => Ok(vec![
                    Answer::Ns("ns1.example.com.".into()),
                    // Foreign record type in the answer section gets dropped
                    Answer::A("192.0.2.1".parse().unwrap()),
                ]),
                _ => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn one_failing_lookup_fails_the_whole_host() {
        let err = query_host("example.com", &FlakyTransport).await.unwrap_err();
        assert_eq!(err.host, "example.com");
        assert!(err
            .to_string()
            .starts_with("failed to query DNS for host example.com:"));
    }

    #[tokio::test]
    async fn successful_round_folds_answers_by_kind() {
        let bag = query_host("example.com", &QuietTransport).await.unwrap();
        assert_eq!(bag.values_for(RecordKind::Ns), vec!["ns1.example.com."]);
        assert!(bag.values_for(RecordKind::A).is_empty());
    }
}
