//! Concurrent check execution.
//!
//! The executor groups declared checks by host, fans out one query worker
//! per distinct host on the shared transport, joins them all, and then walks
//! the checks sequentially, comparing each host's answers against the
//! expected values. Every failure is collected; the run never stops at the
//! first one.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, error, info};
use tokio::task::JoinSet;

use crate::compare::{compare, Comparison};
use crate::config::CheckEntry;
use crate::query::{query_host, QueryFailure};
use crate::record::{RecordBag, RecordKind, UnsupportedRecordKind};
use crate::transport::Transport;

/// The result of one unit of work in a run.
///
/// A host whose query round failed produces exactly one `QueryFailed`
/// outcome, and none of its checks are evaluated. Otherwise every check
/// produces either a `Compared` outcome (pass and fail alike) or an
/// `UnsupportedKind` outcome for a bad record-kind token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The host's query round failed; its checks were skipped.
    QueryFailed {
        /// Host that could not be queried.
        host: String,
        /// Rendered failure, already in reporting form.
        error: String,
    },
    /// A check declared a record-kind token outside the supported set.
    UnsupportedKind {
        /// Host the check was declared for.
        host: String,
        /// The offending token.
        token: String,
    },
    /// A check was evaluated against the host's answers.
    Compared {
        /// Host the check ran against.
        host: String,
        /// Record kind that was checked.
        kind: RecordKind,
        /// The three-way value partition.
        comparison: Comparison,
    },
}

impl CheckOutcome {
    /// The failure description for this outcome, or `None` if it passed.
    pub fn failure(&self) -> Option<String> {
        match self {
            CheckOutcome::QueryFailed { error, .. } => Some(error.clone()),
            CheckOutcome::UnsupportedKind { token, .. } => Some(
                UnsupportedRecordKind {
                    token: token.clone(),
                }
                .to_string(),
            ),
            CheckOutcome::Compared {
                host, comparison, ..
            } => {
                if comparison.is_match() {
                    None
                } else {
                    Some(format!("DNS check failed for host {host}: mismatched records"))
                }
            }
        }
    }
}

/// Aggregate result of a run: every outcome, in deterministic order.
///
/// Hosts are visited in lexical order and each host's checks in declared
/// order, so two runs over the same config and answers produce identical
/// reports regardless of how the query phase interleaved.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// One entry per unit of work, in reporting order.
    pub outcomes: Vec<CheckOutcome>,
}

impl ExecutionReport {
    /// The ordered failure descriptions for every failing outcome.
    pub fn failures(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(CheckOutcome::failure)
            .collect()
    }

    /// True when no outcome failed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.failure().is_none())
    }

    /// Total number of outcomes recorded.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of failing outcomes.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.failure().is_some()).count()
    }
}

/// Runs a set of declared checks against one shared transport.
pub struct CheckExecutor {
    entries: Vec<CheckEntry>,
    transport: Arc<dyn Transport>,
}

impl CheckExecutor {
    /// Creates an executor over already-validated check entries.
    pub fn new(entries: Vec<CheckEntry>, transport: Arc<dyn Transport>) -> Self {
        Self { entries, transport }
    }

    /// Executes every check and returns the combined report.
    ///
    /// Phase one queries all distinct hosts concurrently; phase two runs
    /// sequentially once every worker has finished. Transport failures and
    /// bad kind tokens become report entries, never early returns.
    pub async fn run(&self) -> ExecutionReport {
        let grouped = group_by_host(&self.entries);
        info!("querying {} distinct host(s)", grouped.len());

        let host_outcomes = self.query_phase(grouped.keys().cloned()).await;

        let mut report = ExecutionReport::default();
        for (host, checks) in &grouped {
            self.evaluate_host(host, checks, &host_outcomes, &mut report);
        }
        report
    }

    /// Fans out one worker per host and collects each `(host, outcome)`
    /// message as workers finish. The executor owns the map exclusively;
    /// workers never share mutable state.
    async fn query_phase(
        &self,
        hosts: impl Iterator<Item = String>,
    ) -> HashMap<String, Result<RecordBag, QueryFailure>> {
        let mut workers = JoinSet::new();
        for host in hosts {
            let transport = Arc::clone(&self.transport);
            workers.spawn(async move {
                debug!("querying DNS records for {host}");
                let outcome = query_host(&host, transport.as_ref()).await;
                (host, outcome)
            });
        }

        let mut results = HashMap::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((host, outcome)) => {
                    results.insert(host, outcome);
                }
                Err(e) => error!("host query worker terminated abnormally: {e}"),
            }
        }
        results
    }

    fn evaluate_host(
        &self,
        host: &str,
        checks: &[&CheckEntry],
        host_outcomes: &HashMap<String, Result<RecordBag, QueryFailure>>,
        report: &mut ExecutionReport,
    ) {
        info!("running checks for host: {host}");

        let bag = match host_outcomes.get(host) {
            Some(Ok(bag)) => bag,
            Some(Err(failure)) => {
                // One failure per host, not per check
                report.outcomes.push(CheckOutcome::QueryFailed {
                    host: host.to_string(),
                    error: failure.to_string(),
                });
                return;
            }
            None => {
                report.outcomes.push(CheckOutcome::QueryFailed {
                    host: host.to_string(),
                    error: format!("failed to query DNS for host {host}: worker never reported"),
                });
                return;
            }
        };

        for check in checks {
            let kind = match check.record_type.parse::<RecordKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    debug!("skipping check for {host}: {e}");
                    report.outcomes.push(CheckOutcome::UnsupportedKind {
                        host: host.to_string(),
                        token: check.record_type.clone(),
                    });
                    continue;
                }
            };

            let actual = bag.values_for(kind);
            if actual.is_empty() {
                debug!("no {kind} records found for host {host}");
            }
            report.outcomes.push(CheckOutcome::Compared {
                host: host.to_string(),
                kind,
                comparison: compare(&check.expected_values, &actual),
            });
        }
    }
}

/// Partitions checks into per-host lists.
///
/// `BTreeMap` keeps host iteration lexical and therefore deterministic;
/// each host's checks stay in declared order.
fn group_by_host(entries: &[CheckEntry]) -> BTreeMap<String, Vec<&CheckEntry>> {
    let mut grouped: BTreeMap<String, Vec<&CheckEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.host.clone()).or_default().push(entry);
    }
    grouped
}
