//! dnscheck library: verify DNS hosts against a declarative check list.
//!
//! Checks declare a host, a record kind, and the values a lookup is expected
//! to return. The executor queries every distinct host concurrently over a
//! shared transport, compares the answers against the expectations, and
//! reports every failure after all checks have run instead of stopping at
//! the first one.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dnscheck::{CheckEntry, CheckExecutor, ResolverTransport};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checks = vec![CheckEntry {
//!     host: "example.com".into(),
//!     record_type: "a".into(),
//!     expected_values: vec!["10.0.0.100".into()],
//! }];
//!
//! let transport = Arc::new(ResolverTransport::new("1.1.1.1")?);
//! let report = CheckExecutor::new(checks, transport).run().await;
//! assert!(report.passed());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod compare;
pub mod config;
pub mod executor;
pub mod logging;
pub mod query;
pub mod record;
pub mod transport;
pub mod ui;

pub use compare::{compare, Comparison};
pub use config::{load_config, CheckEntry, Config, ConfigError};
pub use executor::{CheckExecutor, CheckOutcome, ExecutionReport};
pub use query::{query_host, QueryFailure};
pub use record::{Answer, MxRecord, RecordBag, RecordKind, UnsupportedRecordKind};
pub use transport::{ResolverTransport, Transport, TransportError};
