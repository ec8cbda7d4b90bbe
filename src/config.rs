//! YAML check-list configuration: loading and validation.
//!
//! A config file names the DNS server to query and the list of checks to run:
//!
//! ```yaml
//! dnsServer: "10.0.0.53"
//! checks:
//!   - host: example.com
//!     recordType: a
//!     expectedValues:
//!       - "10.0.0.100"
//! ```

use std::path::Path;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

/// Server used when the config leaves `dnsServer` unset.
pub const DEFAULT_DNS_SERVER: &str = "1.1.1.1";

/// One declared check: a host, a record-kind token, and the expected values.
///
/// The record kind stays a raw token here; it is resolved per entry during
/// execution so that one bad token fails only its own check instead of
/// aborting the whole run at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckEntry {
    /// Host to look up.
    pub host: String,
    /// Record-kind token (a, aaaa, cname, mx, txt, ns).
    #[serde(rename = "recordType")]
    pub record_type: String,
    /// Values the lookup is expected to return.
    #[serde(rename = "expectedValues")]
    pub expected_values: Vec<String>,
}

/// The full check-list configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// DNS server address to send every query to.
    #[serde(rename = "dnsServer", default)]
    pub dns_server: String,
    /// The checks to run.
    #[serde(default)]
    pub checks: Vec<CheckEntry>,
}

/// Errors raised while loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for the expected shape.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The config defines no checks at all.
    #[error("config defines no checks")]
    NoChecks,

    /// A check entry has an empty required field.
    #[error("check #{index}: {field} must not be empty")]
    EmptyField {
        /// One-based position of the offending check.
        index: usize,
        /// Name of the empty field.
        field: &'static str,
    },
}

/// Loads, validates, and defaults a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut config: Config =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    config.validate()?;

    if config.dns_server.is_empty() {
        warn!("DNS server not set, using Cloudflare as default ({DEFAULT_DNS_SERVER})");
        config.dns_server = DEFAULT_DNS_SERVER.to_string();
    }

    Ok(config)
}

impl Config {
    /// Checks the structural requirements the executor relies on: at least
    /// one check, and no empty required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checks.is_empty() {
            return Err(ConfigError::NoChecks);
        }
        for (i, check) in self.checks.iter().enumerate() {
            let index = i + 1;
            if check.host.is_empty() {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "host",
                });
            }
            if check.record_type.is_empty() {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "recordType",
                });
            }
            if check.expected_values.is_empty()
                || check.expected_values.iter().any(String::is_empty)
            {
                return Err(ConfigError::EmptyField {
                    index,
                    field: "expectedValues",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_a_valid_config() {
        let file = write_config(
            r#"
dnsServer: "10.0.0.53"
checks:
  - host: example.com
    recordType: a
    expectedValues:
      - "10.0.0.100"
  - host: example.com
    recordType: mx
    expectedValues:
      - "mail.example.com. 10"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.dns_server, "10.0.0.53");
        assert_eq!(config.checks.len(), 2);
        assert_eq!(config.checks[0].record_type, "a");
        assert_eq!(
            config.checks[1].expected_values,
            vec!["mail.example.com. 10"]
        );
    }

    #[test]
    fn missing_server_falls_back_to_default() {
        let file = write_config(
            r#"
checks:
  - host: example.com
    recordType: a
    expectedValues: ["10.0.0.1"]
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.dns_server, DEFAULT_DNS_SERVER);
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = load_config(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_config("checks: [not: valid: yaml");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_check_list_is_rejected() {
        let file = write_config("dnsServer: \"1.1.1.1\"\nchecks: []\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoChecks));
    }

    #[test]
    fn empty_host_is_rejected() {
        let file = write_config(
            r#"
checks:
  - host: ""
    recordType: a
    expectedValues: ["10.0.0.1"]
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyField {
                index: 1,
                field: "host"
            }
        ));
    }

    #[test]
    fn empty_expected_values_are_rejected() {
        let file = write_config(
            r#"
checks:
  - host: example.com
    recordType: txt
    expectedValues: []
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyField {
                field: "expectedValues",
                ..
            }
        ));
    }

    #[test]
    fn unsupported_record_kind_token_passes_validation() {
        // Kind tokens are resolved per entry at execution time, so "srv"
        // must load fine and fail later as a single check failure.
        let file = write_config(
            r#"
checks:
  - host: example.com
    recordType: srv
    expectedValues: ["whatever"]
"#,
        );
        assert!(load_config(file.path()).is_ok());
    }
}
