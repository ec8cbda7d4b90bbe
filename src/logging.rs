//! Logger initialization with colored output.

use std::io::Write;

use colored::Colorize;
use log::{LevelFilter, SetLoggerError};

/// Initializes `env_logger` with a compact colored format.
///
/// `RUST_LOG` is read first so per-module filtering keeps working; the
/// `level` argument from the CLI takes precedence for the overall filter.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    // hickory logs malformed-response warnings it already handles itself
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);

    builder.format(|buf, record| {
        let level = record.level();
        let colored_level = match level {
            log::Level::Error => level.to_string().red(),
            log::Level::Warn => level.to_string().yellow(),
            log::Level::Info => level.to_string().green(),
            log::Level::Debug => level.to_string().blue(),
            log::Level::Trace => level.to_string().purple(),
        };
        writeln!(buf, "[{}] {}", colored_level, record.args())
    });

    builder.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_enough_for_tests() {
        // env_logger can only be installed once per process; a second call
        // must fail cleanly rather than panic.
        let first = init_logger(LevelFilter::Info);
        let second = init_logger(LevelFilter::Debug);
        assert!(first.is_ok() || second.is_err());
    }
}
