//! dnscheck binary: CLI parsing, logger setup, and report rendering.
//!
//! All checking logic lives in the library; this wrapper turns arguments
//! into an executor run and the report into terminal output and an exit
//! code.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use dnscheck::config::{load_config, CheckEntry};
use dnscheck::executor::CheckExecutor;
use dnscheck::logging::init_logger;
use dnscheck::transport::ResolverTransport;
use dnscheck::ui;

#[derive(Parser)]
#[command(
    name = "dnscheck",
    version,
    about = "Verify that DNS hosts answer with the records you expect"
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every check defined in a YAML config file
    Run {
        /// Path to the check-list config file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run a single ad-hoc check without a config file
    Check {
        /// Record kind to query (a, aaaa, cname, mx, txt, ns)
        #[arg(short = 't', long)]
        record_type: String,
        /// Host to look up
        #[arg(short = 'H', long)]
        host: String,
        /// Expected records, comma-separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        expected: Vec<String>,
        /// DNS server to query (e.g. 1.1.1.1)
        #[arg(short, long)]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level).context("failed to initialize logger")?;

    let passed = match cli.command {
        Command::Run { config } => run_from_config(&config).await?,
        Command::Check {
            record_type,
            host,
            expected,
            server,
        } => run_single_check(record_type, host, expected, &server).await?,
    };

    if !passed {
        process::exit(1);
    }
    Ok(())
}

async fn run_from_config(path: &Path) -> Result<bool> {
    let config = load_config(path).context("failed to load config")?;
    log::info!("using DNS server: {}", config.dns_server);

    let transport = ResolverTransport::new(&config.dns_server)
        .with_context(|| format!("cannot use DNS server {}", config.dns_server))?;

    let report = CheckExecutor::new(config.checks, Arc::new(transport))
        .run()
        .await;
    ui::render_report(&report);
    Ok(report.passed())
}

async fn run_single_check(
    record_type: String,
    host: String,
    expected: Vec<String>,
    server: &str,
) -> Result<bool> {
    let transport =
        ResolverTransport::new(server).with_context(|| format!("cannot use DNS server {server}"))?;

    let checks = vec![CheckEntry {
        host,
        record_type,
        expected_values: expected,
    }];

    let report = CheckExecutor::new(checks, Arc::new(transport)).run().await;
    ui::render_report(&report);
    Ok(report.passed())
}
