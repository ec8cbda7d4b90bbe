//! Terminal presentation: colored status lines and comparison tables.
//!
//! Rendering consumes the structured report produced by the executor; the
//! core never prints anything itself beyond log lines.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::compare::Comparison;
use crate::executor::{CheckOutcome, ExecutionReport};

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Record")]
    record: String,
}

fn push_section(rows: &mut Vec<ComparisonRow>, label: &str, values: &[String]) {
    if values.is_empty() {
        rows.push(ComparisonRow {
            result: label.to_string(),
            record: "none".to_string(),
        });
        return;
    }
    rows.push(ComparisonRow {
        result: label.to_string(),
        record: String::new(),
    });
    for value in values {
        rows.push(ComparisonRow {
            result: String::new(),
            record: value.clone(),
        });
    }
}

/// Renders the matched/unexpected/missing partition as a table.
pub fn comparison_table(comparison: &Comparison) -> String {
    let mut rows = Vec::new();
    push_section(&mut rows, "Matched", &comparison.matched);
    push_section(&mut rows, "Unexpected", &comparison.unexpected);
    push_section(&mut rows, "Missing", &comparison.missing);

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn print_status(status: colored::ColoredString, message: &str) {
    println!("{status} — {message}");
}

/// Prints every outcome of a run followed by a pass/fail summary.
pub fn render_report(report: &ExecutionReport) {
    for outcome in &report.outcomes {
        match outcome {
            CheckOutcome::QueryFailed { error, .. } => {
                print_status("BAD".red().bold(), error);
            }
            CheckOutcome::UnsupportedKind { host, token } => {
                print_status(
                    "BAD".red().bold(),
                    &format!("cannot check '{token}' records for host {host}"),
                );
                if let Some(failure) = outcome.failure() {
                    println!("      {failure}");
                }
            }
            CheckOutcome::Compared {
                host,
                kind,
                comparison,
            } => {
                println!("\nChecking '{kind}' records for {host}");
                println!("{}", comparison_table(comparison));
                if comparison.is_match() {
                    print_status("GOOD".green().bold(), "all records match the configuration");
                } else {
                    print_status("BAD".red().bold(), "records don't match the configuration");
                }
            }
        }
    }

    println!();
    if report.passed() {
        print_status(
            "GOOD".green().bold(),
            &format!("all {} check(s) passed", report.total()),
        );
    } else {
        print_status(
            "FAIL".red().bold(),
            &format!("{} of {} check(s) failed:", report.failed(), report.total()),
        );
        for failure in report.failures() {
            println!("  - {failure}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_record_in_its_section() {
        let comparison = Comparison {
            matched: vec!["10.0.0.1".into()],
            missing: vec!["10.0.0.3".into()],
            unexpected: vec!["10.0.0.2".into()],
        };
        let table = comparison_table(&comparison);
        assert!(table.contains("Matched"));
        assert!(table.contains("10.0.0.1"));
        assert!(table.contains("Unexpected"));
        assert!(table.contains("10.0.0.2"));
        assert!(table.contains("Missing"));
        assert!(table.contains("10.0.0.3"));
    }

    #[test]
    fn empty_sections_show_a_placeholder() {
        let table = comparison_table(&Comparison::default());
        assert_eq!(table.matches("none").count(), 3);
    }
}
