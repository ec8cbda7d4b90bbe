//! Set-difference comparison of expected versus actual record values.

use std::collections::HashSet;

/// The three-way partition produced by [`compare`].
///
/// Values are listed in the iteration order of the input they came from
/// (actual for matched/unexpected, expected for missing) with duplicates
/// collapsed, so the lists are stable for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Values present in both expected and actual.
    pub matched: Vec<String>,
    /// Values expected but not returned.
    pub missing: Vec<String>,
    /// Values returned but not expected.
    pub unexpected: Vec<String>,
}

impl Comparison {
    /// True when nothing is missing and nothing unexpected showed up.
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compares expected and actual record values with set semantics.
///
/// Matching is exact, case-sensitive string equality. Duplicate values
/// within either input count once; order does not affect the verdict.
pub fn compare(expected: &[String], actual: &[String]) -> Comparison {
    let expected_set: HashSet<&str> = expected.iter().map(String::as_str).collect();
    let actual_set: HashSet<&str> = actual.iter().map(String::as_str).collect();

    let mut comparison = Comparison::default();

    let mut seen = HashSet::new();
    for value in actual {
        if !seen.insert(value.as_str()) {
            continue;
        }
        if expected_set.contains(value.as_str()) {
            comparison.matched.push(value.clone());
        } else {
            comparison.unexpected.push(value.clone());
        }
    }

    let mut seen = HashSet::new();
    for value in expected {
        if !seen.insert(value.as_str()) {
            continue;
        }
        if !actual_set.contains(value.as_str()) {
            comparison.missing.push(value.clone());
        }
    }

    comparison
}
