//! Custom assertions for checklists and rendered documents.
//!
//! Provides domain-specific assertions that make tests more readable
//! and provide better error messages.

use remitform::{ComplianceIssue, Severity};

/// Asserts that `issues` contains a finding for `key` with `severity`.
///
/// # Panics
/// Panics if no such issue exists.
pub fn assert_has_issue(issues: &[ComplianceIssue], key: &str, severity: Severity) {
    assert!(
        issues.iter().any(|i| i.key == key && i.severity == severity),
        "Expected a {} issue for '{}' but got: {:?}",
        severity,
        key,
        issue_summary(issues)
    );
}

/// Asserts that `issues` has no error for `key`.
///
/// # Panics
/// Panics if an error-severity issue for `key` is present.
pub fn assert_no_error(issues: &[ComplianceIssue], key: &str) {
    assert!(
        !issues
            .iter()
            .any(|i| i.key == key && i.severity == Severity::Error),
        "Expected no error for '{}' but got: {:?}",
        key,
        issue_summary(issues)
    );
}

/// Asserts the exact set of error keys, ignoring order.
pub fn assert_error_keys(issues: &[ComplianceIssue], expected: &[&str]) {
    let mut actual: Vec<&str> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .map(|i| i.key.as_str())
        .collect();
    actual.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(actual, expected, "error keys differ");
}

/// Asserts that `bytes` is a loadable PDF with `pages` pages.
pub fn assert_pdf_pages(bytes: &[u8], pages: usize) {
    assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
    let count = super::pdf_helpers::page_count(bytes)
        .unwrap_or_else(|e| panic!("Failed to load rendered PDF: {}", e));
    assert_eq!(count, pages, "unexpected page count");
}

fn issue_summary(issues: &[ComplianceIssue]) -> Vec<String> {
    issues.iter().map(ToString::to_string).collect()
}
