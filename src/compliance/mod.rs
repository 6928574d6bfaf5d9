//! Compliance checklist for remittance records.
//!
//! Every rule is evaluated independently and every violation is reported;
//! evaluation never stops at the first failure. `Error` findings block
//! finalization, `Warn` findings are advisory.

pub mod checks;

use crate::record::{fields, RemittanceRecord};
use checks::{
    is_account_number, is_currency_code, is_date_like, is_non_empty, is_phone_like,
    is_plausible_bank_name,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks confirm/download
    Error,
    /// Advisory only
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warn => f.write_str("warn"),
        }
    }
}

/// A single validation finding against one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Record field the finding refers to
    pub key: String,
    pub message: String,
    pub severity: Severity,
}

impl ComplianceIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            severity,
        }
    }

    fn error(key: &str, message: &str) -> Self {
        Self::new(key, message, Severity::Error)
    }

    fn warn(key: &str, message: &str) -> Self {
        Self::new(key, message, Severity::Warn)
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ComplianceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.key, self.message)
    }
}

/// Evaluates the full checklist against `record`.
///
/// Pure and deterministic: the same record always yields the same issues,
/// in rule declaration order.
pub fn build_compliance_checklist(record: &RemittanceRecord) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();
    let value = |key: &'static str| record.get(key);

    // applicant, date, phone
    if !is_non_empty(value(fields::SENDER_NAME)) {
        issues.push(ComplianceIssue::error(
            fields::SENDER_NAME,
            "Sender name is required",
        ));
    }
    if is_non_empty(value(fields::DATE)) && !is_date_like(value(fields::DATE)) {
        issues.push(ComplianceIssue::warn(
            fields::DATE,
            "Date format appears invalid. Use YYYY-MM-DD",
        ));
    }
    if is_non_empty(value(fields::CONTACT_NUMBER)) && !is_phone_like(value(fields::CONTACT_NUMBER))
    {
        issues.push(ComplianceIssue::warn(
            fields::CONTACT_NUMBER,
            "Contact number may be invalid",
        ));
    }

    // debit account
    if !is_currency_code(value(fields::DEBIT_AC_CURRENCY)) {
        issues.push(ComplianceIssue::error(
            fields::DEBIT_AC_CURRENCY,
            "Debit A/C currency must be a 3-letter code (e.g., USD)",
        ));
    }
    if !is_account_number(value(fields::DEBIT_AC)) {
        issues.push(ComplianceIssue::error(
            fields::DEBIT_AC,
            "Debit A/C account number appears invalid",
        ));
    }

    // charges account is optional as a pair, but once touched both halves must be valid
    let has_charges = is_non_empty(value(fields::CHARGES_DEBIT_AC_CURRENCY))
        || is_non_empty(value(fields::CHARGES_DEBIT_AC));
    if has_charges {
        if !is_currency_code(value(fields::CHARGES_DEBIT_AC_CURRENCY)) {
            issues.push(ComplianceIssue::error(
                fields::CHARGES_DEBIT_AC_CURRENCY,
                "Charges Debit A/C currency must be a 3-letter code",
            ));
        }
        if !is_account_number(value(fields::CHARGES_DEBIT_AC)) {
            issues.push(ComplianceIssue::error(
                fields::CHARGES_DEBIT_AC,
                "Charges Debit A/C account number appears invalid",
            ));
        }
    }

    // banks and beneficiary
    if is_non_empty(value(fields::INTERMEDIARY_BANK))
        && !is_plausible_bank_name(value(fields::INTERMEDIARY_BANK))
    {
        issues.push(ComplianceIssue::warn(
            fields::INTERMEDIARY_BANK,
            "Intermediary bank name contains extraneous info or is invalid",
        ));
    }
    if !is_plausible_bank_name(value(fields::BENEFICIARY_BANK)) {
        issues.push(ComplianceIssue::error(
            fields::BENEFICIARY_BANK,
            "Beneficiary bank name is missing or invalid",
        ));
    }
    if !is_non_empty(value(fields::BENEFICIARY_NAME)) {
        issues.push(ComplianceIssue::error(
            fields::BENEFICIARY_NAME,
            "Beneficiary name is required",
        ));
    }

    issues
}

/// A checklist result grouped for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub issues: Vec<ComplianceIssue>,
}

impl ComplianceReport {
    /// Runs the checklist and wraps the result.
    pub fn evaluate(record: &RemittanceRecord) -> Self {
        Self {
            issues: build_compliance_checklist(record),
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ComplianceIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ComplianceIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warn)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True when finalization must be refused.
    pub fn has_blocking_errors(&self) -> bool {
        self.issues.iter().any(ComplianceIssue::is_blocking)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues for one field.
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ComplianceIssue> {
        self.issues.iter().filter(move |i| i.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> RemittanceRecord {
        RemittanceRecord::from_pairs([
            ("senderName", "Acme Trading Ltd"),
            ("debitAcCurrency", "USD"),
            ("debitAc", "012345678901"),
            ("beneficiaryBank", "Bank of China"),
            ("beneficiaryName", "Li Wei"),
        ])
    }

    #[test]
    fn test_valid_record_is_clean() {
        assert!(build_compliance_checklist(&valid_record()).is_empty());
    }

    #[test]
    fn test_all_violations_reported() {
        let record = RemittanceRecord::from_pairs([
            ("senderName", ""),
            ("debitAcCurrency", "US"),
            ("debitAc", "12"),
            ("beneficiaryBank", "ABC Bank"),
            ("beneficiaryName", "John Doe"),
        ]);
        let report = ComplianceReport::evaluate(&record);
        let keys: Vec<&str> = report.errors().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["senderName", "debitAcCurrency", "debitAc"]);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_charges_pair_only_checked_when_touched() {
        let mut record = valid_record();
        assert!(build_compliance_checklist(&record).is_empty());

        record.set("chargesDebitAc", "987654321");
        let issues = build_compliance_checklist(&record);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "chargesDebitAcCurrency");
        assert!(issues[0].is_blocking());
    }

    #[test]
    fn test_optional_fields_warn_only_when_present() {
        let mut record = valid_record();
        record.set("date", "next tuesday");
        record.set("contactNumber", "123");
        record.set("intermediaryBank", "Citi SWIFT CITIUS33");
        let report = ComplianceReport::evaluate(&record);
        assert!(!report.has_blocking_errors());
        let keys: Vec<&str> = report.warnings().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["date", "contactNumber", "intermediaryBank"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = ComplianceIssue::new("debitAc", "bad", Severity::Error);
        assert_eq!(issue.to_string(), "[error] debitAc: bad");
    }
}
