//! Record fixtures and builders.
//!
//! Provides a builder for remittance records and helpers that write them
//! to disk for CLI tests.

use anyhow::Result;
use remitform::RemittanceRecord;
use std::path::{Path, PathBuf};

/// Builder for test records.
///
/// # Example
///
/// ```no_run
/// let record = RecordBuilder::complete()
///     .with("beneficiaryBank", "中国银行北京分行")
///     .without("senderName")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: RemittanceRecord,
}

impl RecordBuilder {
    /// Starts from an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a record that passes every error-level rule.
    pub fn complete() -> Self {
        Self {
            record: complete_record(),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.record.set(key, value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.record.remove(key);
        self
    }

    pub fn build(self) -> RemittanceRecord {
        self.record
    }
}

/// A record with no error-level issues.
pub fn complete_record() -> RemittanceRecord {
    RemittanceRecord::from_pairs([
        ("senderName", "Acme Trading Ltd"),
        ("debitAcCurrency", "USD"),
        ("debitAc", "012345678901"),
        ("beneficiaryBank", "Bank of China"),
        ("beneficiaryName", "Li Wei"),
        ("date", "2024-03-18"),
        ("contactNumber", "+852 2345 6789"),
        ("amount", "12,500.00"),
        ("remitCurrency", "USD"),
    ])
}

/// The end-to-end scenario: three errors, no warnings.
pub fn scenario_record() -> RemittanceRecord {
    RemittanceRecord::from_pairs([
        ("senderName", ""),
        ("debitAcCurrency", "US"),
        ("debitAc", "12"),
        ("beneficiaryBank", "ABC Bank"),
        ("beneficiaryName", "John Doe"),
    ])
}

/// Serializes `record` to `dir/name` and returns the path.
pub fn write_record(dir: &Path, name: &str, record: &RemittanceRecord) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(record)?)?;
    Ok(path)
}

/// Writes raw JSON text to `dir/name`.
pub fn write_json(dir: &Path, name: &str, json: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, json)?;
    Ok(path)
}

/// `count` newline-separated lines, so the wrapped line count is exact.
pub fn multiline_value(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Line {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}
