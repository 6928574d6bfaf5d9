//! Error types for the remittance form library.
//!
//! Validation findings are not errors: they are returned as
//! [`ComplianceIssue`](crate::compliance::ComplianceIssue) values. The
//! variants here cover I/O, malformed input documents, drawing surface
//! failures and attempts to finalize a form that still has blocking issues.

use crate::compliance::ComplianceIssue;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations.
pub type RemitResult<T> = Result<T, RemitError>;

/// Error type for all library operations.
#[derive(Debug, Error)]
pub enum RemitError {
    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON document (record, template, risk report) could not be parsed
    #[error("Invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The drawing surface rejected an operation
    #[error("{}", surface_message(message, page))]
    Surface {
        message: String,
        page: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Finalization attempted while error-severity issues remain
    #[error("Form has {} blocking issue(s): {}", issues.len(), issue_keys(issues))]
    Blocked { issues: Vec<ComplianceIssue> },

    /// No template registered under the given name
    #[error("Unknown template '{name}'")]
    UnknownTemplate { name: String },

    /// Invalid configuration or parameters
    #[error("Invalid input for '{parameter}': {reason}")]
    InvalidInput { parameter: String, reason: String },
}

fn surface_message(message: &str, page: &Option<usize>) -> String {
    match page {
        Some(p) => format!("Surface error on page {}: {}", p, message),
        None => format!("Surface error: {}", message),
    }
}

fn issue_keys(issues: &[ComplianceIssue]) -> String {
    issues
        .iter()
        .map(|i| i.key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<io::Error> for RemitError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<stream>"),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::Severity;

    #[test]
    fn test_error_display() {
        let err = RemitError::UnknownTemplate {
            name: "Barclays".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown template 'Barclays'");
    }

    #[test]
    fn test_surface_error_with_page() {
        let err = RemitError::Surface {
            message: "font missing".to_string(),
            page: Some(2),
            source: None,
        };
        assert_eq!(err.to_string(), "Surface error on page 2: font missing");
    }

    #[test]
    fn test_blocked_lists_keys() {
        let err = RemitError::Blocked {
            issues: vec![
                ComplianceIssue::new("senderName", "Sender name is required", Severity::Error),
                ComplianceIssue::new("debitAc", "bad", Severity::Error),
            ],
        };
        let display = err.to_string();
        assert!(display.contains("2 blocking issue(s)"));
        assert!(display.contains("senderName, debitAc"));
    }
}
