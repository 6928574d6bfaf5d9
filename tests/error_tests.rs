//! Error construction and display.

use remitform::{RemitError, RemittanceRecord, RiskAssessment};
use std::error::Error;
use std::path::Path;

#[test]
fn test_missing_record_file_is_io_error() {
    let err = RemittanceRecord::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
    match &err {
        RemitError::Io { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(err.to_string().contains("here.json"));
    assert!(err.source().is_some());
}

#[test]
fn test_malformed_record_is_json_error() {
    let err = RemittanceRecord::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, RemitError::Json { .. }));
    assert!(err.to_string().contains("remittance record"));
}

#[test]
fn test_record_accepts_nulls_and_scalars() {
    let record = RemittanceRecord::from_json_str(
        r#"{"senderName": "Acme", "amount": 1250.5, "isResident": true, "iban": null}"#,
    )
    .unwrap();
    assert_eq!(record.get("amount"), Some("1250.5"));
    assert_eq!(record.get("isResident"), Some("true"));
    assert_eq!(record.get("iban"), None);
}

#[test]
fn test_surface_error_display() {
    let err = RemitError::Surface {
        message: "page limit of 1 reached".to_string(),
        page: Some(2),
        source: None,
    };
    assert_eq!(
        err.to_string(),
        "Surface error on page 2: page limit of 1 reached"
    );
}

#[test]
fn test_unknown_template_display() {
    let err = remitform::template::find_template("payroll").unwrap_err();
    assert_eq!(err.to_string(), "Unknown template 'payroll'");
}

#[test]
fn test_bad_risk_payload() {
    assert!(RiskAssessment::from_json_str("{}").is_err());
}
