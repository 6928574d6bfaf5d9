//! Remittance form preparation: canonicalization, compliance checks and
//! bank-specific PDF rendering.
//!
//! Extracted remittance data arrives as a loose key/value record. This
//! library cleans it up and turns it into a printable application form.
//!
//! # Features
//!
//! - **Canonicalization**: bank names and branch locations resolved through
//!   static alias tables (English, Chinese or mixed output)
//! - **Compliance checklist**: every rule evaluated, issues tagged `error` or `warn`
//! - **Layout selection**: HSBC, Bank of China, Standard Chartered or a generic form
//! - **Page rendering**: one engine with wrapping, shrink-to-fit and page breaks
//!   interprets every bank's layout plan
//! - **Templates**: non-destructive bank, scene and FX presets
//!
//! # Architecture
//!
//! - [`record`]: the schema-less [`RemittanceRecord`]
//! - [`domain`]: alias tables and canonicalizers
//! - [`compliance`]: field predicates and the checklist
//! - [`layout`]: layout detection and the per-bank plans
//! - [`render`]: the [`Surface`] trait, the engine and the PDF surface
//! - [`template`]: template tables and [`apply_template`]
//! - [`pipeline`]: [`RemittanceService`], which chains all of the above
//! - [`error`]: error handling
//!
//! # Quick Start
//!
//! ```no_run
//! use remitform::{RemittanceRecord, RemittanceService, RenderMode};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = RemittanceRecord::from_json_file(Path::new("extracted.json"))?;
//! let service = RemittanceService::default();
//! let form = service.prepare(&record);
//!
//! for issue in &form.report.issues {
//!     println!("{}: {}", issue.key, issue.message);
//! }
//! service.render_pdf(&form, Path::new("form.pdf"), RenderMode::Final)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! ## Canonicalize a Bank Name
//!
//! ```
//! use remitform::canonicalize_bank_name;
//!
//! assert_eq!(canonicalize_bank_name("中国银行北京分行"), "Bank of China, Beijing Branch");
//! assert_eq!(canonicalize_bank_name("icbc"), "Industrial and Commercial Bank of China");
//! ```
//!
//! ## Run the Checklist
//!
//! ```
//! use remitform::{build_compliance_checklist, RemittanceRecord, Severity};
//!
//! let record = RemittanceRecord::from_pairs([("debitAcCurrency", "US")]);
//! let issues = build_compliance_checklist(&record);
//! assert!(issues
//!     .iter()
//!     .any(|i| i.key == "debitAcCurrency" && i.severity == Severity::Error));
//! ```

// Public API
pub mod compliance;
pub mod config;
pub mod domain;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod risk;
pub mod template;

// Re-exports for convenient access
pub use compliance::{build_compliance_checklist, ComplianceIssue, ComplianceReport, Severity};
pub use config::{LocationOptions, Margins, RenderConfig};
pub use domain::{
    canonicalize_bank_name, canonicalize_bank_name_with, canonicalize_branch_location,
    LocationMode,
};
pub use error::{RemitError, RemitResult};
pub use layout::{detect_layout, BankLayout, LayoutPlan};
pub use pipeline::{PreparedForm, RemittanceService, RenderMode};
pub use record::RemittanceRecord;
pub use render::{PageRenderer, PdfSurface, RecordingSurface, RenderSummary, Surface};
pub use risk::{RiskAssessment, RiskLevel};
pub use template::{apply_template, ApplyOptions, Template};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_creation() {
        let service = RemittanceService::default();
        assert_eq!(service.location_mode(), LocationMode::En);
    }

    #[test]
    fn test_layout_detection_examples() {
        let record =
            RemittanceRecord::from_pairs([("bank", "The Hongkong and Shanghai Banking Corporation")]);
        assert_eq!(detect_layout(&record), BankLayout::Hsbc);
        assert_eq!(detect_layout(&RemittanceRecord::new()), BankLayout::Generic);
    }
}
