//! End-to-end form preparation.
//!
//! [`RemittanceService`] runs the steps a record goes through before it is
//! printed: template merge, bank and location canonicalization, compliance
//! check, layout selection, and finally rendering onto a surface.

use crate::compliance::ComplianceReport;
use crate::config::{LocationOptions, RenderConfig};
use crate::domain::{BankNameCanonicalizer, LocationCanonicalizer, LocationMode};
use crate::error::{RemitError, RemitResult};
use crate::layout::{detect_layout, BankLayout};
use crate::record::{fields, RemittanceRecord};
use crate::render::{PageRenderer, PageSize, PdfSurface, RenderSummary, Surface};
use crate::template::{apply_template, ApplyOptions, Template};
use std::path::Path;

/// Fields rewritten by the bank canonicalizer.
pub const BANK_NAME_FIELDS: &[&str] = &[fields::BENEFICIARY_BANK, fields::INTERMEDIARY_BANK];

/// Fields rewritten by the location canonicalizer.
pub const LOCATION_FIELDS: &[&str] = &[
    fields::BENEFICIARY_BANK_CITY,
    fields::BENEFICIARY_BANK_PROVINCE,
    fields::BENEFICIARY_BANK_BRANCH,
    fields::BENEFICIARY_CITY,
    fields::BENEFICIARY_PROVINCE,
];

/// Whether blocking compliance issues stop a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Refuse to render while error-severity issues remain
    #[default]
    Final,
    /// Render anyway, for on-screen preview
    Preview,
}

/// A normalized record with its checklist and chosen layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedForm {
    pub record: RemittanceRecord,
    pub report: ComplianceReport,
    pub layout: BankLayout,
}

impl PreparedForm {
    pub fn is_blocked(&self) -> bool {
        self.report.has_blocking_errors()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemittanceService {
    renderer: PageRenderer,
    location: LocationOptions,
    templates: Vec<Template>,
    apply: ApplyOptions,
    layout_override: Option<BankLayout>,
}

impl RemittanceService {
    /// Creates a service drawing with `config`.
    pub fn new(config: RenderConfig) -> RemitResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer: PageRenderer::new(config),
            ..Self::default()
        })
    }

    pub fn with_location_options(mut self, options: LocationOptions) -> Self {
        self.location = options;
        self
    }

    pub fn with_location_mode(self, mode: LocationMode) -> Self {
        self.with_location_options(LocationOptions::new(mode))
    }

    /// Queues a template. Templates apply in the order they were added.
    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_apply_options(mut self, options: ApplyOptions) -> Self {
        self.apply = options;
        self
    }

    /// Forces a layout instead of detecting one from the record.
    pub fn with_layout(mut self, layout: BankLayout) -> Self {
        self.layout_override = Some(layout);
        self
    }

    pub fn location_mode(&self) -> LocationMode {
        self.location.mode
    }

    /// Applies templates and canonicalizes bank and location fields.
    ///
    /// Blank fields are left alone so the checklist still reports them.
    pub fn normalize(&self, record: &RemittanceRecord) -> RemittanceRecord {
        let mut normalized = self
            .templates
            .iter()
            .fold(record.clone(), |acc, template| {
                apply_template(&acc, template, self.apply)
            });

        let banks = BankNameCanonicalizer::new(self.location.mode);
        let locations = LocationCanonicalizer::new(self.location.mode);
        for &key in BANK_NAME_FIELDS {
            rewrite(&mut normalized, key, |raw| banks.canonicalize(raw));
        }
        for &key in LOCATION_FIELDS {
            rewrite(&mut normalized, key, |raw| locations.canonicalize(raw));
        }
        normalized
    }

    /// Normalizes `record`, runs the checklist and picks the layout.
    pub fn prepare(&self, record: &RemittanceRecord) -> PreparedForm {
        let record = self.normalize(record);
        let report = ComplianceReport::evaluate(&record);
        let layout = self
            .layout_override
            .unwrap_or_else(|| detect_layout(&record));
        tracing::info!(
            layout = %layout,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "prepared remittance form"
        );
        PreparedForm {
            record,
            report,
            layout,
        }
    }

    /// Draws `form` onto `surface`.
    ///
    /// In [`RenderMode::Final`] a form with blocking issues is rejected with
    /// [`RemitError::Blocked`] before anything is drawn.
    pub fn render<S>(
        &self,
        form: &PreparedForm,
        surface: &mut S,
        mode: RenderMode,
    ) -> RemitResult<RenderSummary>
    where
        S: Surface + ?Sized,
    {
        if mode == RenderMode::Final && form.is_blocked() {
            return Err(RemitError::Blocked {
                issues: form.report.errors().cloned().collect(),
            });
        }
        self.renderer
            .render(form.layout.plan(), &form.record, surface)
    }

    /// Renders `form` to an in-memory PDF.
    pub fn render_pdf_bytes(
        &self,
        form: &PreparedForm,
        mode: RenderMode,
    ) -> RemitResult<(Vec<u8>, RenderSummary)> {
        let mut surface = self.pdf_surface(form)?;
        let summary = self.render(form, &mut surface, mode)?;
        Ok((surface.save_to_bytes()?, summary))
    }

    /// Renders `form` and writes the PDF to `output`.
    pub fn render_pdf(
        &self,
        form: &PreparedForm,
        output: &Path,
        mode: RenderMode,
    ) -> RemitResult<RenderSummary> {
        let mut surface = self.pdf_surface(form)?;
        let summary = self.render(form, &mut surface, mode)?;
        surface.save(output)?;
        tracing::info!(path = %output.display(), pages = summary.pages, "wrote PDF");
        Ok(summary)
    }

    fn pdf_surface(&self, form: &PreparedForm) -> RemitResult<PdfSurface> {
        let config = self.renderer.config();
        PdfSurface::new(
            form.layout.plan().title,
            PageSize {
                width: config.page_width,
                height: config.page_height,
            },
        )
    }
}

fn rewrite(record: &mut RemittanceRecord, key: &str, canonicalize: impl Fn(&str) -> String) {
    let Some(raw) = record.non_empty(key) else {
        return;
    };
    let canonical = canonicalize(raw);
    if canonical != raw {
        tracing::debug!(field = key, from = raw, to = %canonical, "canonicalized");
        record.set(key, canonical);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn complete_record() -> RemittanceRecord {
        RemittanceRecord::from_pairs([
            ("senderName", "Acme Trading Ltd"),
            ("debitAcCurrency", "USD"),
            ("debitAc", "012345678901"),
            ("beneficiaryBank", "boc"),
            ("beneficiaryName", "Li Wei"),
            ("beneficiaryBankCity", "beijing"),
            ("bank", "HSBC"),
        ])
    }

    #[test]
    fn test_prepare_canonicalizes_and_selects_layout() {
        let form = RemittanceService::default().prepare(&complete_record());
        assert_eq!(form.record.get("beneficiaryBank"), Some("Bank of China"));
        assert_eq!(form.record.get("beneficiaryBankCity"), Some("Beijing"));
        assert_eq!(form.layout, BankLayout::Hsbc);
        assert!(!form.is_blocked());
    }

    #[test]
    fn test_blank_fields_stay_blank() {
        let record = RemittanceRecord::from_pairs([("beneficiaryBank", "  ")]);
        let normalized = RemittanceService::default().normalize(&record);
        assert_eq!(normalized.get("beneficiaryBank"), Some("  "));
        assert_eq!(normalized.get("intermediaryBank"), None);
    }

    #[test]
    fn test_final_render_refuses_blocked_form() {
        let service = RemittanceService::default();
        let form = service.prepare(&RemittanceRecord::new());
        let mut surface = RecordingSurface::a4();

        let err = service
            .render(&form, &mut surface, RenderMode::Final)
            .unwrap_err();
        match err {
            RemitError::Blocked { issues } => assert_eq!(issues.len(), form.report.error_count()),
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert!(surface.ops().is_empty());

        let summary = service
            .render(&form, &mut surface, RenderMode::Preview)
            .unwrap();
        assert_eq!(summary.layout, BankLayout::Generic);
        assert!(!surface.ops().is_empty());
    }

    #[test]
    fn test_templates_apply_in_order_before_canonicalization() {
        let first = Template::labeled("first").with_preset([("beneficiaryBank", "icbc")]);
        let second = Template::labeled("second").with_preset([("beneficiaryBank", "HSBC")]);
        let service = RemittanceService::default()
            .with_template(first)
            .with_template(second);
        let normalized = service.normalize(&RemittanceRecord::new());
        // the second template sees the first one's value and leaves it
        assert_eq!(
            normalized.get("beneficiaryBank"),
            Some("Industrial and Commercial Bank of China")
        );
    }

    #[test]
    fn test_layout_override() {
        let service = RemittanceService::default().with_layout(BankLayout::Boc);
        assert_eq!(service.prepare(&complete_record()).layout, BankLayout::Boc);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig::new().with_page_size(0.0, 100.0);
        assert!(RemittanceService::new(config).is_err());
    }
}
