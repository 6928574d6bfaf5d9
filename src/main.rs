//! Remittance form CLI.
//!
//! Checks extracted remittance records, canonicalizes bank and location
//! names and renders bank-specific application forms as PDF.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use remitform::template::{
    find_template, list_available_bank_templates, list_fx_scene_templates, list_scene_templates,
    NamedTemplate,
};
use remitform::{
    canonicalize_branch_location, ApplyOptions, BankLayout, LocationMode, LocationOptions,
    PreparedForm, RecordingSurface, RemittanceRecord, RemittanceService, RenderMode,
    RenderSummary, RiskAssessment,
};

/// Remittance Form Tool
///
/// Validate extracted remittance data and print it on the right bank's form.
#[derive(Parser)]
#[command(name = "remitform")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Location output language (en, zh, mixed); overrides REMITFORM_LOCATION_MODE
    #[arg(long, global = true, value_name = "MODE")]
    location_mode: Option<LocationMode>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the compliance checklist on a record
    Check {
        /// Record JSON file
        #[arg(value_name = "FILE")]
        record: PathBuf,

        /// Template to merge first (scene key or bank name, repeatable)
        #[arg(short, long, value_name = "NAME")]
        template: Vec<String>,

        /// Risk assessment JSON returned by the scoring service
        #[arg(long, value_name = "FILE")]
        risk: Option<PathBuf>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a record onto its bank's form
    Render {
        /// Record JSON file
        #[arg(value_name = "FILE")]
        record: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE", required_unless_present = "dry_run")]
        output: Option<PathBuf>,

        /// Force a layout (hsbc, boc, scb, generic) instead of detecting it
        #[arg(short, long, value_name = "LAYOUT")]
        layout: Option<BankLayout>,

        /// Template to merge first (scene key or bank name, repeatable)
        #[arg(short, long, value_name = "NAME")]
        template: Vec<String>,

        /// Let templates replace values the record already has
        #[arg(long)]
        overwrite: bool,

        /// Render even when blocking issues remain
        #[arg(long)]
        preview: bool,

        /// Lay out the form without writing a PDF
        #[arg(long)]
        dry_run: bool,
    },

    /// Canonicalize a bank name or, with --location, a place name
    Canonicalize {
        /// Text to canonicalize
        text: String,

        /// Treat the text as a branch location
        #[arg(long)]
        location: bool,
    },

    /// List bank, scene and FX templates
    Templates {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Command handler holding the shared options.
struct FormHandler {
    location: LocationOptions,
    verbose: bool,
}

impl FormHandler {
    fn new(location_mode: Option<LocationMode>, verbose: bool) -> Self {
        Self {
            location: LocationOptions::from_env().with_override(location_mode),
            verbose,
        }
    }

    fn service(&self, templates: &[String], overwrite: bool) -> Result<RemittanceService> {
        let mut service = RemittanceService::default()
            .with_location_options(self.location)
            .with_apply_options(ApplyOptions {
                overwrite_existing: overwrite,
            });
        for name in templates {
            let template = find_template(name).with_context(|| "Template lookup failed")?;
            service = service.with_template(template.clone());
        }
        Ok(service)
    }

    fn load(&self, path: &Path) -> Result<RemittanceRecord> {
        if !path.exists() {
            anyhow::bail!("Record file does not exist: {}", path.display());
        }
        let record = RemittanceRecord::from_json_file(path)
            .with_context(|| format!("Failed to load record from {}", path.display()))?;
        if self.verbose {
            println!("Record: {} ({} field(s))", path.display(), record.len());
        }
        Ok(record)
    }

    fn check(
        &self,
        path: &Path,
        templates: &[String],
        risk: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let record = self.load(path)?;
        let form = self.service(templates, false)?.prepare(&record);
        let risk = risk.map(load_risk).transpose()?;

        if json {
            let output = serde_json::json!({
                "layout": form.layout,
                "errors": form.report.error_count(),
                "warnings": form.report.warning_count(),
                "issues": form.report.issues,
                "risk": risk,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_report(&form);
            if let Some(risk) = &risk {
                print_risk(risk);
            }
        }

        if form.is_blocked() {
            anyhow::bail!(
                "{} blocking issue(s); fix them before rendering",
                form.report.error_count()
            );
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        path: &Path,
        output: Option<&Path>,
        layout: Option<BankLayout>,
        templates: &[String],
        overwrite: bool,
        preview: bool,
        dry_run: bool,
    ) -> Result<()> {
        let record = self.load(path)?;
        let mut service = self.service(templates, overwrite)?;
        if let Some(layout) = layout {
            service = service.with_layout(layout);
        }
        let form = service.prepare(&record);
        let mode = if preview {
            RenderMode::Preview
        } else {
            RenderMode::Final
        };

        if self.verbose {
            println!("Layout: {}", form.layout.display_name());
            print_report(&form);
        }

        let summary = match (dry_run, output) {
            (false, Some(output)) => {
                let summary = service
                    .render_pdf(&form, output, mode)
                    .with_context(|| "Rendering failed")?;
                println!(
                    "✓ Rendered {} form ({} page(s)) → {}",
                    form.layout.display_name(),
                    summary.pages,
                    output.display()
                );
                summary
            }
            _ => {
                let mut surface = RecordingSurface::a4();
                let summary = service
                    .render(&form, &mut surface, mode)
                    .with_context(|| "Rendering failed")?;
                println!(
                    "✓ Dry run: {} form, {} page(s), {} draw call(s)",
                    form.layout.display_name(),
                    summary.pages,
                    surface.ops().len()
                );
                summary
            }
        };

        if self.verbose {
            print_summary(&summary);
        }
        if !summary.overflowing_fields.is_empty() {
            println!(
                "⚠ Too wide even at the smallest size: {}",
                summary.overflowing_fields.join(", ")
            );
        }
        Ok(())
    }

    fn canonicalize(&self, text: &str, location: bool) {
        let output = if location {
            canonicalize_branch_location(text, self.location.mode)
        } else {
            remitform::canonicalize_bank_name_with(text, self.location.mode)
        };
        println!("{}", output);
    }

    fn templates(&self, json: bool) -> Result<()> {
        let banks = list_available_bank_templates();
        if json {
            let output = serde_json::json!({
                "banks": banks,
                "scenes": list_scene_templates(),
                "fx": list_fx_scene_templates(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Bank templates:");
        for named in banks {
            print_template(named);
        }
        println!("Scene templates:");
        for named in list_scene_templates() {
            print_template(named);
        }
        println!("FX templates:");
        for named in list_fx_scene_templates() {
            print_template(named);
        }
        Ok(())
    }
}

fn load_risk(path: &Path) -> Result<RiskAssessment> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    RiskAssessment::from_json_str(&text)
        .with_context(|| format!("Failed to parse risk assessment {}", path.display()))
}

fn print_template(named: &NamedTemplate) {
    let template = &named.template;
    match &template.label {
        Some(label) => println!("  {} ({})", named.key, label),
        None => println!("  {}", named.key),
    }
    if let Some(currency) = &template.default_currency {
        println!("    default currency: {}", currency);
    }
    for (key, value) in &template.preset {
        println!("    {} = {}", key, value);
    }
}

fn print_report(form: &PreparedForm) {
    let report = &form.report;
    if report.is_clean() {
        println!("✓ No compliance issues");
        return;
    }
    println!(
        "Compliance: {} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
    for issue in report.errors().chain(report.warnings()) {
        println!("  {}", issue);
    }
}

fn print_risk(risk: &RiskAssessment) {
    println!(
        "Risk: {} ({}/100)",
        risk.overall_risk_level, risk.risk_score
    );
    for factor in risk.failed_factors() {
        println!("  ✗ {}: {}", factor.factor, factor.reason);
    }
    for recommendation in &risk.recommendations {
        println!("  → {}", recommendation);
    }
}

fn print_summary(summary: &RenderSummary) {
    println!("\nRender Summary:");
    println!("  Pages:        {}", summary.pages);
    println!("  Page breaks:  {}", summary.page_breaks);
    println!("  Fields drawn: {}", summary.fields_drawn);
    println!("  Shrunk:       {}", summary.shrunk_fields);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "remitform=debug" } else { "remitform=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let handler = FormHandler::new(cli.location_mode, cli.verbose);

    match &cli.command {
        Commands::Check {
            record,
            template,
            risk,
            json,
        } => handler.check(record, template, risk.as_deref(), *json)?,
        Commands::Render {
            record,
            output,
            layout,
            template,
            overwrite,
            preview,
            dry_run,
        } => handler.render(
            record,
            output.as_deref(),
            *layout,
            template,
            *overwrite,
            *preview,
            *dry_run,
        )?,
        Commands::Canonicalize { text, location } => handler.canonicalize(text, *location),
        Commands::Templates { json } => handler.templates(*json)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_requires_output_unless_dry_run() {
        assert!(Cli::try_parse_from(["remitform", "render", "r.json"]).is_err());
        let cli = Cli::try_parse_from(["remitform", "render", "r.json", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Render { dry_run: true, .. }));
    }

    #[test]
    fn test_layout_and_mode_parse() {
        let cli = Cli::try_parse_from([
            "remitform",
            "--location-mode",
            "zh",
            "render",
            "r.json",
            "-o",
            "out.pdf",
            "--layout",
            "boc",
        ])
        .unwrap();
        assert_eq!(cli.location_mode, Some(LocationMode::Zh));
        assert!(matches!(
            cli.command,
            Commands::Render {
                layout: Some(BankLayout::Boc),
                ..
            }
        ));
    }
}
