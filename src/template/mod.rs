//! Bank, scene and FX templates and the non-destructive merge that applies
//! them to a record.
//!
//! A template is a bag of optional defaults. [`apply_template`] writes each
//! value into a copy of the record only where the record is blank, unless
//! the caller asks to overwrite. Applying several templates is the caller's
//! business; later applications see the values earlier ones wrote.

use crate::domain::BANK_ALIASES;
use crate::error::{RemitError, RemitResult};
use crate::record::{fields, RemittanceRecord};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Defaults for a bank or a remittance scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediary_bank: Option<String>,
    /// Record keys written verbatim
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "preset_without_nulls"
    )]
    pub preset: BTreeMap<String, String>,
}

/// A `null` preset value never writes, so it is dropped on read.
fn preset_without_nulls<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}

impl Template {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_preset<K, V, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.preset
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    fn bank(
        default_currency: &str,
        swift: &str,
        routing_scheme: &str,
        beneficiary_bank: &str,
        intermediary_bank: Option<&str>,
    ) -> Self {
        Self {
            default_currency: Some(default_currency.to_string()),
            swift: Some(swift.to_string()),
            routing_scheme: Some(routing_scheme.to_string()),
            beneficiary_bank: Some(beneficiary_bank.to_string()),
            intermediary_bank: intermediary_bank.map(str::to_string),
            ..Self::default()
        }
    }
}

/// A template with the key it is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedTemplate {
    pub key: &'static str,
    pub template: Template,
}

/// Bank templates keyed by canonical bank name.
static BANK_TEMPLATES: Lazy<Vec<NamedTemplate>> = Lazy::new(|| {
    vec![
        NamedTemplate {
            key: "Standard Chartered Bank",
            template: Template::bank(
                "USD",
                "SCBLHKHHXXX",
                "SWIFT",
                "Standard Chartered Bank",
                Some("Standard Chartered Bank"),
            ),
        },
        NamedTemplate {
            key: "HSBC",
            template: Template::bank("USD", "HSBCHKHHHKH", "SWIFT", "HSBC", Some("HSBC")),
        },
        NamedTemplate {
            key: "Bank of China",
            template: Template::bank("CNY", "BKCHCNBJ", "CN-Domestic", "Bank of China", None),
        },
    ]
});

static SCENE_TEMPLATES: Lazy<Vec<NamedTemplate>> = Lazy::new(|| {
    vec![
        NamedTemplate {
            key: "invoicePayment",
            template: Template::labeled("Invoice Payment").with_preset([
                (fields::PAYMENT_METHOD, "From Account"),
                (fields::CHARGES_DEBIT_AC_CURRENCY, "USD"),
            ]),
        },
        NamedTemplate {
            key: "salaryRemittance",
            template: Template::labeled("Salary Remittance").with_preset([
                (fields::PAYMENT_METHOD, "From Account"),
                (fields::DEBIT_AC_CURRENCY, "USD"),
            ]),
        },
        NamedTemplate {
            key: "supplierPayment",
            template: Template::labeled("Supplier Payment")
                .with_preset([(fields::PAYMENT_METHOD, "From Account")]),
        },
    ]
});

static FX_SCENE_TEMPLATES: Lazy<Vec<NamedTemplate>> = Lazy::new(|| {
    vec![
        NamedTemplate {
            key: "spotFx",
            template: Template::labeled("Spot FX")
                .with_preset([("status", "Spot"), ("valueDate", "T+2")]),
        },
        NamedTemplate {
            key: "forwardFx",
            template: Template::labeled("Forward Contract")
                .with_preset([("status", "Forward"), ("valueDate", "2025-12-31")]),
        },
        NamedTemplate {
            key: "fxSwap",
            template: Template::labeled("FX Swap")
                .with_preset([("status", "Swap"), ("valueDate", "T+2")]),
        },
    ]
});

/// Merge behaviour for [`apply_template`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Replace values the record already has
    pub overwrite_existing: bool,
}

impl ApplyOptions {
    pub fn overwrite() -> Self {
        Self {
            overwrite_existing: true,
        }
    }
}

/// Returns a copy of `record` with `template`'s values merged in.
///
/// The bank default currency fills both the debit and the charges account
/// currency. A value is written only when overwriting is allowed or the
/// record's value is missing or blank. Keys the crate doesn't know are
/// copied through untouched.
pub fn apply_template(
    record: &RemittanceRecord,
    template: &Template,
    options: ApplyOptions,
) -> RemittanceRecord {
    let mut merged = record.clone();
    let mut written = 0usize;
    let mut set_field = |key: &str, value: Option<&str>| {
        let Some(value) = value else { return };
        if options.overwrite_existing || merged.is_blank(key) {
            merged.set(key, value);
            written += 1;
        }
    };

    if let Some(currency) = template.default_currency.as_deref() {
        set_field(fields::DEBIT_AC_CURRENCY, Some(currency));
        set_field(fields::CHARGES_DEBIT_AC_CURRENCY, Some(currency));
    }
    set_field(fields::BENEFICIARY_BANK, template.beneficiary_bank.as_deref());
    set_field(fields::INTERMEDIARY_BANK, template.intermediary_bank.as_deref());
    for (key, value) in &template.preset {
        set_field(key.as_str(), Some(value.as_str()));
    }

    tracing::debug!(
        template = template.label.as_deref().unwrap_or("unnamed"),
        overwrite = options.overwrite_existing,
        written,
        "applied template"
    );
    merged
}

/// First bank template whose name occurs in `name`, ignoring case.
pub fn bank_template_by_name(name: &str) -> Option<&'static Template> {
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    BANK_TEMPLATES
        .iter()
        .find(|t| lowered.contains(&t.key.to_lowercase()))
        .map(|t| &t.template)
}

/// Canonical banks that have a template, in alias-table order.
pub fn list_available_bank_templates() -> Vec<&'static NamedTemplate> {
    let mut seen: Vec<&str> = Vec::new();
    BANK_ALIASES
        .iter()
        .filter(|entry| {
            if seen.contains(&entry.canonical) {
                return false;
            }
            seen.push(entry.canonical);
            true
        })
        .filter_map(|entry| BANK_TEMPLATES.iter().find(|t| t.key == entry.canonical))
        .collect()
}

pub fn list_scene_templates() -> &'static [NamedTemplate] {
    &SCENE_TEMPLATES
}

pub fn list_fx_scene_templates() -> &'static [NamedTemplate] {
    &FX_SCENE_TEMPLATES
}

/// Finds a template by scene key or bank name.
///
/// Scene and FX keys match exactly; anything else goes through
/// [`bank_template_by_name`].
pub fn find_template(name: &str) -> RemitResult<&'static Template> {
    SCENE_TEMPLATES
        .iter()
        .chain(FX_SCENE_TEMPLATES.iter())
        .find(|t| t.key == name.trim())
        .map(|t| &t.template)
        .or_else(|| bank_template_by_name(name))
        .ok_or_else(|| RemitError::UnknownTemplate {
            name: name.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub legal_name: Option<String>,
    pub registered_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommonPayee {
    pub name: Option<String>,
    pub bank_name: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryItem {
    pub payment_method: Option<String>,
    pub fx_rates: Option<String>,
}

/// Everything [`compose_auto_prefill`] can draw on. All optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefillSources<'a> {
    pub company_profile: Option<&'a CompanyProfile>,
    pub common_payee: Option<&'a CommonPayee>,
    pub history_item: Option<&'a HistoryItem>,
    pub ai_extract: Option<&'a RemittanceRecord>,
}

/// Builds an "Auto Prefill" template from saved profiles and history.
///
/// The AI extract only supplies the beneficiary name and bank, and only when
/// the payee didn't.
pub fn compose_auto_prefill(sources: PrefillSources<'_>) -> Template {
    let mut preset = BTreeMap::new();
    let mut put = |key: &str, value: Option<&String>| {
        if let Some(value) = value {
            preset.insert(key.to_string(), value.clone());
        }
    };

    if let Some(company) = sources.company_profile {
        put(fields::SENDER_NAME, company.legal_name.as_ref());
        put(fields::ADDRESS, company.registered_address.as_ref());
    }
    if let Some(payee) = sources.common_payee {
        put(fields::BENEFICIARY_NAME, payee.name.as_ref());
        put(fields::BENEFICIARY_BANK, payee.bank_name.as_ref());
        put(fields::DEBIT_AC_CURRENCY, payee.currency.as_ref());
    }
    if let Some(history) = sources.history_item {
        put(fields::PAYMENT_METHOD, history.payment_method.as_ref());
        put(fields::FX_RATES, history.fx_rates.as_ref());
    }
    if let Some(extract) = sources.ai_extract {
        for key in [fields::BENEFICIARY_NAME, fields::BENEFICIARY_BANK] {
            if !preset.contains_key(key) {
                if let Some(value) = extract.non_empty(key) {
                    preset.insert(key.to_string(), value.to_string());
                }
            }
        }
    }

    Template {
        label: Some("Auto Prefill".to_string()),
        preset,
        ..Template::default()
    }
}
