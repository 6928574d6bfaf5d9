//! Bank layout selection and the per-bank form plans.

pub mod plan;
pub mod plans;

pub use plan::{
    selected_choices, ChoiceOption, ChoiceRule, Columns, FieldSpec, FieldStyle, Issuer,
    LayoutPlan, Section, ValueSource,
};
pub use plans::{plan_for, BOC_PLAN, GENERIC_PLAN, HSBC_PLAN, SCB_PLAN};

use crate::record::{fields, RemittanceRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields consulted for the remitting bank, in priority order.
pub const LAYOUT_HINT_KEYS: &[&str] = &[
    fields::LAYOUT_BANK,
    fields::BANK,
    fields::FORM_BANK,
    fields::SELECTED_BANK,
    fields::REMITTING_BANK,
];

/// The fixed form layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankLayout {
    Hsbc,
    Boc,
    Scb,
    Generic,
}

impl BankLayout {
    pub const ALL: [BankLayout; 4] = [Self::Hsbc, Self::Boc, Self::Scb, Self::Generic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hsbc => "hsbc",
            Self::Boc => "boc",
            Self::Scb => "scb",
            Self::Generic => "generic",
        }
    }

    /// Name printed on the form's issuer label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hsbc => "HSBC",
            Self::Boc => "Bank of China",
            Self::Scb => "Standard Chartered",
            Self::Generic => "Remitting Bank",
        }
    }

    pub fn plan(&self) -> &'static LayoutPlan {
        plan_for(*self)
    }
}

impl fmt::Display for BankLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BankLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hsbc" => Ok(Self::Hsbc),
            "boc" => Ok(Self::Boc),
            "scb" => Ok(Self::Scb),
            "generic" => Ok(Self::Generic),
            other => Err(format!(
                "unknown layout '{}' (hsbc, boc, scb, generic)",
                other
            )),
        }
    }
}

/// Picks the layout for `record`.
///
/// Reads the first non-blank hint field and matches bank substrings in a
/// fixed order: HSBC, then Standard Chartered, then Bank of China. Anything
/// else, including no hint at all, is `Generic`.
pub fn detect_layout(record: &RemittanceRecord) -> BankLayout {
    let hint = record
        .first_non_empty(LAYOUT_HINT_KEYS)
        .unwrap_or_default()
        .to_lowercase();
    let layout = classify_hint(&hint);
    tracing::debug!(hint = %hint, layout = %layout, "layout selected");
    layout
}

fn classify_hint(hint: &str) -> BankLayout {
    if hint.is_empty() {
        BankLayout::Generic
    } else if hint.contains("hsbc") || hint.contains("hongkong and shanghai banking corporation")
    {
        BankLayout::Hsbc
    } else if hint.contains("standard chartered") || hint.contains("scb") {
        BankLayout::Scb
    } else if hint.contains("bank of china") || hint.contains("boc") {
        BankLayout::Boc
    } else {
        BankLayout::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bank(key: &str, value: &str) -> RemittanceRecord {
        RemittanceRecord::from_pairs([(key, value)])
    }

    #[test]
    fn test_detect_full_hsbc_name() {
        let record = with_bank("bank", "The Hongkong and Shanghai Banking Corporation");
        assert_eq!(detect_layout(&record), BankLayout::Hsbc);
    }

    #[test]
    fn test_detect_empty_record_is_generic() {
        assert_eq!(detect_layout(&RemittanceRecord::new()), BankLayout::Generic);
    }

    #[test]
    fn test_layout_hint_takes_priority() {
        let record = RemittanceRecord::from_pairs([
            ("layoutBank", "BOC"),
            ("bank", "HSBC"),
        ]);
        assert_eq!(detect_layout(&record), BankLayout::Boc);
    }

    #[test]
    fn test_blank_hint_falls_through() {
        let record = RemittanceRecord::from_pairs([
            ("layoutBank", "  "),
            ("remittingBank", "Standard Chartered Bank (HK)"),
        ]);
        assert_eq!(detect_layout(&record), BankLayout::Scb);
    }

    #[test]
    fn test_first_match_order() {
        // mentions both; HSBC is checked first
        let record = with_bank("formBank", "HSBC correspondent of Bank of China");
        assert_eq!(detect_layout(&record), BankLayout::Hsbc);
        assert_eq!(
            detect_layout(&with_bank("selectedBank", "bank of china (hong kong)")),
            BankLayout::Boc
        );
        assert_eq!(detect_layout(&with_bank("bank", "Citibank")), BankLayout::Generic);
    }

    #[test]
    fn test_beneficiary_bank_is_not_a_hint() {
        let record = with_bank("beneficiaryBank", "HSBC");
        assert_eq!(detect_layout(&record), BankLayout::Generic);
    }

    #[test]
    fn test_layout_parse_and_display() {
        for layout in BankLayout::ALL {
            assert_eq!(layout.as_str().parse::<BankLayout>(), Ok(layout));
            assert_eq!(layout.plan().layout, layout);
        }
        assert!("citi".parse::<BankLayout>().is_err());
    }
}
