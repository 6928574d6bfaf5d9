//! Declarative layout plan types.
//!
//! A plan is pure data: sections of fields with their record sources and
//! drawing styles. Bank-specific forms differ only in their plan; the page
//! renderer interprets every plan with the same algorithm.

use super::BankLayout;
use crate::record::{fields, RemittanceRecord};
use crate::render::Color;

/// Where a field's displayed value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Key(&'static str),
    /// First non-blank key wins
    FirstOf(&'static [&'static str]),
    /// Non-blank values joined in key order
    Joined {
        keys: &'static [&'static str],
        separator: &'static str,
    },
}

impl ValueSource {
    /// Computes the display string; blank or absent values yield `""`.
    pub fn resolve(&self, record: &RemittanceRecord) -> String {
        match self {
            Self::Key(key) => record.non_empty(key).unwrap_or_default().to_string(),
            Self::FirstOf(keys) => record.first_non_empty(keys).unwrap_or_default().to_string(),
            Self::Joined { keys, separator } => keys
                .iter()
                .filter_map(|k| record.non_empty(k))
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// Record keys this source reads.
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            Self::Key(key) => vec![*key],
            Self::FirstOf(keys) | Self::Joined { keys, .. } => keys.to_vec(),
        }
    }
}

/// When a tick box is marked for the field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceRule {
    /// Lowercased value starts with the prefix
    StartsWith(&'static str),
    /// Lowercased value contains any needle
    ContainsAny(&'static [&'static str]),
    /// Value is non-blank and no other option matched
    Otherwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub label: &'static str,
    pub rule: ChoiceRule,
}

impl ChoiceOption {
    pub const fn new(label: &'static str, rule: ChoiceRule) -> Self {
        Self { label, rule }
    }
}

/// Which options of a choice row are ticked for `value`.
pub fn selected_choices(options: &[ChoiceOption], value: &str) -> Vec<bool> {
    let lowered = value.trim().to_lowercase();
    let direct: Vec<bool> = options
        .iter()
        .map(|o| match o.rule {
            ChoiceRule::StartsWith(prefix) => !lowered.is_empty() && lowered.starts_with(prefix),
            ChoiceRule::ContainsAny(needles) => needles.iter().any(|n| lowered.contains(n)),
            ChoiceRule::Otherwise => false,
        })
        .collect();
    let any_direct = direct.iter().any(|&d| d);
    options
        .iter()
        .zip(direct)
        .map(|(o, hit)| match o.rule {
            ChoiceRule::Otherwise => !lowered.is_empty() && !any_direct,
            _ => hit,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Underlined value that wraps onto further lines
    Underline,
    /// Single underlined line; the font shrinks instead of wrapping
    ShrinkToFit,
    /// Value inside an outlined box (signatures)
    Boxed,
    /// Row of tick boxes
    Choice(&'static [ChoiceOption]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    One,
    Two,
}

/// One labeled field in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub source: ValueSource,
    pub required: bool,
    pub columns: Columns,
    pub style: FieldStyle,
}

impl FieldSpec {
    pub const fn new(label: &'static str, source: ValueSource) -> Self {
        Self {
            label,
            source,
            required: false,
            columns: Columns::One,
            style: FieldStyle::Underline,
        }
    }

    pub const fn key(label: &'static str, key: &'static str) -> Self {
        Self::new(label, ValueSource::Key(key))
    }

    pub const fn first_of(label: &'static str, keys: &'static [&'static str]) -> Self {
        Self::new(label, ValueSource::FirstOf(keys))
    }

    pub const fn joined(
        label: &'static str,
        keys: &'static [&'static str],
        separator: &'static str,
    ) -> Self {
        Self::new(label, ValueSource::Joined { keys, separator })
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn half(mut self) -> Self {
        self.columns = Columns::Two;
        self
    }

    pub const fn shrink(mut self) -> Self {
        self.style = FieldStyle::ShrinkToFit;
        self
    }

    pub const fn boxed(mut self) -> Self {
        self.style = FieldStyle::Boxed;
        self
    }

    pub const fn choice(mut self, options: &'static [ChoiceOption]) -> Self {
        self.style = FieldStyle::Choice(options);
        self
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Drawn as a filled band; `None` continues without a band
    pub title: Option<&'static str>,
    /// Paragraph drawn before the fields
    pub note: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

impl Section {
    pub const fn titled(title: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            title: Some(title),
            note: None,
            fields,
        }
    }

    pub const fn untitled(fields: &'static [FieldSpec]) -> Self {
        Self {
            title: None,
            note: None,
            fields,
        }
    }

    pub const fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// Label shown beside the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issuer {
    Fixed(&'static str),
    /// Detected bank's display name, else the record's `bank`, else the fallback
    Detected { fallback: &'static str },
}

impl Issuer {
    pub fn resolve(&self, record: &RemittanceRecord) -> String {
        match self {
            Self::Fixed(label) => (*label).to_string(),
            Self::Detected { fallback } => match super::detect_layout(record) {
                BankLayout::Generic => record
                    .non_empty(fields::BANK)
                    .unwrap_or(*fallback)
                    .to_string(),
                detected => detected.display_name().to_string(),
            },
        }
    }
}

/// The complete description of one printable form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    pub layout: BankLayout,
    pub title: &'static str,
    pub issuer: Issuer,
    pub band_color: Color,
    /// Distance from a full-width label to its value column
    pub label_width: f32,
    /// Same, for fields sharing a row
    pub half_label_width: f32,
    /// Append `*` to labels of required fields
    pub mark_required: bool,
    pub sections: &'static [Section],
}

impl LayoutPlan {
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    /// Label as printed, with the required marker when the plan uses one.
    pub fn display_label(&self, field: &FieldSpec) -> String {
        if self.mark_required && field.required {
            format!("{}*", field.label)
        } else {
            field.label.to_string()
        }
    }
}
