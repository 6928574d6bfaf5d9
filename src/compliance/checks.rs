//! Field-level predicates used by the checklist.

use once_cell::sync::Lazy;
use regex::Regex;

fn currency_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("Valid regex"));
    &PATTERN
}

fn account_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{6,34}$").expect("Valid regex"));
    &PATTERN
}

fn date_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\d{4}-\d{1,2}-\d{1,2})|(\d{1,2}/\d{1,2}/\d{4})").expect("Valid regex")
    });
    &PATTERN
}

/// Account/SWIFT/telephone/address fragments that do not belong in a bank name.
fn bank_name_noise_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(account\s*(no\.|number)|a/c\s*no\.|swift|tel\.?|电话|地址)")
            .expect("Valid regex")
    });
    &PATTERN
}

/// Present and not only whitespace.
pub fn is_non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Exactly three letters after uppercasing (`usd` is accepted).
pub fn is_currency_code(value: Option<&str>) -> bool {
    let upper = value.unwrap_or("").to_uppercase();
    currency_pattern().is_match(&upper)
}

/// 6 to 34 alphanumerics once whitespace is removed (covers IBAN fragments).
pub fn is_account_number(value: Option<&str>) -> bool {
    let compact: String = value
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    account_pattern().is_match(&compact)
}

/// At least three characters and free of account/SWIFT/phone/address noise.
pub fn is_plausible_bank_name(value: Option<&str>) -> bool {
    let trimmed = value.unwrap_or("").trim();
    if trimmed.is_empty() {
        return false;
    }
    !bank_name_noise_pattern().is_match(trimmed) && trimmed.chars().count() >= 3
}

/// Loosely YYYY-MM-DD or DD/MM/YYYY, anywhere in the value.
pub fn is_date_like(value: Option<&str>) -> bool {
    let trimmed = value.unwrap_or("").trim();
    !trimmed.is_empty() && date_pattern().is_match(trimmed)
}

/// At least seven digits once everything else is stripped.
pub fn is_phone_like(value: Option<&str>) -> bool {
    value
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .count()
        >= 7
}
