//! Branch location canonicalization.
//!
//! Location fragments arrive in English, pinyin, simplified Chinese, or a
//! mix of them (`"北京经开区"`, `"Shanghai 自贸区"`). Every city, province,
//! district and special-zone token is replaced by its canonical form in the
//! requested output language; text that matches no token is kept as-is.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Output language for canonical location names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// English names (`Beijing Economic Development Zone`)
    #[default]
    En,
    /// Chinese names (`北京经济技术开发区`)
    Zh,
    /// English, followed by ` / ` and the Chinese form when it differs
    Mixed,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for LocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "zh" | "chinese" => Ok(Self::Zh),
            "mixed" | "both" => Ok(Self::Mixed),
            other => Err(format!("unknown location mode '{}' (en, zh, mixed)", other)),
        }
    }
}

/// A place or zone token with its bilingual canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationEntry {
    pub en: &'static str,
    pub zh: &'static str,
    /// Lowercase spellings beyond `en` and `zh`
    pub aliases: &'static [&'static str],
}

const fn entry(
    en: &'static str,
    zh: &'static str,
    aliases: &'static [&'static str],
) -> LocationEntry {
    LocationEntry { en, zh, aliases }
}

pub static CITIES: &[LocationEntry] = &[
    entry("Beijing", "北京", &[]),
    entry("Shanghai", "上海", &[]),
    entry("Shenzhen", "深圳", &[]),
    entry("Guangzhou", "广州", &[]),
    entry("Hangzhou", "杭州", &[]),
    entry("Nanjing", "南京", &[]),
    entry("Ningbo", "宁波", &[]),
    entry("Qingdao", "青岛", &[]),
    entry("Tianjin", "天津", &[]),
    entry("Dalian", "大连", &[]),
    entry("Chengdu", "成都", &[]),
    entry("Chongqing", "重庆", &[]),
    entry("Xiamen", "厦门", &[]),
    entry("Zhuhai", "珠海", &[]),
    entry("Guiyang", "贵阳", &[]),
    entry("Yantai", "烟台", &[]),
    entry("Hong Kong", "香港", &["hongkong"]),
];

pub static PROVINCES: &[LocationEntry] = &[
    entry("Guangdong", "广东", &[]),
    entry("Zhejiang", "浙江", &[]),
    entry("Jiangsu", "江苏", &[]),
    entry("Shandong", "山东", &[]),
    entry("Sichuan", "四川", &[]),
    entry("Fujian", "福建", &[]),
    entry("Guizhou", "贵州", &[]),
    entry("Liaoning", "辽宁", &[]),
    entry("Hubei", "湖北", &[]),
    entry("Hunan", "湖南", &[]),
    entry("Henan", "河南", &[]),
];

pub static DISTRICTS: &[LocationEntry] = &[
    entry("Haidian", "海淀", &[]),
    entry("Chaoyang", "朝阳", &[]),
    entry("Xicheng", "西城", &[]),
    entry("Pudong", "浦东", &[]),
    entry("Nanshan", "南山", &[]),
    entry("Tianhe", "天河", &[]),
];

/// Special zones. The Chinese aliases are synonyms unified into `zh`.
pub static ZONES: &[LocationEntry] = &[
    entry(
        "Economic Development Zone",
        "经济技术开发区",
        &["经开区", "开发区", "经开"],
    ),
    entry("Free Trade Port", "自贸港", &["自由贸易港"]),
    entry("Free Trade Zone", "自贸区", &["自由贸易试验区"]),
    entry(
        "Bonded Logistics Center",
        "保税物流中心",
        &["保税区", "bonded zone"],
    ),
];

/// Optional metadata for well-known locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationMeta {
    pub country_code: &'static str,
    pub timezone: &'static str,
    pub postal_code_format: &'static str,
}

static LOCATION_META: &[(&str, LocationMeta)] = &[
    (
        "Beijing",
        LocationMeta {
            country_code: "CN",
            timezone: "Asia/Shanghai",
            postal_code_format: "6 digits",
        },
    ),
    (
        "Shanghai",
        LocationMeta {
            country_code: "CN",
            timezone: "Asia/Shanghai",
            postal_code_format: "6 digits",
        },
    ),
    (
        "Shenzhen",
        LocationMeta {
            country_code: "CN",
            timezone: "Asia/Shanghai",
            postal_code_format: "6 digits",
        },
    ),
    (
        "Hong Kong",
        LocationMeta {
            country_code: "HK",
            timezone: "Asia/Hong_Kong",
            postal_code_format: "N/A",
        },
    ),
];

/// Metadata for a canonical English location name.
pub fn location_meta(name: &str) -> Option<&'static LocationMeta> {
    LOCATION_META
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, meta)| meta)
}

fn all_entries() -> impl Iterator<Item = &'static LocationEntry> {
    CITIES
        .iter()
        .chain(PROVINCES)
        .chain(DISTRICTS)
        .chain(ZONES)
}

/// Every spelling, lowercased, mapped to its entry.
static TOKEN_INDEX: Lazy<HashMap<String, &'static LocationEntry>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for e in all_entries() {
        for spelling in [e.en, e.zh].iter().chain(e.aliases) {
            index.entry(spelling.to_lowercase()).or_insert(e);
        }
    }
    index
});

/// One alternation over all spellings, longest first, so `经济技术开发区`
/// wins over `开发区` and `economic development zone` over shorter names.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut spellings: Vec<&String> = TOKEN_INDEX.keys().collect();
    spellings.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    let alternation = spellings
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){}", alternation)).expect("Valid location token regex")
});

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("Valid regex"));
static COMMA_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").expect("Valid regex"));

/// Folds fullwidth comma and slash to ASCII and collapses runs of whitespace.
pub fn normalize_punctuation(text: &str) -> String {
    let folded = text.replace('，', ",").replace('／', "/");
    MULTI_SPACE.replace_all(&folded, " ").trim().to_string()
}

fn is_han(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Drops whitespace that sits between two Han characters.
fn join_han_runs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() && prev.is_some_and(is_han) {
            let next = chars[i..].iter().find(|n| !n.is_whitespace());
            if next.is_some_and(|n| is_han(*n)) {
                continue;
            }
        }
        out.push(c);
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    out
}

fn tidy_spacing(text: &str) -> String {
    let commas = COMMA_SPACING.replace_all(text.trim(), ", ");
    MULTI_SPACE
        .replace_all(&commas, " ")
        .trim()
        .trim_end_matches(',')
        .trim()
        .to_string()
}

/// Canonicalizes location fragments into one output language.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationCanonicalizer {
    mode: LocationMode,
}

impl LocationCanonicalizer {
    pub fn new(mode: LocationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LocationMode {
        self.mode
    }

    /// Looks up the entry for one exact spelling (case-insensitive).
    pub fn lookup(token: &str) -> Option<&'static LocationEntry> {
        TOKEN_INDEX.get(&token.trim().to_lowercase()).copied()
    }

    /// English rendition: each token padded with spaces, then re-spaced.
    pub fn to_english(text: &str) -> String {
        let normalized = normalize_punctuation(text);
        let replaced = TOKEN_PATTERN.replace_all(&normalized, |caps: &Captures| {
            match Self::lookup(&caps[0]) {
                Some(e) => format!(" {} ", e.en),
                None => caps[0].to_string(),
            }
        });
        tidy_spacing(&replaced)
    }

    /// Chinese rendition: tokens replaced in place, synonyms unified.
    pub fn to_chinese(text: &str) -> String {
        let normalized = normalize_punctuation(text);
        let replaced = TOKEN_PATTERN.replace_all(&normalized, |caps: &Captures| {
            match Self::lookup(&caps[0]) {
                Some(e) => e.zh.to_string(),
                None => caps[0].to_string(),
            }
        });
        tidy_spacing(&join_han_runs(&replaced))
    }

    /// Canonicalizes `raw` in this canonicalizer's mode.
    pub fn canonicalize(&self, raw: &str) -> String {
        match self.mode {
            LocationMode::En => Self::to_english(raw),
            LocationMode::Zh => Self::to_chinese(raw),
            LocationMode::Mixed => {
                // an already-mixed value canonicalizes from its English half
                let source = match raw.rsplit_once(" / ") {
                    Some((head, tail)) if Self::to_chinese(head) == tail.trim() => head,
                    _ => raw,
                };
                let en = Self::to_english(source);
                let zh = Self::to_chinese(source);
                if en.to_lowercase() == zh.to_lowercase() {
                    en
                } else {
                    format!("{} / {}", en, zh)
                }
            }
        }
    }
}

/// Canonicalizes a branch location fragment in the given mode.
pub fn canonicalize_branch_location(raw: &str, mode: LocationMode) -> String {
    LocationCanonicalizer::new(mode).canonicalize(raw)
}
