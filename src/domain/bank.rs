//! Bank name canonicalization.
//!
//! Free-text bank names (`"中国银行北京分行"`, `"HSBC, Kowloon Sub-Branch"`)
//! are resolved to a canonical institution name through the bank alias
//! table, and any branch fragment is extracted, its location canonicalized,
//! and appended as `"<bank>, <area> <suffix>"`.

use super::alias::{AliasDictionary, AliasEntry};
use super::location::{LocationCanonicalizer, LocationMode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Canonical banks. Equally long alias hits go to the earlier entry.
pub const BANK_ALIASES: &[AliasEntry] = &[
    AliasEntry::new("Bank of China", &["bank of china", "boc", "中国银行"]),
    AliasEntry::new(
        "Industrial and Commercial Bank of China",
        &[
            "industrial and commercial bank of china",
            "icbc",
            "中国工商银行",
            "industrial & commercial bank of china",
        ],
    ),
    AliasEntry::new(
        "China Construction Bank",
        &["china construction bank", "ccb", "中国建设银行"],
    ),
    AliasEntry::new(
        "Agricultural Bank of China",
        &["agricultural bank of china", "abc", "中国农业银行"],
    ),
    AliasEntry::new(
        "Bank of Communications",
        &[
            "bank of communications",
            "bocom",
            "交通银行",
            "bank of communication",
        ],
    ),
    AliasEntry::new(
        "China Merchants Bank",
        &["china merchants bank", "cmb", "招商银行"],
    ),
    AliasEntry::new(
        "Postal Savings Bank of China",
        &[
            "postal savings bank of china",
            "psbc",
            "中国邮政储蓄银行",
            "邮储银行",
        ],
    ),
    AliasEntry::new(
        "China Everbright Bank",
        &["china everbright bank", "ceb", "中国光大银行", "光大银行"],
    ),
    AliasEntry::new(
        "China Minsheng Bank",
        &["china minsheng bank", "cmbc", "中国民生银行", "民生银行"],
    ),
    AliasEntry::new(
        "Shanghai Pudong Development Bank",
        &[
            "shanghai pudong development bank",
            "spdb",
            "浦发银行",
            "上海浦东发展银行",
        ],
    ),
    AliasEntry::new("Ping An Bank", &["ping an bank", "pab", "平安银行"]),
    AliasEntry::new("Bank of Beijing", &["bank of beijing", "bob", "北京银行"]),
    AliasEntry::new("Bank of Shanghai", &["bank of shanghai", "bos", "上海银行"]),
    AliasEntry::new("Bank of Jiangsu", &["bank of jiangsu", "bjos", "江苏银行"]),
    AliasEntry::new("Bank of Ningbo", &["bank of ningbo", "bon", "宁波银行"]),
    AliasEntry::new("Bank of Nanjing", &["bank of nanjing", "bonj", "南京银行"]),
    AliasEntry::new("Bank of Hangzhou", &["bank of hangzhou", "bohz", "杭州银行"]),
    AliasEntry::new("Bank of Qingdao", &["bank of qingdao", "boqd", "青岛银行"]),
    AliasEntry::new("Bank of Guangzhou", &["bank of guangzhou", "bogz", "广州银行"]),
    AliasEntry::new(
        "Bank of Tianjin",
        &["bank of tianjin", "tianjin bank", "tjcb", "天津银行"],
    ),
    AliasEntry::new("Bank of Dalian", &["bank of dalian", "dalian bank", "大连银行"]),
    AliasEntry::new(
        "Bank of Chengdu",
        &["bank of chengdu", "chengdu bank", "成都银行"],
    ),
    AliasEntry::new(
        "Bank of Chongqing",
        &["bank of chongqing", "chongqing bank", "重庆银行"],
    ),
    AliasEntry::new("Bank of Xiamen", &["bank of xiamen", "xiamen bank", "厦门银行"]),
    AliasEntry::new("Bank of Kunlun", &["bank of kunlun", "kunlun bank", "昆仑银行"]),
    AliasEntry::new("Bank of Zhuhai", &["bank of zhuhai", "zhuhai bank", "珠海银行"]),
    AliasEntry::new(
        "Bank of Guiyang",
        &["bank of guiyang", "guiyang bank", "贵阳银行"],
    ),
    AliasEntry::new("Bank of Yantai", &["bank of yantai", "yantai bank", "烟台银行"]),
    AliasEntry::new(
        "Standard Chartered Bank",
        &["standard chartered bank", "standard chartered", "渣打银行"],
    ),
    AliasEntry::new(
        "HSBC",
        &["hsbc", "hongkong and shanghai banking corporation", "汇丰银行"],
    ),
    AliasEntry::new("Citibank", &["citibank", "citi", "花旗银行"]),
];

/// The process-wide bank dictionary.
pub static BANKS: AliasDictionary = AliasDictionary::new(BANK_ALIASES);

/// Routing and account hints for banks with templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankMeta {
    pub country: &'static str,
    pub default_currency: &'static str,
    pub swift: &'static str,
    pub account_format_hint: &'static str,
    pub routing_scheme: &'static str,
}

static BANK_META: &[(&str, BankMeta)] = &[
    (
        "Standard Chartered Bank",
        BankMeta {
            country: "HK",
            default_currency: "USD",
            swift: "SCBLHKHHXXX",
            account_format_hint: "12-16 digits (varies)",
            routing_scheme: "SWIFT",
        },
    ),
    (
        "HSBC",
        BankMeta {
            country: "HK",
            default_currency: "USD",
            swift: "HSBCHKHHHKH",
            account_format_hint: "9-12 digits",
            routing_scheme: "SWIFT",
        },
    ),
    (
        "Bank of China",
        BankMeta {
            country: "CN",
            default_currency: "CNY",
            swift: "BKCHCNBJ",
            account_format_hint: "Domestic CN account",
            routing_scheme: "CN-Domestic",
        },
    ),
];

/// Metadata for a canonical bank name.
pub fn bank_meta(canonical: &str) -> Option<&'static BankMeta> {
    BANK_META
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, meta)| meta)
}

/// Which branch indicator was found next to the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Branch,
    HeadOffice,
    BusinessDepartment,
}

impl BranchKind {
    /// Suffix text in the given output mode. Mixed output uses English.
    pub fn suffix(&self, mode: LocationMode) -> &'static str {
        match (self, mode) {
            (Self::Branch, LocationMode::Zh) => "支行",
            (Self::HeadOffice, LocationMode::Zh) => "总行",
            (Self::BusinessDepartment, LocationMode::Zh) => "营业部",
            (Self::Branch, _) => "Branch",
            (Self::HeadOffice, _) => "Head Office",
            (Self::BusinessDepartment, _) => "Business Department",
        }
    }

    fn from_indicator(indicator: &str) -> Self {
        let lowered = indicator.to_lowercase();
        if indicator.contains("营业部") {
            Self::BusinessDepartment
        } else if lowered.starts_with("head") {
            Self::HeadOffice
        } else {
            Self::Branch
        }
    }
}

/// A branch fragment pulled out of a bank name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    /// Canonicalized location
    pub area: String,
    pub kind: BranchKind,
}

impl BranchInfo {
    pub fn render(&self, mode: LocationMode) -> String {
        let suffix = self.kind.suffix(mode);
        match mode {
            LocationMode::Zh => format!("{}{}", self.area, suffix),
            _ => format!("{} {}", self.area, suffix),
        }
    }
}

/// Resolves bank names and their branch fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankNameCanonicalizer {
    mode: LocationMode,
}

impl BankNameCanonicalizer {
    /// Creates a canonicalizer whose branch locations use `mode`.
    pub fn new(mode: LocationMode) -> Self {
        Self { mode }
    }

    /// Whitespace-normalized input: tabs/newlines folded, runs collapsed.
    fn clean(raw: &str) -> String {
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    // Branch patterns, tried in order (cached via Lazy)

    fn pattern_sub_branch() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i),?\s*([A-Za-z\x{4e00}-\x{9fa5}\s\-()]+?)\s*(Sub-?Branch|Branch)\b")
                .expect("Valid regex")
        });
        &PATTERN
    }

    fn pattern_chinese_branch() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"([A-Za-z\x{4e00}-\x{9fa5}\s\-()]+?)\s*(分行|支行|营业部)")
                .expect("Valid regex")
        });
        &PATTERN
    }

    fn pattern_head_office() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)([A-Za-z\x{4e00}-\x{9fa5}\s\-()]+?)\s*(Head\s*Office)")
                .expect("Valid regex")
        });
        &PATTERN
    }

    fn pattern_branch_of() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)Branch\s*of\s*([A-Za-z\x{4e00}-\x{9fa5}\s\-()]+)").expect("Valid regex")
        });
        &PATTERN
    }

    /// Removes a leading bank alias from a captured area so that
    /// `"中国银行北京"` yields `"北京"`.
    fn strip_bank_prefix(area: &str, bank: Option<&AliasEntry>) -> String {
        let trimmed = area.trim();
        let Some(bank) = bank else {
            return trimmed.to_string();
        };
        let lowered = trimmed.to_lowercase();
        let canonical = bank.canonical.to_lowercase();
        let mut spellings: Vec<&str> = bank.aliases.to_vec();
        spellings.push(canonical.as_str());
        spellings.sort_by_key(|s| std::cmp::Reverse(s.len()));
        for spelling in spellings {
            if lowered.starts_with(spelling) {
                // lowercasing preserves byte offsets for the scripts in the table
                return trimmed
                    .get(spelling.len()..)
                    .unwrap_or("")
                    .trim_start_matches([',', ' '])
                    .trim()
                    .to_string();
            }
        }
        trimmed.to_string()
    }

    /// The bank named in `cleaned`.
    ///
    /// An exact spelling wins outright. Text that starts with a canonical
    /// name keeps that bank, so canonical output resolves to itself whatever
    /// its branch text holds. Anything else goes through the dictionary.
    fn resolve(cleaned: &str) -> Option<&'static AliasEntry> {
        let lowered = cleaned.to_lowercase();
        if let Some(entry) = BANK_ALIASES.iter().find(|e| e.is_spelled(&lowered)) {
            return Some(entry);
        }
        BANK_ALIASES
            .iter()
            .filter(|e| lowered.starts_with(&e.canonical.to_lowercase()))
            .max_by_key(|e| e.canonical.len())
            .or_else(|| BANKS.resolve(cleaned))
    }

    /// Finds the branch fragment in `raw`, if any.
    pub fn extract_branch(&self, raw: &str) -> Option<BranchInfo> {
        let cleaned = Self::clean(raw);
        let bank = Self::resolve(&cleaned);
        let locations = LocationCanonicalizer::new(self.mode);

        let indicator_patterns = [
            Self::pattern_sub_branch(),
            Self::pattern_chinese_branch(),
            Self::pattern_head_office(),
        ];
        for pattern in indicator_patterns {
            if let Some(caps) = pattern.captures(&cleaned) {
                let area = Self::strip_bank_prefix(&caps[1], bank);
                if area.is_empty() {
                    continue;
                }
                return Some(BranchInfo {
                    area: locations.canonicalize(&area),
                    kind: BranchKind::from_indicator(&caps[2]),
                });
            }
        }

        let caps = Self::pattern_branch_of().captures(&cleaned)?;
        let area = Self::strip_bank_prefix(&caps[1], bank);
        if area.is_empty() {
            return None;
        }
        Some(BranchInfo {
            area: locations.canonicalize(&area),
            kind: BranchKind::Branch,
        })
    }

    /// Canonicalizes a free-text bank name.
    ///
    /// The bank is the entry spelled exactly by the input, else the one
    /// whose alias found in the input is longest. Unrecognized names pass through cleaned but
    /// otherwise unchanged, branch text included, so callers that need a
    /// strict classification should use [`recognize_bank`] instead of
    /// comparing outputs.
    pub fn canonicalize(&self, raw: &str) -> String {
        let cleaned = Self::clean(raw);
        let Some(entry) = Self::resolve(&cleaned) else {
            return cleaned;
        };
        let base = entry.canonical;
        match self.extract_branch(&cleaned) {
            Some(branch) => {
                let composed = format!("{}, {}", base, branch.render(self.mode));
                if composed == cleaned {
                    cleaned
                } else {
                    tracing::trace!(input = %cleaned, output = %composed, "bank branch canonicalized");
                    composed
                }
            }
            None => base.to_string(),
        }
    }
}

/// Canonicalizes a bank name with English branch locations.
pub fn canonicalize_bank_name(raw: &str) -> String {
    BankNameCanonicalizer::default().canonicalize(raw)
}

/// Canonicalizes a bank name with branch locations in `mode`.
pub fn canonicalize_bank_name_with(raw: &str, mode: LocationMode) -> String {
    BankNameCanonicalizer::new(mode).canonicalize(raw)
}

/// The alias table entry recognized in `raw`, if any.
pub fn recognize_bank(raw: &str) -> Option<&'static AliasEntry> {
    BankNameCanonicalizer::resolve(&BankNameCanonicalizer::clean(raw))
}
