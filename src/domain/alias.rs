//! Alias dictionary with exact and longest-substring resolution.

use std::cmp::Reverse;

/// One canonical entity and the lowercase spellings that map to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl AliasEntry {
    pub const fn new(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { canonical, aliases }
    }

    /// True when the canonical form or any alias occurs in `lowered`.
    ///
    /// `lowered` must already be lowercased. Aliases are stored lowercase.
    pub fn occurs_in(&self, lowered: &str) -> bool {
        self.longest_occurrence(lowered).is_some()
    }

    /// True when `lowered` is exactly the canonical form or one alias.
    pub fn is_spelled(&self, lowered: &str) -> bool {
        self.canonical.to_lowercase() == lowered || self.aliases.iter().any(|a| *a == lowered)
    }

    /// Byte length of the longest spelling found inside `lowered`.
    fn longest_occurrence(&self, lowered: &str) -> Option<usize> {
        let canonical = self.canonical.to_lowercase();
        std::iter::once(canonical.as_str())
            .chain(self.aliases.iter().copied())
            .filter(|spelling| lowered.contains(spelling))
            .map(str::len)
            .max()
    }
}

/// Ordered, read-only alias table.
///
/// Input that is exactly one entry's spelling resolves to that entry.
/// Otherwise the entry with the longest spelling occurring in the input
/// wins, and equally long hits go to the earlier entry. There is no
/// word-boundary check, so a short alias still fires inside an unrelated
/// token: `"abc"` inside `"abc bank"` resolves to the entry that owns it.
#[derive(Debug, Clone, Copy)]
pub struct AliasDictionary {
    entries: &'static [AliasEntry],
}

impl AliasDictionary {
    pub const fn new(entries: &'static [AliasEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [AliasEntry] {
        self.entries
    }

    /// Finds the entry named by `text`.
    pub fn resolve(&self, text: &str) -> Option<&'static AliasEntry> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.is_spelled(&lowered))
            .or_else(|| {
                self.entries
                    .iter()
                    .filter_map(|e| e.longest_occurrence(&lowered).map(|len| (e, len)))
                    .min_by_key(|(_, len)| Reverse(*len))
                    .map(|(e, _)| e)
            })
    }

    /// Looks up an entry by its exact canonical name.
    pub fn by_canonical(&self, canonical: &str) -> Option<&'static AliasEntry> {
        self.entries.iter().find(|e| e.canonical == canonical)
    }
}
