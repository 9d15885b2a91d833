//! A contributor's language profile.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One `(language, repo_count)` entry of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct LanguageEntry {
    pub name: String,
    pub repo_count: u32,
}

impl From<(String, u32)> for LanguageEntry {
    fn from((name, repo_count): (String, u32)) -> Self {
        Self { name, repo_count }
    }
}

impl From<LanguageEntry> for (String, u32) {
    fn from(entry: LanguageEntry) -> Self {
        (entry.name, entry.repo_count)
    }
}

/// Where a language sits in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageStanding {
    /// 1-indexed position in the profile.
    pub rank: usize,
    pub repo_count: u32,
    /// `max(1, 10 - position)`, the positional weight.
    pub rank_weight: u32,
}

impl LanguageStanding {
    fn at(position: usize, repo_count: u32) -> Self {
        let rank_weight = 10usize.saturating_sub(position).max(1) as u32;
        Self {
            rank: position + 1,
            repo_count,
            rank_weight,
        }
    }

    /// `rank_weight * repo_count`.
    pub fn proficiency_score(&self) -> u64 {
        u64::from(self.rank_weight) * u64::from(self.repo_count)
    }
}

/// Ordered `(language, repo_count)` pairs, most-used language first.
///
/// Rank is positional. The order given by the caller is authoritative and
/// is not re-sorted. When a name appears twice the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageProfile {
    entries: Vec<LanguageEntry>,
}

impl LanguageProfile {
    pub fn new(entries: Vec<LanguageEntry>) -> Self {
        Self { entries }
    }

    /// Build a profile from `(name, count)` pairs, keeping their order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, repo_count)| LanguageEntry {
                    name: name.into(),
                    repo_count,
                })
                .collect(),
        }
    }

    /// Aggregate the primary language of each of a user's repositories.
    ///
    /// Repositories without a language are skipped. Entries are ordered by
    /// descending count; ties keep first-seen order.
    pub fn from_repo_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        for lang in languages.into_iter().flatten() {
            let lang = lang.as_ref();
            if lang.is_empty() {
                continue;
            }
            *counts.entry(lang.to_string()).or_insert(0) += 1;
        }

        let mut entries: Vec<LanguageEntry> = counts
            .into_iter()
            .map(|(name, repo_count)| LanguageEntry { name, repo_count })
            .collect();
        entries.sort_by(|a, b| b.repo_count.cmp(&a.repo_count));
        Self { entries }
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, language: &str) -> bool {
        self.names().any(|n| n == language)
    }

    /// Rank, repo count and positional weight of `language`, if known.
    pub fn standing(&self, language: &str) -> Option<LanguageStanding> {
        self.entries
            .iter()
            .position(|e| e.name == language)
            .map(|i| LanguageStanding::at(i, self.entries[i].repo_count))
    }
}
