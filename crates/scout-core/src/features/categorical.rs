//! Label and language encodings.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::config::FeatureConfig;
use super::text::flag;
use crate::domain::LanguageProfile;

/// Rank reported for a language missing from the profile; worse than any
/// real rank.
pub const UNKNOWN_LANGUAGE_RANK: usize = 99;

/// Feature name of a label's multi-hot slot: `label_` + label with spaces
/// replaced by underscores.
pub fn label_feature_key(label: &str) -> String {
    format!("label_{}", label.replace(' ', "_"))
}

/// Multi-hot encoding of an issue's labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoding {
    /// One 0/1 slot per configured important label, keyed by
    /// [`label_feature_key`].
    pub flags: IndexMap<String, u8>,
    pub total_labels: usize,
    pub has_priority_label: bool,
    pub has_type_label: bool,
}

impl LabelEncoding {
    /// Feature names and values in their canonical order.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .flags
            .iter()
            .map(|(k, v)| (k.clone(), f64::from(*v)))
            .collect();
        out.push(("total_labels".to_string(), self.total_labels as f64));
        out.push((
            "has_priority_label".to_string(),
            flag(self.has_priority_label),
        ));
        out.push(("has_type_label".to_string(), flag(self.has_type_label)));
        out
    }
}

/// Encode `labels` case-insensitively against the configured vocabulary.
pub fn encode_labels(labels: &[String], config: &FeatureConfig) -> LabelEncoding {
    let normalized: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    let has = |label: &str| normalized.iter().any(|l| l == label);

    let flags = config
        .important_labels
        .iter()
        .map(|label| (label_feature_key(label), u8::from(has(label))))
        .collect();

    LabelEncoding {
        flags,
        total_labels: labels.len(),
        has_priority_label: normalized
            .iter()
            .any(|l| l.contains(config.priority_marker.as_str())),
        has_type_label: config.type_labels.iter().any(|t| has(t)),
    }
}

/// An issue's language relative to the caller's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEncoding {
    pub language_known: bool,
    /// 1-indexed profile rank, or [`UNKNOWN_LANGUAGE_RANK`].
    pub language_rank: usize,
    /// Positional weight `max(1, 10 - position)`, 0 when unknown.
    pub language_proficiency: u32,
    pub language_repo_count: u32,
}

impl LanguageEncoding {
    pub const UNKNOWN: Self = Self {
        language_known: false,
        language_rank: UNKNOWN_LANGUAGE_RANK,
        language_proficiency: 0,
        language_repo_count: 0,
    };

    /// Feature names and values in their canonical order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("language_known", flag(self.language_known)),
            ("language_rank", self.language_rank as f64),
            ("language_proficiency", f64::from(self.language_proficiency)),
            ("language_repo_count", f64::from(self.language_repo_count)),
        ]
    }
}

/// Encode `language` against `profile`.
pub fn encode_language(language: &str, profile: &LanguageProfile) -> LanguageEncoding {
    match profile.standing(language) {
        Some(standing) => LanguageEncoding {
            language_known: true,
            language_rank: standing.rank,
            language_proficiency: standing.rank_weight,
            language_repo_count: standing.repo_count,
        },
        None => LanguageEncoding::UNKNOWN,
    }
}
