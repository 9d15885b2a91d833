//! Features combined from several raw attributes.

use serde::{Deserialize, Serialize};

use super::categorical::encode_language;
use super::config::FeatureConfig;
use crate::domain::{LanguageProfile, RawIssue};

/// Body length above which an issue counts as described.
const DESCRIBED_BODY_CHARS: usize = 50;
/// Body length above which a non-complex issue takes longer.
const LONG_BODY_CHARS: usize = 500;

/// Derived features of one issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Comments per hundred body characters (plus one).
    pub engagement_ratio: f64,
    /// Fraction of {described body, labels, language} present.
    pub spec_completeness: f64,
    pub issue_maturity: u32,
    pub user_fit_score: f64,
    pub estimated_hours: u32,
}

impl DerivedFeatures {
    /// Feature names and values in their canonical order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("engagement_ratio", self.engagement_ratio),
            ("spec_completeness", self.spec_completeness),
            ("issue_maturity", f64::from(self.issue_maturity)),
            ("user_fit_score", self.user_fit_score),
            ("estimated_hours", f64::from(self.estimated_hours)),
        ]
    }
}

pub fn create_derived_features(
    issue: &RawIssue,
    profile: &LanguageProfile,
    config: &FeatureConfig,
) -> DerivedFeatures {
    let body = issue.body_or_empty();
    let body_len = body.chars().count();
    let comments = issue.comments;
    let label_count = issue.labels.len() as u32;
    let language = issue.language_or_empty();

    let engagement_ratio = f64::from(comments) / (body_len as f64 / 100.0 + 1.0);

    let present = [
        body_len > DESCRIBED_BODY_CHARS,
        !issue.labels.is_empty(),
        !language.is_empty(),
    ];
    let spec_completeness = present.iter().filter(|p| **p).count() as f64 / 3.0;

    let issue_maturity = (comments / 3).saturating_add(label_count).min(5);

    let labels = issue.labels_lowercase();
    let is_beginner = labels
        .iter()
        .any(|l| config.beginner_labels.iter().any(|b| b == l));
    let proficiency = encode_language(language, profile).language_proficiency;
    let user_fit_score = f64::from(proficiency) * 0.5
        + if is_beginner { 3.0 } else { 0.0 }
        + spec_completeness * 2.0;

    let body_lower = body.to_lowercase();
    let labels_joined = labels.join(" ");
    let is_complex = config
        .complexity_indicators
        .iter()
        .any(|term| body_lower.contains(term.as_str()) || labels_joined.contains(term.as_str()));
    let estimated_hours = if is_complex {
        8
    } else if body_len > LONG_BODY_CHARS {
        4
    } else {
        2
    };

    DerivedFeatures {
        engagement_ratio,
        spec_completeness,
        issue_maturity,
        user_fit_score,
        estimated_hours,
    }
}
