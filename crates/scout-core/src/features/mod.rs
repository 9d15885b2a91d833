//! Feature engineering for issue recommendation.
//!
//! Converts raw issues plus a language profile into ML-ready features:
//! - text statistics and TF-IDF term weights
//! - min-max / z-score scaling and binning
//! - multi-hot label and profile-relative language encodings
//! - derived ratios and heuristics
//!
//! Two extraction strategies exist in the workspace and implement
//! [`FeatureExtractor`] independently: [`FeatureEngineer`] here, producing
//! the wide [`EngineeredFeatures`] map, and the KDD pipeline's compact
//! transform in `scout-kdd`. Their outputs are distinct types and are never
//! merged.

pub mod categorical;
pub mod config;
pub mod derived;
pub mod engineer;
pub mod numeric;
pub mod text;
pub mod tfidf;

use crate::domain::LanguageProfile;

pub use categorical::{
    encode_labels, encode_language, label_feature_key, LabelEncoding, LanguageEncoding,
    UNKNOWN_LANGUAGE_RANK,
};
pub use config::{BinSpec, FeatureConfig};
pub use derived::{create_derived_features, DerivedFeatures};
pub use engineer::{BatchStats, EngineeredFeatures, FeatureEngineer, FeatureStats};
pub use numeric::{mean_and_std, normalize_features, NormalizationMethod};
pub use text::{extract_text_features, round_to, tokenize, TextFeatures};
pub use tfidf::{TermWeights, TfIdfModel};

/// A strategy that turns one issue into a feature representation.
pub trait FeatureExtractor {
    /// The issue form this strategy reads.
    type Input: ?Sized;
    /// The feature representation it produces.
    type Output;

    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    fn extract(&self, issue: &Self::Input, profile: &LanguageProfile) -> Self::Output;

    /// Extract every issue in order.
    fn extract_all(&self, issues: &[Self::Input], profile: &LanguageProfile) -> Vec<Self::Output>
    where
        Self::Input: Sized,
    {
        issues.iter().map(|i| self.extract(i, profile)).collect()
    }
}
