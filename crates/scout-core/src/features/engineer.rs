//! The full per-issue feature vector and batch statistics.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::categorical::{encode_labels, encode_language, LabelEncoding, LanguageEncoding};
use super::config::FeatureConfig;
use super::derived::{create_derived_features, DerivedFeatures};
use super::numeric::{mean_and_std, normalize_features, NormalizationMethod};
use super::text::{extract_text_features, TextFeatures};
use super::tfidf::{TermWeights, TfIdfModel};
use super::FeatureExtractor;
use crate::domain::{LanguageProfile, RawIssue};
use crate::obs::emit_features_extracted;

/// Distribution of one numeric feature across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl FeatureStats {
    fn from_values(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (mean, std) = mean_and_std(values);
        Self { min, max, mean, std }
    }
}

/// Batch statistics keyed by feature name.
pub type BatchStats = IndexMap<String, FeatureStats>;

/// The engineer's full feature vector for one issue.
///
/// Keys are flat feature names (`title_word_count`, `label_bug`,
/// `language_rank`, ...); values are numeric or 0/1 flags. The originating
/// issue travels with the vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredFeatures {
    pub issue: RawIssue,
    pub values: IndexMap<String, f64>,
}

impl EngineeredFeatures {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

/// Feature engineering over issues and a language profile.
///
/// Holds the vocabulary/IDF table of the last [`calculate_tfidf`] call and
/// the statistics of the last [`extract_features_batch`] call. Both are
/// replaced, never merged, by the next call.
///
/// [`calculate_tfidf`]: FeatureEngineer::calculate_tfidf
/// [`extract_features_batch`]: FeatureEngineer::extract_features_batch
#[derive(Debug, Clone, Default)]
pub struct FeatureEngineer {
    config: FeatureConfig,
    tfidf: TfIdfModel,
    feature_stats: BatchStats,
}

impl FeatureEngineer {
    pub fn new(config: FeatureConfig) -> Self {
        Self {
            config,
            tfidf: TfIdfModel::default(),
            feature_stats: BatchStats::new(),
        }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn extract_text_features(&self, text: &str) -> TextFeatures {
        extract_text_features(text, &self.config)
    }

    /// Fit TF-IDF on `documents`, replacing the cached vocabulary and IDF
    /// table.
    pub fn calculate_tfidf<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<TermWeights> {
        let (model, weights) = TfIdfModel::fit_transform(documents);
        debug!(
            documents = documents.len(),
            vocabulary = model.vocabulary().len(),
            "tf-idf fitted"
        );
        self.tfidf = model;
        weights
    }

    /// The model fitted by the last [`calculate_tfidf`](Self::calculate_tfidf) call.
    pub fn tfidf(&self) -> &TfIdfModel {
        &self.tfidf
    }

    pub fn normalize_features(&self, values: &[f64], method: NormalizationMethod) -> Vec<f64> {
        normalize_features(values, method)
    }

    pub fn bin_numerical(&self, value: f64) -> &str {
        self.config.bins.label_for(value)
    }

    pub fn encode_labels(&self, labels: &[String]) -> LabelEncoding {
        encode_labels(labels, &self.config)
    }

    pub fn encode_language(&self, language: &str, profile: &LanguageProfile) -> LanguageEncoding {
        encode_language(language, profile)
    }

    pub fn create_derived_features(
        &self,
        issue: &RawIssue,
        profile: &LanguageProfile,
    ) -> DerivedFeatures {
        create_derived_features(issue, profile, &self.config)
    }

    /// Popularity heuristic keyed on well-known organization names.
    pub fn estimate_repo_popularity(&self, repo: &str) -> f64 {
        let repo = repo.to_lowercase();
        if self
            .config
            .popular_orgs
            .iter()
            .any(|org| repo.contains(org.as_str()))
        {
            self.config.popular_repo_score
        } else {
            self.config.default_repo_score
        }
    }

    /// Complete feature vector for one issue.
    pub fn extract_all_features(
        &self,
        issue: &RawIssue,
        profile: &LanguageProfile,
    ) -> EngineeredFeatures {
        let mut values: IndexMap<String, f64> = IndexMap::new();

        for (name, value) in self.extract_text_features(issue.title_or_empty()).entries() {
            values.insert(format!("title_{name}"), value);
        }
        for (name, value) in self.extract_text_features(issue.body_or_empty()).entries() {
            values.insert(format!("body_{name}"), value);
        }
        values.extend(self.encode_labels(&issue.labels).entries());
        for (name, value) in self
            .encode_language(issue.language_or_empty(), profile)
            .entries()
        {
            values.insert(name.to_string(), value);
        }
        for (name, value) in self.create_derived_features(issue, profile).entries() {
            values.insert(name.to_string(), value);
        }
        values.insert("comments".to_string(), f64::from(issue.comments));
        values.insert(
            "repo_popularity".to_string(),
            self.estimate_repo_popularity(issue.repo_or_empty()),
        );

        EngineeredFeatures {
            issue: issue.clone(),
            values,
        }
    }

    /// Extract every issue's features and recompute the batch statistics.
    ///
    /// Per-issue extraction runs in parallel; statistics are computed in a
    /// single pass afterwards and replace the cached ones (an empty batch
    /// leaves them empty).
    pub fn extract_features_batch(
        &mut self,
        issues: &[RawIssue],
        profile: &LanguageProfile,
    ) -> (Vec<EngineeredFeatures>, BatchStats) {
        let vectors: Vec<EngineeredFeatures> = {
            let this = &*self;
            issues
                .par_iter()
                .map(|issue| this.extract_all_features(issue, profile))
                .collect()
        };

        let mut stats = BatchStats::new();
        if let Some(first) = vectors.first() {
            for key in first.values.keys() {
                let column: Vec<f64> = vectors
                    .iter()
                    .map(|v| v.get(key).unwrap_or(0.0))
                    .collect();
                stats.insert(key.clone(), FeatureStats::from_values(&column));
            }
        }

        emit_features_extracted(vectors.len(), stats.len());
        self.feature_stats = stats.clone();
        (vectors, stats)
    }

    /// Statistics of the last batch.
    pub fn feature_stats(&self) -> &BatchStats {
        &self.feature_stats
    }
}

impl FeatureExtractor for FeatureEngineer {
    type Input = RawIssue;
    type Output = EngineeredFeatures;

    fn name(&self) -> &'static str {
        "feature_engineer"
    }

    fn extract(&self, issue: &RawIssue, profile: &LanguageProfile) -> EngineeredFeatures {
        self.extract_all_features(issue, profile)
    }
}
