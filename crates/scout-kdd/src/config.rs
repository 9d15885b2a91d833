//! Pipeline configuration: scoring weights and term tables.
//!
//! Every heuristic the pipeline applies is data in [`PipelineConfig`], so an
//! alternative weighting scheme is a config file rather than a code change.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use scout_core::{Result, ScoutError};

/// The features of the pipeline's transform vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformFeature {
    LanguageMatch,
    LanguageRank,
    DifficultyScore,
    ComplexityScore,
    EngagementScore,
    LabelCount,
    TitleComplexity,
    BeginnerFriendly,
}

impl TransformFeature {
    pub const ALL: [Self; 8] = [
        Self::LanguageMatch,
        Self::LanguageRank,
        Self::DifficultyScore,
        Self::ComplexityScore,
        Self::EngagementScore,
        Self::LabelCount,
        Self::TitleComplexity,
        Self::BeginnerFriendly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LanguageMatch => "language_match",
            Self::LanguageRank => "language_rank",
            Self::DifficultyScore => "difficulty_score",
            Self::ComplexityScore => "complexity_score",
            Self::EngagementScore => "engagement_score",
            Self::LabelCount => "label_count",
            Self::TitleComplexity => "title_complexity",
            Self::BeginnerFriendly => "beginner_friendly",
        }
    }
}

impl fmt::Display for TransformFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformFeature {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ScoutError::InvalidConfig(format!("unknown transform feature '{s}'")))
    }
}

/// Linear scoring weights, in application order.
///
/// A feature without a weight contributes nothing to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, f64>", into = "IndexMap<String, f64>")]
pub struct ScoringWeights {
    weights: IndexMap<TransformFeature, f64>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::from_pairs([
            (TransformFeature::LanguageMatch, 0.35),
            (TransformFeature::BeginnerFriendly, 0.25),
            (TransformFeature::DifficultyScore, -0.15),
            (TransformFeature::ComplexityScore, -0.10),
            (TransformFeature::EngagementScore, 0.10),
            (TransformFeature::LanguageRank, -0.05),
        ])
    }
}

impl ScoringWeights {
    pub fn from_pairs<I: IntoIterator<Item = (TransformFeature, f64)>>(pairs: I) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Set or replace one weight, keeping its position if already present.
    pub fn with_weight(mut self, feature: TransformFeature, weight: f64) -> Self {
        self.weights.insert(feature, weight);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransformFeature, f64)> + '_ {
        self.weights.iter().map(|(f, w)| (*f, *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<IndexMap<String, f64>> for ScoringWeights {
    type Error = ScoutError;

    fn try_from(raw: IndexMap<String, f64>) -> Result<Self> {
        let weights = raw
            .into_iter()
            .map(|(name, weight)| Ok::<_, ScoutError>((name.parse::<TransformFeature>()?, weight)))
            .collect::<Result<IndexMap<_, _>>>()?;
        Ok(Self { weights })
    }
}

impl From<ScoringWeights> for IndexMap<String, f64> {
    fn from(weights: ScoringWeights) -> Self {
        weights
            .weights
            .into_iter()
            .map(|(f, w)| (f.name().to_string(), w))
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const EASY_TERMS: [&str; 10] = [
    "typo",
    "documentation",
    "docs",
    "readme",
    "beginner",
    "easy",
    "simple",
    "minor",
    "small",
    "first-timer",
];

const HARD_TERMS: [&str; 9] = [
    "complex",
    "refactor",
    "architecture",
    "performance",
    "security",
    "breaking",
    "major",
    "difficult",
    "advanced",
];

/// Settings of a [`KddPipeline`](crate::KddPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of recommendations kept after ranking.
    pub top_n: usize,
    /// Issue language accepted regardless of the profile.
    pub wildcard_language: String,
    pub weights: ScoringWeights,
    /// Labels (lowercase) that mark an issue as beginner friendly.
    pub beginner_labels: Vec<String>,
    /// Terms that lower difficulty by one when found in labels or title.
    pub easy_terms: Vec<String>,
    /// Terms that raise difficulty by one when found in labels or title.
    pub hard_terms: Vec<String>,
    /// Easy terms used by the standalone difficulty estimator.
    pub estimator_easy_terms: Vec<String>,
    /// Body length above which the standalone estimator adds one.
    pub estimator_long_body_chars: usize,
    pub base_difficulty: i32,
    pub min_difficulty: i32,
    pub max_difficulty: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let mut estimator_easy_terms = strings(&EASY_TERMS);
        estimator_easy_terms.push("good first issue".to_string());
        Self {
            top_n: 10,
            wildcard_language: "Any".to_string(),
            weights: ScoringWeights::default(),
            beginner_labels: strings(&[
                "good first issue",
                "beginner",
                "easy",
                "starter",
                "first-timers-only",
            ]),
            easy_terms: strings(&EASY_TERMS),
            hard_terms: strings(&HARD_TERMS),
            estimator_easy_terms,
            estimator_long_body_chars: 1000,
            base_difficulty: 3,
            min_difficulty: 1,
            max_difficulty: 5,
        }
    }
}

impl PipelineConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((feature, weight)) = self.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ScoutError::InvalidConfig(format!(
                "pipeline weight for {feature} is not finite: {weight}"
            )));
        }
        if self.min_difficulty > self.max_difficulty {
            return Err(ScoutError::InvalidConfig(format!(
                "pipeline difficulty range is empty: {}..={}",
                self.min_difficulty, self.max_difficulty
            )));
        }
        if self.min_difficulty < 0 || self.max_difficulty > i32::from(u8::MAX) {
            return Err(ScoutError::InvalidConfig(
                "pipeline difficulty bounds must lie within 0..=255".to_string(),
            ));
        }
        Ok(())
    }

    /// SHA-256 hex digest of the config's JSON form.
    ///
    /// Field and weight order are fixed by the type, so equal configs hash
    /// equal.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hex::encode(hasher.finalize()))
    }
}
