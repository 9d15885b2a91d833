//! Content-based scoring and ranking.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use scout_core::{CleanedIssue, ItemKey};

use super::transformation::TransformFeatures;
use crate::config::PipelineConfig;
use crate::stage::{MiningStats, ScoreRange};

pub const MINING_ALGORITHM: &str = "Content-Based Filtering";

/// A ranked issue with its score and per-feature contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub features: TransformFeatures,
    pub score: f64,
    /// `weight * value` per weighted feature, in weight order.
    pub contributions: IndexMap<String, f64>,
}

impl ScoredRecommendation {
    pub fn issue(&self) -> &CleanedIssue {
        &self.features.issue
    }

    pub fn difficulty(&self) -> u8 {
        self.features.difficulty_score
    }
}

impl ItemKey for ScoredRecommendation {
    fn item_key(&self) -> &str {
        self.features.item_key()
    }
}

/// Score one feature vector with the configured weights.
pub fn score(features: TransformFeatures, config: &PipelineConfig) -> ScoredRecommendation {
    let contributions: IndexMap<String, f64> = config
        .weights
        .iter()
        .map(|(feature, weight)| (feature.name().to_string(), weight * features.value(feature)))
        .collect();
    let score = contributions.values().sum();
    ScoredRecommendation {
        features,
        score,
        contributions,
    }
}

/// Score every vector, rank by descending score and keep the top N.
///
/// The sort is stable: equal scores keep their input order.
pub fn mine(
    features: Vec<TransformFeatures>,
    config: &PipelineConfig,
) -> (Vec<ScoredRecommendation>, MiningStats) {
    let mut scored: Vec<ScoredRecommendation> =
        features.into_iter().map(|f| score(f, config)).collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let total_scored = scored.len();
    let score_range = if scored.is_empty() {
        ScoreRange {
            max: 0.0,
            min: 0.0,
            avg: 0.0,
        }
    } else {
        let scores = scored.iter().map(|s| s.score);
        ScoreRange {
            max: scores.clone().fold(f64::NEG_INFINITY, f64::max),
            min: scores.clone().fold(f64::INFINITY, f64::min),
            avg: scores.sum::<f64>() / total_scored as f64,
        }
    };

    scored.truncate(config.top_n);
    let stats = MiningStats {
        algorithm: MINING_ALGORITHM.to_string(),
        total_scored,
        top_n_selected: scored.len(),
        score_range,
    };
    (scored, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScoringWeights, TransformFeature};
    use crate::stages::transformation::KddTransform;
    use scout_core::{FeatureExtractor, LanguageProfile, RawIssue};

    fn vectors(issues: Vec<RawIssue>, profile: &LanguageProfile) -> Vec<TransformFeatures> {
        let config = PipelineConfig::default();
        let cleaned: Vec<CleanedIssue> = issues.iter().map(CleanedIssue::from_raw).collect();
        KddTransform::new(&config).extract_all(&cleaned, profile)
    }

    #[test]
    fn test_documented_example_score() {
        let profile = LanguageProfile::from_pairs([("Python", 5)]);
        let features = vectors(
            vec![RawIssue::new("Fix typo in README", "u")
                .with_labels(["documentation", "good first issue"])
                .with_language("Python")],
            &profile,
        );
        let rec = score(features[0].clone(), &PipelineConfig::default());
        // 0.35*50 + 0.25*1 - 0.15*2 - 0.10*0 + 0.10*0 - 0.05*1
        assert!((rec.score - 17.4).abs() < 1e-9);
        assert_eq!(rec.contributions.len(), 6);
        assert!((rec.contributions["language_match"] - 17.5).abs() < 1e-9);
        assert_eq!(rec.contributions.get("title_complexity"), None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let profile = LanguageProfile::default();
        let issues: Vec<RawIssue> = (0..5).map(|i| RawIssue::new("same", format!("u{i}"))).collect();
        let (ranked, _) = mine(vectors(issues, &profile), &PipelineConfig::default());
        let urls: Vec<&str> = ranked.iter().map(|r| r.issue().url.as_str()).collect();
        assert_eq!(urls, vec!["u0", "u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_ranks_descending_and_truncates() {
        let profile = LanguageProfile::from_pairs([("Rust", 4), ("Go", 1)]);
        let issues = vec![
            RawIssue::new("go issue", "go").with_language("Go"),
            RawIssue::new("rust issue", "rust").with_language("Rust"),
            RawIssue::new("unknown", "none").with_language("Zig"),
        ];
        let config = PipelineConfig::default().with_top_n(2);
        let (ranked, stats) = mine(vectors(issues, &profile), &config);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item_key(), "rust");
        assert_eq!(ranked[1].item_key(), "go");
        assert_eq!(stats.algorithm, "Content-Based Filtering");
        assert_eq!(stats.total_scored, 3);
        assert_eq!(stats.top_n_selected, 2);
        assert!(stats.score_range.min < 0.0);
        assert!(stats.score_range.max > stats.score_range.avg);
    }

    #[test]
    fn test_custom_weights_change_ranking() {
        let profile = LanguageProfile::default();
        let issues = vec![
            RawIssue::new("quiet", "quiet"),
            RawIssue::new("busy", "busy").with_comments(10),
        ];
        let weights = ScoringWeights::from_pairs([(TransformFeature::EngagementScore, -1.0)]);
        let config = PipelineConfig::default().with_weights(weights);
        let (ranked, _) = mine(vectors(issues, &profile), &config);
        assert_eq!(ranked[0].item_key(), "quiet");
        assert_eq!(ranked[1].score, -5.0);
    }

    #[test]
    fn test_empty_input() {
        let (ranked, stats) = mine(Vec::new(), &PipelineConfig::default());
        assert!(ranked.is_empty());
        assert_eq!(stats.total_scored, 0);
        assert_eq!(stats.score_range.avg, 0.0);
    }
}
