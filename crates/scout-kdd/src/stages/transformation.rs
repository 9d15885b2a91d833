//! The pipeline's compact transform vector and the difficulty heuristics.

use serde::{Deserialize, Serialize};

use scout_core::features::UNKNOWN_LANGUAGE_RANK;
use scout_core::{CleanedIssue, FeatureExtractor, ItemKey, LanguageProfile, RawIssue};

use crate::config::{PipelineConfig, TransformFeature};
use crate::stage::TransformStats;

/// Cap shared by the bucketed length and engagement features.
const BUCKET_CAP: usize = 5;
const BODY_CHARS_PER_COMPLEXITY: usize = 200;
const COMMENTS_PER_ENGAGEMENT: u32 = 2;
const TITLE_CHARS_PER_COMPLEXITY: usize = 20;

/// The seven scored features of one issue plus the beginner flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformFeatures {
    pub issue: CleanedIssue,
    /// Profile proficiency score, 0 when the language is not in the profile.
    pub language_match: u64,
    pub language_rank: usize,
    pub difficulty_score: u8,
    pub complexity_score: usize,
    pub engagement_score: u32,
    pub label_count: usize,
    pub title_complexity: usize,
    pub beginner_friendly: bool,
}

impl TransformFeatures {
    /// Numeric value of `feature` as used for scoring.
    pub fn value(&self, feature: TransformFeature) -> f64 {
        match feature {
            TransformFeature::LanguageMatch => self.language_match as f64,
            TransformFeature::LanguageRank => self.language_rank as f64,
            TransformFeature::DifficultyScore => f64::from(self.difficulty_score),
            TransformFeature::ComplexityScore => self.complexity_score as f64,
            TransformFeature::EngagementScore => f64::from(self.engagement_score),
            TransformFeature::LabelCount => self.label_count as f64,
            TransformFeature::TitleComplexity => self.title_complexity as f64,
            TransformFeature::BeginnerFriendly => {
                if self.beginner_friendly {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl ItemKey for TransformFeatures {
    fn item_key(&self) -> &str {
        self.issue.item_key()
    }
}

/// Apply the easy/hard term adjustments to the base difficulty.
///
/// A term matches when it equals a label or occurs in the title. Only the
/// first matching easy term and the first matching hard term count.
fn adjusted_difficulty(labels: &[String], title: &str, easy: &[String], hard: &[String], base: i32) -> i32 {
    let matches = |term: &String| labels.iter().any(|l| l == term) || title.contains(term.as_str());
    let mut difficulty = base;
    if easy.iter().any(matches) {
        difficulty -= 1;
    }
    if hard.iter().any(matches) {
        difficulty += 1;
    }
    difficulty
}

fn clamp_difficulty(difficulty: i32, config: &PipelineConfig) -> u8 {
    let clamped = difficulty.clamp(config.min_difficulty, config.max_difficulty);
    u8::try_from(clamped).unwrap_or(u8::MAX)
}

/// Difficulty of a cleaned issue, clamped to the configured range.
pub fn calculate_difficulty(issue: &CleanedIssue, config: &PipelineConfig) -> u8 {
    let difficulty = adjusted_difficulty(
        &issue.labels_lowercase(),
        &issue.title_normalized,
        &config.easy_terms,
        &config.hard_terms,
        config.base_difficulty,
    );
    clamp_difficulty(difficulty, config)
}

/// Standalone difficulty estimate for a raw issue.
///
/// Uses the estimator's easy terms and adds one for a long body.
pub fn estimate_issue_difficulty(issue: &RawIssue, config: &PipelineConfig) -> u8 {
    let mut difficulty = adjusted_difficulty(
        &issue.labels_lowercase(),
        &issue.title_or_empty().to_lowercase(),
        &config.estimator_easy_terms,
        &config.hard_terms,
        config.base_difficulty,
    );
    if issue.body_or_empty().chars().count() > config.estimator_long_body_chars {
        difficulty += 1;
    }
    clamp_difficulty(difficulty, config)
}

/// The pipeline's feature-extraction strategy.
#[derive(Debug, Clone, Copy)]
pub struct KddTransform<'a> {
    config: &'a PipelineConfig,
}

impl<'a> KddTransform<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }
}

impl FeatureExtractor for KddTransform<'_> {
    type Input = CleanedIssue;
    type Output = TransformFeatures;

    fn name(&self) -> &'static str {
        "kdd_transform"
    }

    fn extract(&self, issue: &CleanedIssue, profile: &LanguageProfile) -> TransformFeatures {
        let (language_match, language_rank) = match profile.standing(&issue.language) {
            Some(standing) => (standing.proficiency_score(), standing.rank),
            None => (0, UNKNOWN_LANGUAGE_RANK),
        };
        let labels = issue.labels_lowercase();
        let beginner_friendly = self
            .config
            .beginner_labels
            .iter()
            .any(|b| labels.iter().any(|l| l == b));

        TransformFeatures {
            language_match,
            language_rank,
            difficulty_score: calculate_difficulty(issue, self.config),
            complexity_score: (issue.body.chars().count() / BODY_CHARS_PER_COMPLEXITY).min(BUCKET_CAP),
            engagement_score: (issue.comments / COMMENTS_PER_ENGAGEMENT).min(BUCKET_CAP as u32),
            label_count: issue.labels.len(),
            title_complexity: (issue.title.chars().count() / TITLE_CHARS_PER_COMPLEXITY).min(BUCKET_CAP),
            beginner_friendly,
            issue: issue.clone(),
        }
    }
}

/// Transform every cleaned issue.
pub fn transform(
    issues: &[CleanedIssue],
    profile: &LanguageProfile,
    config: &PipelineConfig,
) -> (Vec<TransformFeatures>, TransformStats) {
    let features = KddTransform::new(config).extract_all(issues, profile);
    let avg_difficulty = if features.is_empty() {
        0.0
    } else {
        features
            .iter()
            .map(|f| f64::from(f.difficulty_score))
            .sum::<f64>()
            / features.len() as f64
    };
    let stats = TransformStats {
        features_extracted: 7,
        samples_transformed: features.len(),
        avg_difficulty,
    };
    (features, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(raw: RawIssue) -> CleanedIssue {
        CleanedIssue::from_raw(&raw)
    }

    #[test]
    fn test_documented_example() {
        let issue = cleaned(
            RawIssue::new("Fix typo in README", "u")
                .with_labels(["documentation", "good first issue"])
                .with_language("Python")
                .with_body(""),
        );
        let config = PipelineConfig::default();
        let profile = LanguageProfile::from_pairs([("Python", 5)]);
        let features = KddTransform::new(&config).extract(&issue, &profile);

        assert_eq!(features.difficulty_score, 2);
        assert!(features.beginner_friendly);
        assert_eq!(features.language_match, 50);
        assert_eq!(features.language_rank, 1);
        assert_eq!(features.complexity_score, 0);
        assert_eq!(features.label_count, 2);
    }

    #[test]
    fn test_unknown_language_sentinels() {
        let config = PipelineConfig::default();
        let features = KddTransform::new(&config).extract(
            &cleaned(RawIssue::new("x", "u").with_language("COBOL")),
            &LanguageProfile::from_pairs([("Python", 5)]),
        );
        assert_eq!(features.language_match, 0);
        assert_eq!(features.language_rank, 99);
    }

    #[test]
    fn test_buckets_are_capped() {
        let config = PipelineConfig::default();
        let issue = cleaned(
            RawIssue::new("t".repeat(500), "u")
                .with_body("b".repeat(5000))
                .with_comments(40),
        );
        let f = KddTransform::new(&config).extract(&issue, &LanguageProfile::default());
        assert_eq!(f.complexity_score, 5);
        assert_eq!(f.engagement_score, 5);
        assert_eq!(f.title_complexity, 5);

        let small = cleaned(RawIssue::new("a".repeat(45), "u").with_body("b".repeat(450)).with_comments(3));
        let f = KddTransform::new(&config).extract(&small, &LanguageProfile::default());
        assert_eq!(f.complexity_score, 2);
        assert_eq!(f.engagement_score, 1);
        assert_eq!(f.title_complexity, 2);
    }

    #[test]
    fn test_difficulty_counts_each_direction_once() {
        let config = PipelineConfig::default();
        let easy_twice = cleaned(RawIssue::new("Simple small typo", "u").with_labels(["easy"]));
        assert_eq!(calculate_difficulty(&easy_twice, &config), 2);

        let both = cleaned(RawIssue::new("Minor security fix", "u"));
        assert_eq!(calculate_difficulty(&both, &config), 3);

        let hard = cleaned(RawIssue::new("Refactor architecture", "u").with_labels(["Performance"]));
        assert_eq!(calculate_difficulty(&hard, &config), 4);
    }

    #[test]
    fn test_label_terms_match_whole_labels_only() {
        let config = PipelineConfig::default();
        // "docs-needed" is not the label "docs"; the title has no easy term.
        let issue = cleaned(RawIssue::new("Parser crash", "u").with_labels(["docs-needed"]));
        assert_eq!(calculate_difficulty(&issue, &config), 3);
    }

    #[test]
    fn test_estimator_extra_term_and_long_body() {
        let config = PipelineConfig::default();
        let gfi = RawIssue::new("Parser crash", "u").with_labels(["good first issue"]);
        assert_eq!(estimate_issue_difficulty(&gfi, &config), 2);
        assert_eq!(calculate_difficulty(&cleaned(gfi), &config), 3);

        let long = RawIssue::new("Breaking change in API", "u").with_body("x".repeat(1001));
        assert_eq!(estimate_issue_difficulty(&long, &config), 5);

        let exactly = RawIssue::new("Parser crash", "u").with_body("x".repeat(1000));
        assert_eq!(estimate_issue_difficulty(&exactly, &config), 3);
    }

    #[test]
    fn test_difficulty_clamps_to_configured_range() {
        let config = PipelineConfig {
            base_difficulty: 1,
            ..PipelineConfig::default()
        };
        let easy = cleaned(RawIssue::new("typo", "u"));
        assert_eq!(calculate_difficulty(&easy, &config), 1);

        let config = PipelineConfig {
            base_difficulty: 5,
            ..PipelineConfig::default()
        };
        let hard = RawIssue::new("complex", "u").with_body("x".repeat(2000));
        assert_eq!(estimate_issue_difficulty(&hard, &config), 5);
    }

    #[test]
    fn test_transform_stats() {
        let config = PipelineConfig::default();
        let issues = vec![
            cleaned(RawIssue::new("typo", "u1")),
            cleaned(RawIssue::new("refactor", "u2")),
        ];
        let (features, stats) = transform(&issues, &LanguageProfile::default(), &config);
        assert_eq!(features.len(), 2);
        assert_eq!(stats.features_extracted, 7);
        assert_eq!(stats.samples_transformed, 2);
        assert_eq!(stats.avg_difficulty, 3.0);

        let (_, empty) = transform(&[], &LanguageProfile::default(), &config);
        assert_eq!(empty.avg_difficulty, 0.0);
    }
}
