//! Summaries and insights over the ranked recommendations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use scout_core::features::round_to;

use super::mining::ScoredRecommendation;

const BEGINNER_MAX_DIFFICULTY: f64 = 2.0;
const INTERMEDIATE_MAX_DIFFICULTY: f64 = 3.5;
/// More distinct languages than this counts as a diverse set.
const DIVERSE_LANGUAGE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// Recommendations scoring above the average.
    pub high: usize,
    /// Recommendations scoring at or below the average.
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationStatistics {
    pub avg_recommendation_score: f64,
    pub avg_difficulty: f64,
    /// Recommendation count per language, in first-seen order.
    pub language_distribution: IndexMap<String, usize>,
    pub score_distribution: ScoreDistribution,
}

/// Human-readable reading of a recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub summary: String,
    pub insights: Vec<String>,
    /// `avg_score * 20 + 50`, truncated and clamped to `0..=100`.
    pub quality_score: u32,
    /// Absent when there are no recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<InterpretationStatistics>,
}

impl Interpretation {
    fn empty() -> Self {
        Self {
            summary: "No recommendations generated".to_string(),
            insights: Vec::new(),
            quality_score: 0,
            statistics: None,
        }
    }
}

fn difficulty_insight(avg_difficulty: f64) -> &'static str {
    if avg_difficulty <= BEGINNER_MAX_DIFFICULTY {
        "Difficulty level: Beginner-friendly recommendations"
    } else if avg_difficulty <= INTERMEDIATE_MAX_DIFFICULTY {
        "Difficulty level: Intermediate recommendations"
    } else {
        "Difficulty level: Advanced recommendations"
    }
}

fn quality_score(avg_score: f64) -> u32 {
    (avg_score * 20.0 + 50.0).trunc().clamp(0.0, 100.0) as u32
}

pub fn interpret(recommendations: &[ScoredRecommendation]) -> Interpretation {
    if recommendations.is_empty() {
        return Interpretation::empty();
    }

    let n = recommendations.len() as f64;
    let avg_score = recommendations.iter().map(|r| r.score).sum::<f64>() / n;
    let avg_difficulty = recommendations
        .iter()
        .map(|r| f64::from(r.difficulty()))
        .sum::<f64>()
        / n;

    let mut language_distribution: IndexMap<String, usize> = IndexMap::new();
    for rec in recommendations {
        *language_distribution
            .entry(rec.issue().language.clone())
            .or_insert(0) += 1;
    }

    // Highest count wins; ties go to the language seen first.
    let (top_language, top_count) = language_distribution
        .iter()
        .fold(None::<(&String, usize)>, |best, (lang, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((lang, count)),
        })
        .map(|(lang, count)| (lang.as_str(), count))
        .unwrap_or(("Unknown", 0));

    let insights = vec![
        format!("Primary language focus: {top_language} ({top_count} issues)"),
        difficulty_insight(avg_difficulty).to_string(),
        if language_distribution.len() > DIVERSE_LANGUAGE_COUNT {
            "Good diversity across multiple languages".to_string()
        } else {
            "Focused recommendations in specific languages".to_string()
        },
    ];

    let high = recommendations.iter().filter(|r| r.score > avg_score).count();
    let statistics = InterpretationStatistics {
        avg_recommendation_score: round_to(avg_score, 3),
        avg_difficulty: round_to(avg_difficulty, 2),
        score_distribution: ScoreDistribution {
            high,
            low: recommendations.len() - high,
        },
        language_distribution,
    };

    Interpretation {
        summary: format!(
            "Generated {} personalized recommendations",
            recommendations.len()
        ),
        insights,
        quality_score: quality_score(avg_score),
        statistics: Some(statistics),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::stages::mining::score;
    use crate::stages::transformation::KddTransform;
    use scout_core::{CleanedIssue, FeatureExtractor, LanguageProfile, RawIssue};

    fn recommend(issues: Vec<RawIssue>, profile: &LanguageProfile) -> Vec<ScoredRecommendation> {
        let config = PipelineConfig::default();
        let transform = KddTransform::new(&config);
        issues
            .iter()
            .map(|raw| score(transform.extract(&CleanedIssue::from_raw(raw), profile), &config))
            .collect()
    }

    #[test]
    fn test_empty_recommendations() {
        let interpretation = interpret(&[]);
        assert_eq!(interpretation.summary, "No recommendations generated");
        assert!(interpretation.insights.is_empty());
        assert_eq!(interpretation.quality_score, 0);
        assert!(interpretation.statistics.is_none());
    }

    #[test]
    fn test_insights_and_statistics() {
        let profile = LanguageProfile::from_pairs([("Python", 1), ("Rust", 1)]);
        let recs = recommend(
            vec![
                RawIssue::new("typo", "a").with_language("Python"),
                RawIssue::new("typo again", "b").with_language("Rust"),
                RawIssue::new("docs", "c").with_language("Rust"),
            ],
            &profile,
        );
        let interpretation = interpret(&recs);

        assert_eq!(interpretation.summary, "Generated 3 personalized recommendations");
        assert_eq!(
            interpretation.insights,
            vec![
                "Primary language focus: Rust (2 issues)",
                "Difficulty level: Beginner-friendly recommendations",
                "Focused recommendations in specific languages",
            ]
        );
        let stats = interpretation.statistics.expect("statistics present");
        assert_eq!(stats.avg_difficulty, 2.0);
        assert_eq!(stats.language_distribution["Python"], 1);
        assert_eq!(stats.language_distribution["Rust"], 2);
        assert_eq!(stats.score_distribution.high + stats.score_distribution.low, 3);
    }

    #[test]
    fn test_first_seen_language_wins_ties_and_diversity() {
        let recs = recommend(
            vec![
                RawIssue::new("a", "1").with_language("Go"),
                RawIssue::new("b", "2").with_language("Zig"),
                RawIssue::new("c", "3").with_language("C"),
            ],
            &LanguageProfile::default(),
        );
        let interpretation = interpret(&recs);
        assert_eq!(interpretation.insights[0], "Primary language focus: Go (1 issues)");
        assert_eq!(interpretation.insights[1], "Difficulty level: Intermediate recommendations");
        assert_eq!(interpretation.insights[2], "Good diversity across multiple languages");
    }

    #[test]
    fn test_quality_score_bounds() {
        assert_eq!(quality_score(0.0), 50);
        assert_eq!(quality_score(1.26), 75);
        assert_eq!(quality_score(17.4), 100);
        assert_eq!(quality_score(-5.4), 0);
        assert_eq!(quality_score(-0.01), 49);
    }

    #[test]
    fn test_advanced_insight() {
        assert_eq!(
            difficulty_insight(3.6),
            "Difficulty level: Advanced recommendations"
        );
        assert_eq!(
            difficulty_insight(3.5),
            "Difficulty level: Intermediate recommendations"
        );
    }
}
