//! Text reports and the persisted cross-validation artifact.

use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use scout_core::Result;

use crate::evaluator::{AbTestResult, CvResults, FoldResult};
use crate::stats::{AggregateMetrics, ConfidenceInterval};

/// Schema version written into [`CvResultsArtifact`].
pub const CV_ARTIFACT_SCHEMA_VERSION: &str = "1.0";

/// Cross-validation results as persisted for later comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvResultsArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub n_folds: usize,
    pub total_samples: usize,
    pub aggregate_metrics: IndexMap<String, AggregateMetrics>,
    pub confidence_intervals: IndexMap<String, ConfidenceInterval>,
    pub fold_results: Vec<FoldResult>,
}

impl CvResultsArtifact {
    /// Snapshot `results`, stamped with the current time.
    pub fn from_results(results: &CvResults) -> Self {
        Self::from_results_at(results, Utc::now())
    }

    pub fn from_results_at(results: &CvResults, generated_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: CV_ARTIFACT_SCHEMA_VERSION.to_string(),
            generated_at,
            n_folds: results.n_folds,
            total_samples: results.total_samples,
            aggregate_metrics: results.aggregate_metrics.clone(),
            confidence_intervals: results.confidence_intervals.clone(),
            fold_results: results.fold_results.clone(),
        }
    }
}

/// Write the artifact as pretty JSON.
pub fn write_cv_results_json(path: &Path, artifact: &CvResultsArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Read an artifact written by [`write_cv_results_json`].
pub fn read_cv_results_json(path: &Path) -> Result<CvResultsArtifact> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(50)
}

/// Render the plain-text validation report.
pub fn render_cv_report(results: &CvResults) -> String {
    let mut lines: Vec<String> = vec![
        rule('='),
        "MODEL VALIDATION REPORT".to_string(),
        rule('='),
        String::new(),
        format!("Cross-Validation Folds: {}", results.n_folds),
        format!("Total Samples: {}", results.total_samples),
        String::new(),
        rule('-'),
        "AGGREGATE METRICS (Mean ± Std)".to_string(),
        rule('-'),
    ];

    for (metric, agg) in &results.aggregate_metrics {
        lines.push(format!("{metric}: {:.4} ± {:.4}", agg.mean, agg.std));
    }
    lines.push(String::new());

    lines.push(rule('-'));
    lines.push("PER-FOLD RESULTS".to_string());
    lines.push(rule('-'));
    for fold in &results.fold_results {
        lines.push(format!("\nFold {}:", fold.fold_num));
        lines.push(format!(
            "  Train size: {}, Test size: {}",
            fold.train_size, fold.test_size
        ));
        for (metric, value) in &fold.metrics {
            lines.push(format!("  {metric}: {value:.4}"));
        }
    }

    lines.push(String::new());
    lines.push(rule('='));
    lines.push("END OF REPORT".to_string());
    lines.push(rule('='));
    lines.join("\n")
}

/// Render an A/B comparison as a table of per-metric differences.
pub fn render_ab_report(result: &AbTestResult) -> String {
    let mut out = String::new();
    out.push_str(&rule('='));
    out.push_str("\nA/B TEST REPORT\n");
    out.push_str(&rule('='));
    out.push_str(&format!(
        "\n\nTrain size: {}, Test size: {}\n\n",
        result.train_size, result.test_size
    ));
    out.push_str(&format!(
        "{:<14}{:>10}{:>10}{:>10}{:>10}\n",
        "metric", "model_a", "model_b", "diff", "change%"
    ));
    for (metric, c) in &result.comparison {
        out.push_str(&format!(
            "{:<14}{:>10.4}{:>10.4}{:>+10.4}{:>+10.2}\n",
            metric, c.model_a, c.model_b, c.difference, c.improvement_pct
        ));
    }
    out.push_str(&format!(
        "\nWinner: {} (A wins {}, B wins {})\n",
        result.winner, result.wins_a, result.wins_b
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{AbWinner, MetricComparison};
    use crate::metrics::MetricResult;

    fn sample_results() -> CvResults {
        let mut metrics = MetricResult::new();
        metrics.insert("precision".to_string(), 0.5);
        metrics.insert("recall".to_string(), 0.25);
        let mut aggregate = IndexMap::new();
        aggregate.insert("precision".to_string(), AggregateMetrics::from_values(&[0.5]));
        aggregate.insert("recall".to_string(), AggregateMetrics::from_values(&[0.25]));
        CvResults {
            n_folds: 1,
            total_samples: 4,
            fold_results: vec![FoldResult {
                fold_num: 1,
                train_size: 0,
                test_size: 4,
                predictions: 2,
                metrics,
            }],
            aggregate_metrics: aggregate,
            confidence_intervals: IndexMap::new(),
        }
    }

    #[test]
    fn test_cv_report_layout_is_stable() {
        let report = render_cv_report(&sample_results());
        let bar = "=".repeat(50);
        let dash = "-".repeat(50);
        let expected = format!(
            "{bar}\nMODEL VALIDATION REPORT\n{bar}\n\nCross-Validation Folds: 1\nTotal Samples: 4\n\n\
             {dash}\nAGGREGATE METRICS (Mean ± Std)\n{dash}\nprecision: 0.5000 ± 0.0000\n\
             recall: 0.2500 ± 0.0000\n\n{dash}\nPER-FOLD RESULTS\n{dash}\n\nFold 1:\n\
             \x20 Train size: 0, Test size: 4\n  precision: 0.5000\n  recall: 0.2500\n\n\
             {bar}\nEND OF REPORT\n{bar}"
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_artifact_schema_has_expected_keys() {
        let generated_at = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("parse RFC3339")
            .with_timezone(&Utc);
        let artifact = CvResultsArtifact::from_results_at(&sample_results(), generated_at);

        let raw = serde_json::to_value(&artifact).expect("serialize artifact");
        let obj = raw.as_object().expect("artifact object");
        for key in [
            "schema_version",
            "generated_at",
            "n_folds",
            "total_samples",
            "aggregate_metrics",
            "confidence_intervals",
            "fold_results",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(raw["fold_results"][0]["metrics"]["precision"], 0.5);
    }

    #[test]
    fn test_artifact_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cv_results.json");
        let artifact = CvResultsArtifact::from_results(&sample_results());

        write_cv_results_json(&path, &artifact).expect("write artifact");
        let loaded = read_cv_results_json(&path).expect("read artifact");
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_ab_report_mentions_winner() {
        let mut comparison = IndexMap::new();
        comparison.insert(
            "precision".to_string(),
            MetricComparison {
                model_a: 0.5,
                model_b: 0.75,
                difference: 0.25,
                improvement_pct: 50.0,
            },
        );
        let result = AbTestResult {
            train_size: 7,
            test_size: 3,
            model_a_metrics: MetricResult::new(),
            model_b_metrics: MetricResult::new(),
            comparison,
            wins_a: 0,
            wins_b: 1,
            winner: AbWinner::ModelB,
        };
        let report = render_ab_report(&result);
        assert!(report.contains("A/B TEST REPORT"));
        assert!(report.contains("precision"));
        assert!(report.contains("+0.2500"));
        assert!(report.contains("+50.00"));
        assert!(report.contains("Winner: Model B (A wins 0, B wins 1)"));
    }
}
