//! Offline validation of pipeline configurations with the evaluator.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use scout_core::{LanguageProfile, RawIssue, Result};
use scout_eval::{render_ab_report, render_cv_report, AbTestResult, CvResults, Evaluator};

use crate::pipeline::{KddPipeline, Recommendation};

/// Cross-validation results of one pipeline plus their text report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub config_digest: String,
    pub cv_results: CvResults,
    pub report: String,
}

/// A/B comparison of two pipeline configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineComparison {
    pub digest_a: String,
    pub digest_b: String,
    pub result: AbTestResult,
    pub report: String,
}

fn recommend(
    pipeline: &KddPipeline,
    train: &[RawIssue],
    profile: &LanguageProfile,
) -> std::result::Result<Vec<Recommendation>, Infallible> {
    Ok(pipeline.run(train, profile).recommendations)
}

/// Cross-validate `pipeline` over `issues`.
///
/// Each fold runs the pipeline on the training issues; its
/// recommendations are scored against the held-out issues.
pub fn validate_pipeline(
    pipeline: &KddPipeline,
    evaluator: &Evaluator,
    issues: &[RawIssue],
    profile: &LanguageProfile,
) -> Result<ValidationOutcome> {
    let cv_results = evaluator
        .run_cross_validation(issues, |train, _test| recommend(pipeline, train, profile))?;
    let report = render_cv_report(&cv_results);
    Ok(ValidationOutcome {
        config_digest: pipeline.config_digest().to_string(),
        cv_results,
        report,
    })
}

/// A/B test pipeline `a` against pipeline `b` on one shared split.
pub fn compare_pipelines(
    a: &KddPipeline,
    b: &KddPipeline,
    evaluator: &Evaluator,
    issues: &[RawIssue],
    profile: &LanguageProfile,
) -> Result<PipelineComparison> {
    let result = evaluator.run_ab_test(
        issues,
        |train, _test| recommend(a, train, profile),
        |train, _test| recommend(b, train, profile),
    )?;
    let report = render_ab_report(&result);
    Ok(PipelineComparison {
        digest_a: a.config_digest().to_string(),
        digest_b: b.config_digest().to_string(),
        result,
        report,
    })
}
