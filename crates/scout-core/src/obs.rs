//! Structured observability hooks for pipeline runs and evaluations.
//!
//! This module provides:
//! - Run-scoped tracing spans via the `PipelineSpan` RAII guard
//! - Emission functions for stage completion, evaluation folds and A/B decisions
//!
//! Events are emitted at `info!` level with an `event` field naming them;
//! filter with `RUST_LOG`, e.g. `RUST_LOG=scout=debug`.

use tracing::info;

/// RAII guard that enters a run-scoped span for one pipeline invocation.
///
/// # Example
///
/// ```ignore
/// let _span = PipelineSpan::enter("4c1e...");
/// // every event below is tagged with run_id
/// ```
pub struct PipelineSpan {
    _span: tracing::span::EnteredSpan,
}

impl PipelineSpan {
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("scout.pipeline", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_pipeline_started(run_id: &str, input_issues: usize, profile_languages: usize) {
    info!(
        event = "pipeline.started",
        run_id = %run_id,
        input_issues = input_issues,
        profile_languages = profile_languages,
    );
}

/// Emit event: one KDD stage finished.
pub fn emit_stage_completed(stage: &str, input_count: usize, output_count: usize) {
    info!(
        event = "pipeline.stage_completed",
        stage = %stage,
        input_count = input_count,
        output_count = output_count,
    );
}

pub fn emit_pipeline_finished(
    run_id: &str,
    recommendations: usize,
    quality_score: u32,
    duration_ms: u64,
) {
    info!(
        event = "pipeline.finished",
        run_id = %run_id,
        recommendations = recommendations,
        quality_score = quality_score,
        duration_ms = duration_ms,
    );
}

/// Emit event: a feature batch was extracted (debug level).
pub fn emit_features_extracted(batch_size: usize, feature_count: usize) {
    tracing::debug!(
        event = "features.batch_extracted",
        batch_size = batch_size,
        feature_count = feature_count,
    );
}

pub fn emit_fold_evaluated(fold_num: usize, train_size: usize, test_size: usize, predictions: usize) {
    info!(
        event = "eval.fold_evaluated",
        fold = fold_num,
        train_size = train_size,
        test_size = test_size,
        predictions = predictions,
    );
}

pub fn emit_cross_validation_finished(n_folds: usize, total_samples: usize) {
    info!(
        event = "eval.cross_validation_finished",
        n_folds = n_folds,
        total_samples = total_samples,
    );
}

/// Emit event: an A/B comparison picked a winner.
pub fn emit_ab_test_decided(winner: &str, wins_a: usize, wins_b: usize) {
    info!(
        event = "eval.ab_test_decided",
        winner = %winner,
        wins_a = wins_a,
        wins_b = wins_b,
    );
}

/// Emit event: a caller error rejected before any work (warning level).
pub fn emit_rejected(operation: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "scout.rejected", operation = %operation, error = %error);
}
