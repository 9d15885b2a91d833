//! KDD pipeline orchestration.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scout_core::features::round_to;
use scout_core::{
    emit_pipeline_finished, emit_pipeline_started, emit_stage_completed, CleanedIssue, ItemKey,
    LanguageProfile, PipelineSpan, RawIssue, Result,
};

use crate::config::PipelineConfig;
use crate::stage::{KddStage, PipelineSteps};
use crate::stages::interpretation::{interpret, Interpretation};
use crate::stages::mining::{mine, ScoredRecommendation};
use crate::stages::preprocessing::preprocess;
use crate::stages::selection::select;
use crate::stages::transformation::transform;

/// One entry of a pipeline's output list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub issue: CleanedIssue,
    /// Score rounded to three decimals.
    pub score: f64,
    /// Difficulty from 1 (easiest) to 5.
    pub difficulty: u8,
}

impl From<&ScoredRecommendation> for Recommendation {
    fn from(scored: &ScoredRecommendation) -> Self {
        Self {
            issue: scored.issue().clone(),
            score: round_to(scored.score, 3),
            difficulty: scored.difficulty(),
        }
    }
}

impl ItemKey for Recommendation {
    fn item_key(&self) -> &str {
        self.issue.item_key()
    }
}

/// Result of a complete pipeline execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub run_id: String,

    /// Digest of the [`PipelineConfig`] that produced this run.
    pub config_digest: String,

    pub steps: PipelineSteps,

    pub recommendations: Vec<Recommendation>,

    /// Full ranking detail behind `recommendations`.
    pub ranked: Vec<ScoredRecommendation>,

    pub interpretation: Interpretation,

    pub duration_ms: u64,
}

/// The five-stage recommendation pipeline.
///
/// Holds only its validated configuration; every run starts from scratch.
#[derive(Debug, Clone)]
pub struct KddPipeline {
    config: PipelineConfig,
    config_digest: String,
}

impl KddPipeline {
    /// Validate `config` and build a pipeline around it.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let config_digest = config.digest()?;
        Ok(Self {
            config,
            config_digest,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn config_digest(&self) -> &str {
        &self.config_digest
    }

    /// Run every stage in order over `issues`.
    ///
    /// Never fails: missing fields take defaults and empty input flows
    /// through as empty stage results.
    pub fn run(&self, issues: &[RawIssue], profile: &LanguageProfile) -> PipelineRun {
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let _span = PipelineSpan::enter(&run_id);
        emit_pipeline_started(&run_id, issues.len(), profile.len());

        let (selected, selection) = select(issues, profile, &self.config);
        emit_stage_completed(KddStage::Selection.name(), issues.len(), selected.len());

        let (cleaned, preprocessing) = preprocess(&selected);
        emit_stage_completed(KddStage::Preprocessing.name(), selected.len(), cleaned.len());

        let (features, transformation) = transform(&cleaned, profile, &self.config);
        emit_stage_completed(KddStage::Transformation.name(), cleaned.len(), features.len());

        let scored_count = features.len();
        let (ranked, mining) = mine(features, &self.config);
        emit_stage_completed(KddStage::Mining.name(), scored_count, ranked.len());

        let interpretation = interpret(&ranked);
        emit_stage_completed(KddStage::Interpretation.name(), ranked.len(), ranked.len());

        let recommendations: Vec<Recommendation> = ranked.iter().map(Recommendation::from).collect();
        let duration_ms = start.elapsed().as_millis() as u64;
        emit_pipeline_finished(
            &run_id,
            recommendations.len(),
            interpretation.quality_score,
            duration_ms,
        );

        PipelineRun {
            run_id,
            config_digest: self.config_digest.clone(),
            steps: PipelineSteps {
                selection,
                preprocessing,
                transformation,
                mining,
            },
            recommendations,
            ranked,
            interpretation,
            duration_ms,
        }
    }
}
