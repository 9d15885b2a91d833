//! OpenSource Scout KDD pipeline
//!
//! Turns fetched issues and a contributor's language profile into ranked,
//! explainable good-first-issue recommendations in five stages:
//!
//! 1. **Selection**: keep issues in the contributor's languages
//! 2. **Preprocessing**: apply defaults and normalize text
//! 3. **Transformation**: compute the seven-feature transform vector
//! 4. **Mining**: weighted linear scoring and stable ranking
//! 5. **Interpretation**: summary, insights and a quality score
//!
//! [`validate_pipeline`] and [`compare_pipelines`] drive a
//! [`scout_eval::Evaluator`] with the pipeline as the recommender.

pub mod config;
pub mod pipeline;
pub mod stage;
pub mod stages;
pub mod validation;

pub use config::{PipelineConfig, ScoringWeights, TransformFeature};
pub use pipeline::{KddPipeline, PipelineRun, Recommendation};
pub use stage::{
    KddStage, MiningStats, PipelineSteps, PreprocessStats, ScoreRange, SelectionStats,
    TransformStats,
};
pub use stages::interpretation::{
    interpret, Interpretation, InterpretationStatistics, ScoreDistribution,
};
pub use stages::mining::{mine, ScoredRecommendation, MINING_ALGORITHM};
pub use stages::preprocessing::preprocess;
pub use stages::selection::select;
pub use stages::transformation::{
    calculate_difficulty, estimate_issue_difficulty, transform, KddTransform, TransformFeatures,
};
pub use validation::{compare_pipelines, validate_pipeline, PipelineComparison, ValidationOutcome};
