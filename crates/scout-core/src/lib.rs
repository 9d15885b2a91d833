//! OpenSource Scout core library
//!
//! Domain types, feature engineering and observability shared by the KDD
//! pipeline (`scout-kdd`) and the evaluator (`scout-eval`). Everything here
//! is synchronous and performs no I/O.

pub mod domain;
pub mod error;
pub mod features;
pub mod obs;
pub mod telemetry;

pub use domain::{
    CleanedIssue, ItemKey, LanguageEntry, LanguageProfile, LanguageStanding, RawIssue,
};
pub use error::{BoxError, Result, ScoutError};
pub use features::{
    EngineeredFeatures, FeatureConfig, FeatureEngineer, FeatureExtractor, FeatureStats,
    NormalizationMethod,
};
pub use obs::{
    emit_ab_test_decided, emit_cross_validation_finished, emit_features_extracted,
    emit_fold_evaluated, emit_pipeline_finished, emit_pipeline_started, emit_rejected,
    emit_stage_completed, PipelineSpan,
};
pub use telemetry::{init_tracing, LogFormat};

/// Scout version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
