//! Offline evaluation for OpenSource Scout recommenders.
//!
//! - [`folds`]: exact k-fold partitioning
//! - [`metrics`]: precision/recall/F1, Hit-Rate@K, NDCG@K, coverage
//! - [`Evaluator`]: cross-validation and A/B testing of recommender functions
//! - [`report`]: text reports and the JSON results artifact
//!
//! Ground truth for a fold is that fold's held-out test records.

pub mod config;
pub mod evaluator;
pub mod folds;
pub mod metrics;
pub mod report;
pub mod stats;

pub use config::EvaluationConfig;
pub use evaluator::{
    AbTestResult, AbWinner, CvResults, Evaluator, FoldResult, MetricComparison,
};
pub use folds::{create_folds, create_shuffled_folds, Fold};
pub use metrics::{
    calculate_metrics, coverage, hit_rate_at_k, ndcg_at_k, precision_at_k, precision_recall_f1,
    MetricResult, SetScores,
};
pub use report::{
    read_cv_results_json, render_ab_report, render_cv_report, write_cv_results_json,
    CvResultsArtifact,
};
pub use stats::{confidence_interval, AggregateMetrics, ConfidenceInterval};
