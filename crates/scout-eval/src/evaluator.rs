//! Cross-validation and A/B comparison of recommender functions.

use std::fmt;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scout_core::features::round_to;
use scout_core::{
    emit_ab_test_decided, emit_cross_validation_finished, emit_fold_evaluated, BoxError,
    ItemKey, Result, ScoutError,
};

use crate::config::EvaluationConfig;
use crate::folds::{create_folds, create_shuffled_folds, Fold};
use crate::metrics::{calculate_metrics, MetricResult};
use crate::stats::{confidence_interval, metric_columns, AggregateMetrics, ConfidenceInterval};

/// Metrics of one evaluated fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    pub fold_num: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// Number of predictions the recommender returned.
    pub predictions: usize,
    pub metrics: MetricResult,
}

/// Outcome of a cross-validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvResults {
    pub n_folds: usize,
    pub total_samples: usize,
    pub fold_results: Vec<FoldResult>,
    /// Mean/std/min/max per metric, in metric order.
    pub aggregate_metrics: IndexMap<String, AggregateMetrics>,
    /// Interval per metric from the per-fold values.
    pub confidence_intervals: IndexMap<String, ConfidenceInterval>,
}

/// Which model an A/B comparison favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbWinner {
    #[serde(rename = "Model A")]
    ModelA,
    #[serde(rename = "Model B")]
    ModelB,
    Tie,
}

impl fmt::Display for AbWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ModelA => "Model A",
            Self::ModelB => "Model B",
            Self::Tie => "Tie",
        })
    }
}

/// One metric compared between the two models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub model_a: f64,
    pub model_b: f64,
    /// `model_b - model_a`, rounded to four decimals.
    pub difference: f64,
    /// Difference relative to model A in percent; 0 when model A scored 0.
    pub improvement_pct: f64,
}

/// Outcome of an A/B test on a single shared split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbTestResult {
    pub train_size: usize,
    pub test_size: usize,
    pub model_a_metrics: MetricResult,
    pub model_b_metrics: MetricResult,
    pub comparison: IndexMap<String, MetricComparison>,
    /// Metrics where model A scored higher.
    pub wins_a: usize,
    /// Metrics where model B scored higher.
    pub wins_b: usize,
    pub winner: AbWinner,
}

/// Offline evaluator for recommender functions.
///
/// A recommender is any `FnMut(train, test) -> Result<predictions, E>`.
/// Its predictions for a fold are scored against that fold's test records,
/// which act as the ground truth.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Partition `data` into the configured number of folds, shuffling a
    /// copy first when configured to.
    pub fn create_folds<R: Clone>(&self, data: &[R]) -> Result<Vec<Fold<R>>> {
        if self.config.shuffle {
            create_shuffled_folds(data, self.config.n_folds, &mut self.rng())
        } else {
            create_folds(data, self.config.n_folds)
        }
    }

    /// Run n-fold cross-validation of `recommender` over `data`.
    ///
    /// Fails fast with [`ScoutError::InvalidFoldCount`] before the
    /// recommender is called, and with [`ScoutError::Recommender`] carrying
    /// the fold number when the recommender fails.
    pub fn run_cross_validation<R, P, E, F>(&self, data: &[R], mut recommender: F) -> Result<CvResults>
    where
        R: Clone + ItemKey,
        P: ItemKey,
        E: Into<BoxError>,
        F: FnMut(&[R], &[R]) -> std::result::Result<Vec<P>, E>,
    {
        let folds = self.create_folds(data)?;
        let mut fold_results = Vec::with_capacity(folds.len());

        for fold in &folds {
            let predictions = recommender(&fold.train, &fold.test)
                .map_err(|e| ScoutError::recommender(fold.fold_num, e))?;
            let metrics = calculate_metrics(&predictions, &fold.test, &self.config.k_values);
            emit_fold_evaluated(
                fold.fold_num,
                fold.train_size(),
                fold.test_size(),
                predictions.len(),
            );
            fold_results.push(FoldResult {
                fold_num: fold.fold_num,
                train_size: fold.train_size(),
                test_size: fold.test_size(),
                predictions: predictions.len(),
                metrics,
            });
        }

        let per_fold: Vec<&MetricResult> = fold_results.iter().map(|f| &f.metrics).collect();
        let columns = metric_columns(&per_fold);
        let aggregate_metrics = columns
            .iter()
            .map(|(name, values)| (name.clone(), AggregateMetrics::from_values(values)))
            .collect();
        let confidence_intervals = columns
            .iter()
            .map(|(name, values)| (name.clone(), confidence_interval(values)))
            .collect();

        emit_cross_validation_finished(folds.len(), data.len());
        Ok(CvResults {
            n_folds: folds.len(),
            total_samples: data.len(),
            fold_results,
            aggregate_metrics,
            confidence_intervals,
        })
    }

    /// Compare two recommenders on one shuffled train/test split.
    ///
    /// The configured test fraction is clamped to `[0, 1]`. Both models see
    /// the identical split; a failure of either is reported as fold 0.
    pub fn run_ab_test<R, PA, PB, EA, EB, FA, FB>(
        &self,
        data: &[R],
        model_a: FA,
        model_b: FB,
    ) -> Result<AbTestResult>
    where
        R: Clone + ItemKey,
        PA: ItemKey,
        PB: ItemKey,
        EA: Into<BoxError>,
        EB: Into<BoxError>,
        FA: FnOnce(&[R], &[R]) -> std::result::Result<Vec<PA>, EA>,
        FB: FnOnce(&[R], &[R]) -> std::result::Result<Vec<PB>, EB>,
    {
        let mut shuffled = data.to_vec();
        shuffled.shuffle(&mut self.rng());

        let test_fraction = self.config.test_fraction.clamp(0.0, 1.0);
        let split_idx = ((shuffled.len() as f64) * (1.0 - test_fraction)) as usize;
        let (train, test) = shuffled.split_at(split_idx.min(shuffled.len()));
        debug!(train = train.len(), test = test.len(), "a/b split");

        let predictions_a = model_a(train, test).map_err(|e| ScoutError::recommender(0, e))?;
        let model_a_metrics = calculate_metrics(&predictions_a, test, &self.config.k_values);
        let predictions_b = model_b(train, test).map_err(|e| ScoutError::recommender(0, e))?;
        let model_b_metrics = calculate_metrics(&predictions_b, test, &self.config.k_values);

        let comparison: IndexMap<String, MetricComparison> = model_a_metrics
            .iter()
            .map(|(name, &a)| {
                let b = model_b_metrics.get(name).copied().unwrap_or(0.0);
                let diff = b - a;
                let improvement = if a != 0.0 { diff / a * 100.0 } else { 0.0 };
                let entry = MetricComparison {
                    model_a: a,
                    model_b: b,
                    difference: round_to(diff, 4),
                    improvement_pct: round_to(improvement, 2),
                };
                (name.clone(), entry)
            })
            .collect();

        let wins_a = comparison.values().filter(|c| c.difference < 0.0).count();
        let wins_b = comparison.values().filter(|c| c.difference > 0.0).count();
        let winner = match wins_a.cmp(&wins_b) {
            std::cmp::Ordering::Greater => AbWinner::ModelA,
            std::cmp::Ordering::Less => AbWinner::ModelB,
            std::cmp::Ordering::Equal => AbWinner::Tie,
        };
        emit_ab_test_decided(&winner.to_string(), wins_a, wins_b);

        Ok(AbTestResult {
            train_size: train.len(),
            test_size: test.len(),
            model_a_metrics,
            model_b_metrics,
            comparison,
            wins_a,
            wins_b,
            winner,
        })
    }
}
