//! Evaluation settings.

use serde::{Deserialize, Serialize};

use scout_core::{Result, ScoutError};

/// How the evaluator partitions data and which cutoffs it reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of cross-validation folds.
    pub n_folds: usize,
    /// Shuffle a copy of the data before partitioning.
    pub shuffle: bool,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Cutoffs for Hit-Rate@K and NDCG@K.
    pub k_values: Vec<usize>,
    /// Share of the data held out by an A/B test. Clamped to `[0, 1]`.
    pub test_fraction: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            n_folds: 5,
            shuffle: true,
            seed: None,
            k_values: vec![5, 10],
            test_fraction: 0.3,
        }
    }
}

impl EvaluationConfig {
    pub fn with_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_folds == 0 {
            return Err(ScoutError::InvalidConfig(
                "evaluation.n_folds must be at least 1".to_string(),
            ));
        }
        if self.k_values.contains(&0) {
            return Err(ScoutError::InvalidConfig(
                "evaluation.k_values must be positive".to_string(),
            ));
        }
        if !self.test_fraction.is_finite() {
            return Err(ScoutError::InvalidConfig(
                "evaluation.test_fraction must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
