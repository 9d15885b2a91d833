//! Summaries of metric values across folds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use scout_core::features::{mean_and_std, round_to};

use crate::metrics::MetricResult;

const PLACES: i32 = 4;

/// One metric summarized across folds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl AggregateMetrics {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let (mean, std) = mean_and_std(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            mean: round_to(mean, PLACES),
            std: round_to(std, PLACES),
            min: round_to(min, PLACES),
            max: round_to(max, PLACES),
        }
    }
}

/// Approximate 95% interval around a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    pub std_error: f64,
}

/// Interval from sample variance with a t-multiplier of 2.0 above 30
/// samples and 2.5 otherwise.
///
/// Fewer than two values give `{mean: first or 0, lower: 0, upper: 0}`.
pub fn confidence_interval(values: &[f64]) -> ConfidenceInterval {
    let n = values.len();
    if n < 2 {
        return ConfidenceInterval {
            mean: values.first().copied().unwrap_or(0.0),
            lower: 0.0,
            upper: 0.0,
            std_error: 0.0,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_error = (variance / n as f64).sqrt();
    let t_value = if n > 30 { 2.0 } else { 2.5 };
    let margin = t_value * std_error;

    ConfidenceInterval {
        mean: round_to(mean, PLACES),
        lower: round_to(mean - margin, PLACES),
        upper: round_to(mean + margin, PLACES),
        std_error: round_to(std_error, PLACES),
    }
}

/// Values of each metric across `results`, keyed in the first result's
/// order.
pub fn metric_columns(results: &[&MetricResult]) -> IndexMap<String, Vec<f64>> {
    let mut columns: IndexMap<String, Vec<f64>> = IndexMap::new();
    if let Some(first) = results.first() {
        for name in first.keys() {
            let column = results
                .iter()
                .map(|r| r.get(name).copied().unwrap_or(0.0))
                .collect();
            columns.insert(name.clone(), column);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_uses_population_std() {
        let agg = AggregateMetrics::from_values(&[0.2, 0.4, 0.6]);
        assert_eq!(agg.mean, 0.4);
        assert_eq!(agg.std, 0.1633);
        assert_eq!(agg.min, 0.2);
        assert_eq!(agg.max, 0.6);
    }

    #[test]
    fn test_interval_small_sample() {
        let ci = confidence_interval(&[1.0, 2.0, 3.0]);
        // sample variance 1, se = sqrt(1/3), margin = 2.5 * se
        assert_eq!(ci.mean, 2.0);
        assert_eq!(ci.std_error, 0.5774);
        assert_eq!(ci.lower, 0.5566);
        assert_eq!(ci.upper, 3.4434);
    }

    #[test]
    fn test_interval_large_sample_uses_smaller_multiplier() {
        let values: Vec<f64> = (0..32).map(|i| f64::from(i % 2)).collect();
        let ci = confidence_interval(&values);
        let margin = ci.upper - ci.mean;
        assert!((margin - 2.0 * ci.std_error).abs() < 1e-3);
    }

    #[test]
    fn test_interval_degenerate() {
        let one = confidence_interval(&[0.7]);
        assert_eq!(one.mean, 0.7);
        assert_eq!(one.lower, 0.0);
        assert_eq!(one.upper, 0.0);

        let none = confidence_interval(&[]);
        assert_eq!(none.mean, 0.0);
    }

    #[test]
    fn test_metric_columns_follow_first_result() {
        let mut a = MetricResult::new();
        a.insert("precision".to_string(), 0.5);
        a.insert("recall".to_string(), 1.0);
        let mut b = MetricResult::new();
        b.insert("recall".to_string(), 0.0);
        b.insert("precision".to_string(), 0.25);

        let columns = metric_columns(&[&a, &b]);
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["precision", "recall"]);
        assert_eq!(columns["precision"], vec![0.5, 0.25]);
    }
}
