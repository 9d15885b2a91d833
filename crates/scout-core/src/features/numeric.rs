//! Numeric feature scaling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// Scaling applied by [`normalize_features`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    /// Scale into `[0, 1]`.
    #[default]
    MinMax,
    /// Center on the mean with unit (population) variance.
    ZScore,
}

impl FromStr for NormalizationMethod {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minmax" => Ok(Self::MinMax),
            "zscore" => Ok(Self::ZScore),
            other => Err(ScoutError::InvalidConfig(format!(
                "unknown normalization method: {other}"
            ))),
        }
    }
}

/// Normalize `values` with `method`.
///
/// Constant input maps to `0.5` under min-max; zero variance uses a
/// standard deviation of `1` under z-score. Empty input yields an empty
/// vector.
pub fn normalize_features(values: &[f64], method: NormalizationMethod) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    match method {
        NormalizationMethod::MinMax => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range == 0.0 {
                return vec![0.5; values.len()];
            }
            // Spans wider than f64::MAX overflow; halve both sides instead.
            let scale = |v: f64| {
                if range.is_finite() {
                    (v - min) / range
                } else {
                    (v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
                }
            };
            values.iter().map(|&v| scale(v).clamp(0.0, 1.0)).collect()
        }
        NormalizationMethod::ZScore => {
            let (mean, std) = mean_and_std(values);
            let std = if std == 0.0 { 1.0 } else { std };
            values.iter().map(|v| (v - mean) / std).collect()
        }
    }
}

/// Mean and population standard deviation. `(0, 0)` for empty input.
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_scales_to_unit_interval() {
        let out = normalize_features(&[2.0, 4.0, 6.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_minmax_handles_overflowing_range() {
        let out = normalize_features(&[f64::MAX, -f64::MAX, 0.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![1.0, 0.0, 0.5]);

        let out = normalize_features(&[1e308, -1e308], NormalizationMethod::MinMax);
        assert_eq!(out, vec![1.0, 0.0]);
    }

    #[test]
    fn test_minmax_constant_input() {
        let out = normalize_features(&[7.0, 7.0, 7.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_zscore_centers() {
        let out = normalize_features(&[1.0, 3.0], NormalizationMethod::ZScore);
        assert_eq!(out, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_zscore_zero_variance_uses_unit_std() {
        let out = normalize_features(&[4.0, 4.0], NormalizationMethod::ZScore);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_features(&[], NormalizationMethod::MinMax).is_empty());
        assert!(normalize_features(&[], NormalizationMethod::ZScore).is_empty());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "minmax".parse::<NormalizationMethod>().expect("parse"),
            NormalizationMethod::MinMax
        );
        assert_eq!(
            "ZScore".parse::<NormalizationMethod>().expect("parse"),
            NormalizationMethod::ZScore
        );
        assert!("robust".parse::<NormalizationMethod>().is_err());
    }
}
