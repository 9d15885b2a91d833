//! Heuristic tables used by the feature engineer.
//!
//! Every keyword list and threshold lives here as data so that an
//! alternate table can be loaded from TOML and tested without touching
//! the extraction code.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Half-open bins `[edges[i], edges[i + 1])`; the last bin is open-ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BinSpec {
    /// Ascending lower bounds, one per label.
    pub edges: Vec<f64>,
    pub labels: Vec<String>,
}

impl Default for BinSpec {
    fn default() -> Self {
        Self {
            edges: vec![0.0, 2.0, 5.0, 10.0, 20.0],
            labels: strings(&["very_low", "low", "medium", "high", "very_high"]),
        }
    }
}

impl BinSpec {
    /// Label for `value`; values outside every bin map to the last label.
    pub fn label_for(&self, value: f64) -> &str {
        let last = self.labels.last().map(String::as_str).unwrap_or("unknown");
        for (i, lower) in self.edges.iter().enumerate() {
            let upper = self.edges.get(i + 1).copied().unwrap_or(f64::INFINITY);
            if *lower <= value && value < upper {
                return self.labels.get(i).map(String::as_str).unwrap_or(last);
            }
        }
        last
    }

    fn validate(&self) -> Result<()> {
        if self.edges.is_empty() {
            return Err(ScoutError::InvalidConfig("bins.edges must not be empty".into()));
        }
        if self.edges.len() != self.labels.len() {
            return Err(ScoutError::InvalidConfig(format!(
                "bins.edges has {} entries but bins.labels has {}",
                self.edges.len(),
                self.labels.len()
            )));
        }
        if self
            .edges
            .windows(2)
            .any(|w| w[0].partial_cmp(&w[1]) != Some(std::cmp::Ordering::Less))
        {
            return Err(ScoutError::InvalidConfig(
                "bins.edges must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for [`FeatureEngineer`](super::FeatureEngineer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    /// Technical keywords counted by the keyword score.
    pub tech_keywords: Vec<String>,
    /// Upper bound of the keyword score.
    pub keyword_cap: u32,
    /// Labels that get their own multi-hot slot.
    pub important_labels: Vec<String>,
    /// Labels that mark an issue's type.
    pub type_labels: Vec<String>,
    /// Substring that marks a priority label.
    pub priority_marker: String,
    /// Labels that mark an issue as beginner-friendly for the fit score.
    pub beginner_labels: Vec<String>,
    /// Terms in body or labels that mark a long task.
    pub complexity_indicators: Vec<String>,
    /// Organizations whose repositories count as popular.
    pub popular_orgs: Vec<String>,
    pub popular_repo_score: f64,
    pub default_repo_score: f64,
    pub bins: BinSpec,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            tech_keywords: strings(&[
                "bug",
                "fix",
                "feature",
                "add",
                "update",
                "remove",
                "refactor",
                "test",
                "docs",
                "style",
                "performance",
            ]),
            keyword_cap: 5,
            important_labels: strings(&[
                "good first issue",
                "beginner",
                "easy",
                "help wanted",
                "bug",
                "feature",
                "enhancement",
                "documentation",
                "high priority",
                "low priority",
                "wontfix",
            ]),
            type_labels: strings(&["bug", "feature", "enhancement"]),
            priority_marker: "priority".to_string(),
            beginner_labels: strings(&["good first issue", "beginner", "easy", "starter"]),
            complexity_indicators: strings(&["refactor", "architecture", "redesign", "major"]),
            popular_orgs: strings(&[
                "facebook",
                "google",
                "microsoft",
                "apache",
                "tensorflow",
                "pytorch",
                "kubernetes",
                "docker",
                "nodejs",
                "vuejs",
                "angular",
            ]),
            popular_repo_score: 5.0,
            default_repo_score: 3.0,
            bins: BinSpec::default(),
        }
    }
}

impl FeatureConfig {
    /// Check the tables for values the extractor cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.bins.validate()?;
        if !self.popular_repo_score.is_finite() || !self.default_repo_score.is_finite() {
            return Err(ScoutError::InvalidConfig(
                "repo popularity scores must be finite".into(),
            ));
        }
        if self.priority_marker.is_empty() {
            return Err(ScoutError::InvalidConfig(
                "priority_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bins() {
        let bins = BinSpec::default();
        assert_eq!(bins.label_for(0.0), "very_low");
        assert_eq!(bins.label_for(1.99), "very_low");
        assert_eq!(bins.label_for(2.0), "low");
        assert_eq!(bins.label_for(7.5), "medium");
        assert_eq!(bins.label_for(10.0), "high");
        assert_eq!(bins.label_for(20.0), "very_high");
        assert_eq!(bins.label_for(1e9), "very_high");
    }

    #[test]
    fn test_out_of_range_falls_back_to_last_label() {
        let bins = BinSpec::default();
        assert_eq!(bins.label_for(-1.0), "very_high");
        assert_eq!(bins.label_for(f64::NAN), "very_high");
    }

    #[test]
    fn test_default_config_is_valid() {
        FeatureConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn test_mismatched_bins_rejected() {
        let config = FeatureConfig {
            bins: BinSpec {
                edges: vec![0.0, 1.0],
                labels: vec!["only".to_string()],
            },
            ..FeatureConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_descending_bins_rejected() {
        let config = FeatureConfig {
            bins: BinSpec {
                edges: vec![5.0, 1.0],
                labels: vec!["a".to_string(), "b".to_string()],
            },
            ..FeatureConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FeatureConfig = toml::from_str("keyword_cap = 3\n").expect("parse");
        assert_eq!(config.keyword_cap, 3);
        assert_eq!(config.tech_keywords.len(), 11);
        assert_eq!(config.popular_orgs.len(), 11);
    }
}
