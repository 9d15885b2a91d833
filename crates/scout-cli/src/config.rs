//! Combined configuration file for the `scout` binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scout_core::{FeatureConfig, Result};
use scout_eval::EvaluationConfig;
use scout_kdd::PipelineConfig;

/// Every tunable table, loaded from one TOML file with `[features]`,
/// `[pipeline]` and `[evaluation]` sections. Missing sections and keys take
/// the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub features: FeatureConfig,
    pub pipeline: PipelineConfig,
    pub evaluation: EvaluationConfig,
}

impl ScoutConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Load `path` when given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.pipeline.validate()?;
        self.evaluation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::ScoutError;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = ScoutConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, ScoutConfig::default());
    }

    #[test]
    fn test_sections_override_independently() {
        let config = ScoutConfig::from_toml_str(
            r#"
[pipeline]
top_n = 4
easy_terms = ["typo"]

[pipeline.weights]
language_match = 1.0

[evaluation]
n_folds = 3
seed = 11
"#,
        )
        .expect("parse config");

        assert_eq!(config.pipeline.top_n, 4);
        assert_eq!(config.pipeline.easy_terms, vec!["typo"]);
        assert_eq!(config.pipeline.weights.len(), 1);
        assert_eq!(config.evaluation.n_folds, 3);
        assert_eq!(config.evaluation.seed, Some(11));
        assert_eq!(config.features, FeatureConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ScoutConfig::from_toml_str("[evaluation]\nn_folds = 0\n").expect_err("zero folds");
        assert!(matches!(err, ScoutError::InvalidConfig(_)));

        let err = ScoutConfig::from_toml_str("[pipeline\n").expect_err("bad toml");
        assert!(matches!(err, ScoutError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scout.toml");
        std::fs::write(&path, "[pipeline]\nwildcard_language = \"*\"\n").expect("write config");

        let config = ScoutConfig::load_or_default(Some(&path)).expect("load config");
        assert_eq!(config.pipeline.wildcard_language, "*");

        let missing = ScoutConfig::load(&dir.path().join("nope.toml")).expect_err("missing file");
        assert!(matches!(missing, ScoutError::Io(_)));
    }
}
