//! Error taxonomy shared by the Scout library crates.
//!
//! Bad issue data never surfaces here: missing fields are defaulted and
//! ratios are guarded. What remains are caller mistakes (fold sizing,
//! invalid configuration) and failures of a recommender under test.

/// Boxed error returned by a recommender callback.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Scout library errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("invalid fold count: cannot split {samples} samples into {n_folds} folds")]
    InvalidFoldCount { n_folds: usize, samples: usize },

    #[error("recommender failed on fold {fold}: {source}")]
    Recommender {
        fold: usize,
        #[source]
        source: BoxError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScoutError {
    /// Wrap a recommender failure, tagging it with the fold it happened on.
    ///
    /// Fold `0` denotes the single train/test split of an A/B test.
    pub fn recommender(fold: usize, source: impl Into<BoxError>) -> Self {
        Self::Recommender {
            fold,
            source: source.into(),
        }
    }
}

/// Result type for Scout library operations.
pub type Result<T> = std::result::Result<T, ScoutError>;
