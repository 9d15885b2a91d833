//! The five KDD stages and the statistics each one records.

use serde::{Deserialize, Serialize};

/// Pipeline stages in execution order.
///
/// Stages run strictly forward in the order of [`KddStage::ALL`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KddStage {
    Selection,
    Preprocessing,
    Transformation,
    Mining,
    Interpretation,
}

impl KddStage {
    pub const ALL: [Self; 5] = [
        Self::Selection,
        Self::Preprocessing,
        Self::Transformation,
        Self::Mining,
        Self::Interpretation,
    ];

    /// Get the stage name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Preprocessing => "preprocessing",
            Self::Transformation => "transformation",
            Self::Mining => "mining",
            Self::Interpretation => "interpretation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub input_count: usize,
    pub selected_count: usize,
    /// `selected / input`, 0 for empty input.
    pub selection_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessStats {
    pub processed_count: usize,
    /// Issues whose title was missing or blank.
    pub missing_titles: usize,
    pub missing_bodies: usize,
    pub missing_labels: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Width of the transform vector.
    pub features_extracted: usize,
    pub samples_transformed: usize,
    pub avg_difficulty: f64,
}

/// Score spread over every scored issue, not only the kept ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningStats {
    pub algorithm: String,
    pub total_scored: usize,
    pub top_n_selected: usize,
    pub score_range: ScoreRange,
}

/// Per-stage statistics of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSteps {
    pub selection: SelectionStats,
    pub preprocessing: PreprocessStats,
    pub transformation: TransformStats,
    pub mining: MiningStats,
}
