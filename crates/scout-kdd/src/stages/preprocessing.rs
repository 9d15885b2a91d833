//! Preprocessing stage: defaults, normalized text and missing-field counts.

use scout_core::{CleanedIssue, RawIssue};

use crate::stage::PreprocessStats;

/// Apply defaults and normalized text variants to every selected issue.
pub fn preprocess(issues: &[RawIssue]) -> (Vec<CleanedIssue>, PreprocessStats) {
    let cleaned: Vec<CleanedIssue> = issues.iter().map(CleanedIssue::from_raw).collect();
    let stats = PreprocessStats {
        processed_count: cleaned.len(),
        missing_titles: issues.iter().filter(|i| !i.has_title()).count(),
        missing_bodies: issues.iter().filter(|i| !i.has_body()).count(),
        missing_labels: issues.iter().filter(|i| i.labels.is_empty()).count(),
    };
    (cleaned, stats)
}
