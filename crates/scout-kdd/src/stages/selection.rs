//! Selection stage: keep issues in the contributor's languages.

use scout_core::{LanguageProfile, RawIssue};

use crate::config::PipelineConfig;
use crate::stage::SelectionStats;

/// Keep issues in one of the profile's languages, in the wildcard language,
/// or without a language.
pub fn select(
    issues: &[RawIssue],
    profile: &LanguageProfile,
    config: &PipelineConfig,
) -> (Vec<RawIssue>, SelectionStats) {
    let selected: Vec<RawIssue> = issues
        .iter()
        .filter(|issue| {
            let language = issue.language_or_empty();
            language.is_empty()
                || language == config.wildcard_language
                || profile.contains(language)
        })
        .cloned()
        .collect();

    let stats = SelectionStats {
        input_count: issues.len(),
        selected_count: selected.len(),
        selection_ratio: if issues.is_empty() {
            0.0
        } else {
            selected.len() as f64 / issues.len() as f64
        },
    };
    (selected, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_known_wildcard_and_unset_languages() {
        let issues = vec![
            RawIssue::new("a", "u1").with_language("Rust"),
            RawIssue::new("b", "u2").with_language("Haskell"),
            RawIssue::new("c", "u3").with_language("Any"),
            RawIssue::new("d", "u4"),
            RawIssue::new("e", "u5").with_language(""),
        ];
        let profile = LanguageProfile::from_pairs([("Rust", 3)]);
        let (selected, stats) = select(&issues, &profile, &PipelineConfig::default());

        let urls: Vec<&str> = selected.iter().map(RawIssue::url_or_empty).collect();
        assert_eq!(urls, vec!["u1", "u3", "u4", "u5"]);
        assert_eq!(stats.input_count, 5);
        assert_eq!(stats.selected_count, 4);
        assert_eq!(stats.selection_ratio, 0.8);
    }

    #[test]
    fn test_empty_input_has_zero_ratio() {
        let (selected, stats) = select(&[], &LanguageProfile::default(), &PipelineConfig::default());
        assert!(selected.is_empty());
        assert_eq!(stats.selection_ratio, 0.0);
    }

    #[test]
    fn test_language_match_is_case_sensitive() {
        let issues = vec![RawIssue::new("a", "u").with_language("rust")];
        let profile = LanguageProfile::from_pairs([("Rust", 1)]);
        let (selected, _) = select(&issues, &profile, &PipelineConfig::default());
        assert!(selected.is_empty());
    }
}
