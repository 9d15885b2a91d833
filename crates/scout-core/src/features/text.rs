//! Text statistics for issue titles and bodies.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::config::FeatureConfig;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b\w+\b").expect("static pattern compiles"))
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://").expect("static pattern compiles"))
}

/// Lowercase word tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Statistics of a single piece of text. All zero for empty text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub word_count: usize,
    pub char_count: usize,
    /// Mean token length, rounded to 2 decimals.
    pub avg_word_length: f64,
    /// Technical keyword occurrences, capped.
    pub keyword_score: u32,
    /// Any backtick present.
    pub has_code_block: bool,
    pub has_url: bool,
}

impl TextFeatures {
    /// Feature names and values in their canonical order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("word_count", self.word_count as f64),
            ("char_count", self.char_count as f64),
            ("avg_word_length", self.avg_word_length),
            ("keyword_score", f64::from(self.keyword_score)),
            ("has_code_block", flag(self.has_code_block)),
            ("has_url", flag(self.has_url)),
        ]
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Extract [`TextFeatures`] from `text`.
pub fn extract_text_features(text: &str, config: &FeatureConfig) -> TextFeatures {
    if text.is_empty() {
        return TextFeatures::default();
    }

    let words = tokenize(text);
    let word_count = words.len();
    let avg_word_length = if word_count == 0 {
        0.0
    } else {
        let total: usize = words.iter().map(|w| w.chars().count()).sum();
        round_to(total as f64 / word_count as f64, 2)
    };

    let keywords: HashSet<&str> = config.tech_keywords.iter().map(String::as_str).collect();
    let keyword_count = words.iter().filter(|w| keywords.contains(w.as_str())).count();

    TextFeatures {
        word_count,
        char_count: text.chars().count(),
        avg_word_length,
        keyword_score: (keyword_count as u32).min(config.keyword_cap),
        has_code_block: text.contains('`'),
        has_url: url_pattern().is_match(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_all_zero() {
        let features = extract_text_features("", &FeatureConfig::default());
        assert_eq!(features, TextFeatures::default());
        assert!(features.entries().iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_basic_statistics() {
        let features = extract_text_features("Fix the bug", &FeatureConfig::default());
        assert_eq!(features.word_count, 3);
        assert_eq!(features.char_count, 11);
        assert_eq!(features.avg_word_length, 3.0);
        assert_eq!(features.keyword_score, 2);
        assert!(!features.has_code_block);
        assert!(!features.has_url);
    }

    #[test]
    fn test_code_and_url_detection() {
        let text = "Call `run()` as shown in https://example.com/docs";
        let features = extract_text_features(text, &FeatureConfig::default());
        assert!(features.has_code_block);
        assert!(features.has_url);
    }

    #[test]
    fn test_keyword_score_is_capped() {
        let text = "fix fix fix bug bug test docs add remove";
        let features = extract_text_features(text, &FeatureConfig::default());
        assert_eq!(features.keyword_score, 5);
    }

    #[test]
    fn test_punctuation_only_text() {
        let features = extract_text_features("?!", &FeatureConfig::default());
        assert_eq!(features.word_count, 0);
        assert_eq!(features.char_count, 2);
        assert_eq!(features.avg_word_length, 0.0);
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("Add CI-Job now"), vec!["add", "ci", "job", "now"]);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(0.12346, 4), 0.1235);
    }
}
