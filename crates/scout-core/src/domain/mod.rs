//! Domain models for Scout.
//!
//! - `RawIssue`: an issue as fetched, every field optional
//! - `CleanedIssue`: an issue with defaults applied and normalized text
//! - `LanguageProfile`: the contributor's ranked languages
//! - `ItemKey`: identity used by evaluation metrics

pub mod issue;
pub mod profile;

pub use issue::{
    strip_punctuation, CleanedIssue, ItemKey, RawIssue, UNKNOWN_LANGUAGE, UNKNOWN_REPO, UNTAGGED_LABEL,
    UNTITLED,
};
pub use profile::{LanguageEntry, LanguageProfile, LanguageStanding};
