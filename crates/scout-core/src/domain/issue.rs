//! Issue records as delivered by the fetcher, and their cleaned form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Title substituted when an issue has none.
pub const UNTITLED: &str = "Untitled";
/// Label substituted when an issue has no labels.
pub const UNTAGGED_LABEL: &str = "untagged";
/// Repository substituted when an issue has none.
pub const UNKNOWN_REPO: &str = "Unknown";
/// Language substituted when an issue has none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An issue exactly as the external fetcher produced it.
///
/// Every field may be absent; the core never rejects a record for missing
/// data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawIssue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RawIssue {
    /// Create an issue with a title and URL; everything else unset.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_comments(mut self, comments: u32) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn language_or_empty(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }

    pub fn repo_or_empty(&self) -> &str {
        self.repo.as_deref().unwrap_or("")
    }

    pub fn url_or_empty(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Labels lowercased for case-insensitive matching.
    pub fn labels_lowercase(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.to_lowercase()).collect()
    }

    pub fn has_title(&self) -> bool {
        !self.title_or_empty().trim().is_empty()
    }

    pub fn has_body(&self) -> bool {
        !self.body_or_empty().is_empty()
    }
}

fn punctuation_pattern() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").expect("static pattern compiles"))
}

/// Remove every character that is neither a word character nor whitespace.
pub fn strip_punctuation(text: &str) -> String {
    punctuation_pattern().replace_all(text, "").into_owned()
}

/// An issue with all defaults applied and normalized text variants.
///
/// Built once per pipeline run by the preprocessing stage and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanedIssue {
    pub title: String,
    pub repo: String,
    pub url: String,
    pub language: String,
    pub labels: Vec<String>,
    pub body: String,
    pub comments: u32,
    pub created_at: Option<String>,
    /// Lowercased title.
    pub title_normalized: String,
    /// Lowercased body.
    pub body_normalized: String,
    /// Lowercased title with punctuation removed.
    pub title_clean: String,
}

impl CleanedIssue {
    /// Apply the cleaning defaults to a raw record.
    pub fn from_raw(raw: &RawIssue) -> Self {
        let title = if raw.has_title() {
            raw.title_or_empty().trim().to_string()
        } else {
            UNTITLED.to_string()
        };
        let labels = if raw.labels.is_empty() {
            vec![UNTAGGED_LABEL.to_string()]
        } else {
            raw.labels.clone()
        };
        let body = raw.body_or_empty().to_string();
        let title_normalized = title.to_lowercase();
        let title_clean = strip_punctuation(&title_normalized);

        Self {
            repo: non_empty_or(raw.repo.as_deref(), UNKNOWN_REPO),
            url: raw.url_or_empty().to_string(),
            language: non_empty_or(raw.language.as_deref(), UNKNOWN_LANGUAGE),
            body_normalized: body.to_lowercase(),
            comments: raw.comments,
            created_at: raw.created_at.clone(),
            title,
            labels,
            body,
            title_normalized,
            title_clean,
        }
    }

    /// Labels lowercased for case-insensitive matching.
    pub fn labels_lowercase(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.to_lowercase()).collect()
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Identity used when comparing predictions with ground truth.
pub trait ItemKey {
    /// The item's URL or id; may be empty when unknown.
    fn item_key(&self) -> &str;
}

impl ItemKey for RawIssue {
    fn item_key(&self) -> &str {
        self.url_or_empty()
    }
}

impl ItemKey for CleanedIssue {
    fn item_key(&self) -> &str {
        &self.url
    }
}

impl ItemKey for String {
    fn item_key(&self) -> &str {
        self
    }
}

impl ItemKey for str {
    fn item_key(&self) -> &str {
        self
    }
}

impl<T: ItemKey + ?Sized> ItemKey for &T {
    fn item_key(&self) -> &str {
        (**self).item_key()
    }
}
