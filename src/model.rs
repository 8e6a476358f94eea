//! Wire types for collected news items and the per-run digest artifact.

use serde::{Deserialize, Serialize};

/// Cap on items carried by one digest; collection past this point is
/// reported in the summary but truncated from the artifact.
pub const MAX_DIGEST_ITEMS: usize = 10;

/// One news row from a single upstream source.
///
/// Fetchers always produce a non-empty `title` and `url` and a `summary`
/// that falls back to a source-specific placeholder. Items arriving over the
/// webhook may carry only a `title`; the other fields default to empty and
/// the formatter skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewsItem {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
            stars: None,
            category: None,
        }
    }
}

/// Timestamped, size-capped result of one collector run. Write-once: it is
/// serialized to `result.json` and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    /// ISO-8601 capture time.
    pub timestamp: String,
    /// Human-readable count line, reporting the pre-truncation total.
    pub summary: String,
    pub items: Vec<NewsItem>,
}

/// Truncate to at most `max` characters (not bytes), keeping char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
