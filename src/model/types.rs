//! Normalized entity structs.

use serde::{Deserialize, Serialize};

/// Placeholder navigation target for entries without a usable URL.
pub const PLACEHOLDER_URL: &str = "#";

/// URL schemes that would execute script when followed.
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// One indexable post: the unit both the page scrape and `/search.json` produce.
///
/// Every field may be empty. Missing fields in a remote payload deserialize
/// as empty strings; a field of the wrong JSON type fails the whole payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
}

impl SearchEntry {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            content: content.into(),
            url: url.into(),
        }
    }

    /// Scraped previews with neither a title nor an excerpt are not indexed.
    pub fn is_indexable(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }

    /// Text the query engine matches against.
    pub fn haystack(&self) -> String {
        let mut text =
            String::with_capacity(self.title.len() + self.subtitle.len() + self.content.len() + 2);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.subtitle);
        text.push(' ');
        text.push_str(&self.content);
        text
    }

    /// Navigation target, falling back to [`PLACEHOLDER_URL`] when the URL is
    /// empty or uses a script-executing scheme.
    pub fn href(&self) -> &str {
        let url = self.url.trim();
        if url.is_empty() {
            return PLACEHOLDER_URL;
        }
        let lowered: String = url
            .chars()
            .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
            .take(16)
            .collect::<String>()
            .to_ascii_lowercase();
        if SCRIPT_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
            return PLACEHOLDER_URL;
        }
        url
    }
}

/// Open/closed state of the search modal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        matches!(self, ModalState::Open)
    }
}
