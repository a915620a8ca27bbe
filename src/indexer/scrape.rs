//! Scrape-phase indexing: read post previews already rendered on the page.

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::config::{ConfigError, SelectorConfig};
use crate::model::types::SearchEntry;

/// Parsed selectors for the post-preview markup.
#[derive(Debug, Clone)]
pub struct PreviewSelectors {
    preview: Selector,
    link: Selector,
    title: Selector,
    subtitle: Selector,
    content: Selector,
}

impl PreviewSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            preview: SelectorConfig::parse("post_preview", &config.post_preview)?,
            link: SelectorConfig::parse("post_link", &config.post_link)?,
            title: SelectorConfig::parse("post_title", &config.post_title)?,
            subtitle: SelectorConfig::parse("post_subtitle", &config.post_subtitle)?,
            content: SelectorConfig::parse("post_content", &config.post_content)?,
        })
    }
}

/// Trimmed text content of the first descendant matching `selector`.
fn text_of(preview: &ElementRef<'_>, selector: &Selector) -> String {
    preview
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// One entry per preview, in document order.
///
/// A preview without a link is skipped, as is one with neither a title nor an
/// excerpt. A link without `href` yields an empty URL.
pub fn scrape_previews(html: &Html, selectors: &PreviewSelectors) -> Vec<SearchEntry> {
    let mut entries = Vec::new();
    for (position, preview) in html.select(&selectors.preview).enumerate() {
        let Some(link) = preview.select(&selectors.link).next() else {
            trace!(component = "scrape", position, "preview without link skipped");
            continue;
        };
        let entry = SearchEntry {
            title: text_of(&preview, &selectors.title),
            subtitle: text_of(&preview, &selectors.subtitle),
            content: text_of(&preview, &selectors.content),
            url: link.value().attr("href").unwrap_or_default().to_string(),
        };
        if !entry.is_indexable() {
            trace!(component = "scrape", position, "empty preview skipped");
            continue;
        }
        entries.push(entry);
    }
    entries
}
