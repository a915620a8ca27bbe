//! Matches to results markup.
//!
//! Layout mirrors the theme's stylesheet:
//!
//! ```html
//! <div class="search-results-list">
//!   <a href="/p1" class="search-result-item" data-result-index="0">
//!     <div class="search-result-title">…</div>
//!     <div class="search-result-subtitle">…</div>
//!     <div class="search-result-content">…...</div>
//!   </a>
//! </div>
//! ```
//!
//! Zero matches render a single `search-no-results` placeholder instead.

use std::time::Instant;

use tracing::debug;

use super::escape::html_escape;
use super::highlight::Highlighter;
use crate::config::{RenderConfig, Strings};
use crate::model::types::SearchEntry;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Characters of `content` kept in the excerpt.
    pub excerpt_chars: usize,
    /// Appended after every excerpt, even one shorter than `excerpt_chars`.
    pub ellipsis: String,
    pub no_results: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default(), &Strings::default())
    }
}

impl RenderOptions {
    pub fn from_config(render: &RenderConfig, strings: &Strings) -> Self {
        Self {
            excerpt_chars: render.excerpt_chars,
            ellipsis: render.ellipsis.clone(),
            no_results: strings.no_results.clone(),
        }
    }
}

/// Rendered markup plus the navigation target of each result, by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedResults {
    pub html: String,
    pub targets: Vec<String>,
}

impl RenderedResults {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultRenderer {
    options: RenderOptions,
}

impl ResultRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, results: &[&SearchEntry], query: &str) -> RenderedResults {
        let started = Instant::now();
        if results.is_empty() {
            return RenderedResults {
                html: format!(
                    r#"<div class="search-no-results">{}</div>"#,
                    html_escape(&self.options.no_results)
                ),
                targets: Vec::new(),
            };
        }

        let highlighter = Highlighter::new(query);
        let mut html = String::with_capacity(results.len() * 400);
        let mut targets = Vec::with_capacity(results.len());
        html.push_str(r#"<div class="search-results-list">"#);
        for (idx, entry) in results.iter().enumerate() {
            let href = entry.href();
            html.push_str(&format!(
                r#"<a href="{}" class="search-result-item" data-result-index="{idx}">"#,
                html_escape(href)
            ));
            html.push_str(&format!(
                r#"<div class="search-result-title">{}</div>"#,
                highlighter.highlight(&entry.title)
            ));
            if !entry.subtitle.is_empty() {
                html.push_str(&format!(
                    r#"<div class="search-result-subtitle">{}</div>"#,
                    highlighter.highlight(&entry.subtitle)
                ));
            }
            if !entry.content.is_empty() {
                let excerpt = truncate_chars(&entry.content, self.options.excerpt_chars);
                html.push_str(&format!(
                    r#"<div class="search-result-content">{}{}</div>"#,
                    highlighter.highlight(excerpt),
                    html_escape(&self.options.ellipsis)
                ));
            }
            html.push_str("</a>");
            targets.push(href.to_string());
        }
        html.push_str("</div>");

        debug!(
            component = "renderer",
            operation = "render_results",
            results = results.len(),
            bytes = html.len(),
            duration_ms = started.elapsed().as_millis(),
            "results rendered"
        );
        RenderedResults { html, targets }
    }
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(entries: &[SearchEntry], query: &str) -> RenderedResults {
        let refs: Vec<&SearchEntry> = entries.iter().collect();
        ResultRenderer::default().render(&refs, query)
    }

    #[test]
    fn zero_results_render_placeholder_only() {
        let out = render(&[], "nothing");
        assert_eq!(out.html, r#"<div class="search-no-results">未找到相关结果</div>"#);
        assert!(!out.html.contains("search-results-list"));
        assert!(out.is_empty());
    }

    #[test]
    fn scenario_hello_highlights_both_entries_in_order() {
        let entries = [
            SearchEntry::new("Hello World", "", "first post", "/p1"),
            SearchEntry::new("Second", "", "hello again", "/p2"),
        ];
        let out = render(&entries, "hello");
        assert_eq!(out.targets, ["/p1", "/p2"]);
        let first = out.html.find("<mark>Hello</mark> World").unwrap();
        let second = out.html.find("<mark>hello</mark> again").unwrap();
        assert!(first < second);
    }

    #[test]
    fn script_title_is_inert() {
        let entries = [SearchEntry::new("<script>alert(1)</script>", "", "", "/x")];
        let out = render(&entries, "alert");
        assert!(!out.html.contains("<script"));
        assert!(
            out.html
                .contains("&lt;script&gt;<mark>alert</mark>(1)&lt;/script&gt;")
        );
    }

    #[test]
    fn url_is_escaped_and_defaulted() {
        let entries = [
            SearchEntry::new("a", "", "", r#"/p?x=1&y="2""#),
            SearchEntry::new("a", "", "", ""),
            SearchEntry::new("a", "", "", "javascript:alert(1)"),
        ];
        let out = render(&entries, "a");
        assert!(out.html.contains(r#"href="/p?x=1&amp;y=&quot;2&quot;""#));
        assert_eq!(out.targets[1], "#");
        assert_eq!(out.targets[2], "#");
        assert!(!out.html.contains("javascript:"));
    }

    #[test]
    fn optional_blocks_are_omitted_when_empty() {
        let out = render(&[SearchEntry::new("Only title", "", "", "/t")], "only");
        assert!(out.html.contains("search-result-title"));
        assert!(!out.html.contains("search-result-subtitle"));
        assert!(!out.html.contains("search-result-content"));
    }

    #[test]
    fn short_excerpt_still_gets_ellipsis() {
        let out = render(&[SearchEntry::new("t", "", "short", "/t")], "short");
        assert!(
            out.html
                .contains(r#"<div class="search-result-content"><mark>short</mark>...</div>"#)
        );
    }

    #[test]
    fn match_beyond_excerpt_window_is_not_highlighted() {
        let content = format!("{}needle{}", "x".repeat(190), "y".repeat(4));
        assert_eq!(content.chars().count(), 200);
        let out = render(&[SearchEntry::new("t", "", content.clone(), "/t")], "needle");
        let expected = format!(
            r#"<div class="search-result-content">{}...</div>"#,
            "x".repeat(150)
        );
        assert!(out.html.contains(&expected));
        assert!(!out.html.contains("<mark>"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "搜".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "搜搜搜");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn localized_placeholder_is_escaped() {
        let renderer = ResultRenderer::new(RenderOptions {
            no_results: "No <results>".to_string(),
            ..Default::default()
        });
        let out = renderer.render(&[], "q");
        assert!(out.html.contains("No &lt;results&gt;"));
    }
}
