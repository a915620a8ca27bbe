use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::escape::html_escape;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Wraps every case-insensitive occurrence of a literal query in `<mark>`.
///
/// Matching runs on the raw text; each matched and unmatched segment is
/// escaped before being written, so the query can never match inside an
/// entity and the `<mark>` tags are never escaped.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self { pattern: None };
        }
        let pattern = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(err) => {
                // Only reachable for queries past the regex size limit.
                warn!(component = "highlight", error = %err, "query not highlightable");
                None
            }
        };
        Self { pattern }
    }

    /// Escaped `text` with matches wrapped.
    pub fn highlight(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return html_escape(text);
        };
        let mut out = String::with_capacity(text.len() + 16);
        let mut last = 0;
        for m in pattern.find_iter(text) {
            out.push_str(&html_escape(&text[last..m.start()]));
            out.push_str(MARK_OPEN);
            out.push_str(&html_escape(m.as_str()));
            out.push_str(MARK_CLOSE);
            last = m.end();
        }
        out.push_str(&html_escape(&text[last..]));
        out
    }
}
