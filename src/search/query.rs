use crate::model::types::SearchEntry;

/// Filter `index` down to the entries whose title, subtitle and content
/// contain `query`, ignoring case.
///
/// Empty or whitespace-only queries match nothing. The result keeps the
/// index order; there is no scoring. The query is used as given otherwise,
/// so callers trim raw input first.
pub fn search<'a>(index: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let hits: Vec<&SearchEntry> = index
        .iter()
        .filter(|entry| matches_lowered(entry, &needle))
        .collect();
    tracing::trace!(
        component = "query",
        index_len = index.len(),
        hits = hits.len(),
        "search"
    );
    hits
}

/// Whether `entry` contains `needle`, which must already be lowercase.
pub fn matches_lowered(entry: &SearchEntry, needle: &str) -> bool {
    entry.haystack().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx() -> Vec<SearchEntry> {
        vec![
            SearchEntry::new("Hello World", "", "first post", "/p1"),
            SearchEntry::new("Second", "", "hello again", "/p2"),
            SearchEntry::new("Third", "Rust notes", "ownership", "/p3"),
        ]
    }

    #[test]
    fn empty_and_blank_queries_match_nothing() {
        let index = idx();
        assert!(search(&index, "").is_empty());
        assert!(search(&index, "   \t\n").is_empty());
    }

    #[test]
    fn case_insensitive_in_index_order() {
        let index = idx();
        let hits = search(&index, "HELLO");
        let urls: Vec<&str> = hits.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, ["/p1", "/p2"]);
    }

    #[test]
    fn subtitle_is_searched() {
        let index = idx();
        let hits = search(&index, "rust");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/p3");
    }

    #[test]
    fn match_can_span_field_separator() {
        // Fields are joined with a single space before matching.
        let index = idx();
        let hits = search(&index, "world first");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/p1");
    }

    #[test]
    fn no_tokenization() {
        let index = idx();
        assert!(search(&index, "post first").is_empty());
        assert_eq!(search(&index, "ownersh").len(), 1);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let index = vec![
            SearchEntry::new("a.b test", "", "", "/x"),
            SearchEntry::new("axb test", "", "", "/y"),
        ];
        let hits = search(&index, "a.b");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/x");
    }

    #[test]
    fn non_ascii_case_folding() {
        let index = vec![SearchEntry::new("Ärger mit Ümlauten", "", "", "/u")];
        assert_eq!(search(&index, "ärger").len(), 1);
        let index = vec![SearchEntry::new("搜索功能", "", "", "/zh")];
        assert_eq!(search(&index, "搜索").len(), 1);
    }
}
