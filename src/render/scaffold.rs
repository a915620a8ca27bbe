use super::escape::html_escape;
use crate::config::Strings;

/// Modal markup with the stock ids and classes the controller discovers.
pub fn render_modal_scaffold(strings: &Strings) -> String {
    format!(
        r#"<div id="search-modal" class="search-modal" role="dialog" aria-modal="true" aria-label="{modal}">
  <div class="search-modal-content">
    <button type="button" class="search-modal-close" aria-label="{close}">&times;</button>
    <input type="search" id="search-input" class="search-input" autocomplete="off" placeholder="{placeholder}" aria-label="{input}">
    <div id="search-results" class="search-results" aria-live="polite"></div>
  </div>
</div>
"#,
        modal = html_escape(&strings.modal_label),
        close = html_escape(&strings.close_label),
        placeholder = html_escape(&strings.input_placeholder),
        input = html_escape(&strings.input_label),
    )
}

/// One trigger element; the theme places one in the header and one in the navbar.
pub fn render_trigger(strings: &Strings) -> String {
    format!(
        r#"<span class="search-icon" role="button" tabindex="0" aria-label="{}"></span>"#,
        html_escape(&strings.trigger_label)
    )
}
