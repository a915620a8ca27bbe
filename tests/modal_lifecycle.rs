//! Modal open/close lifecycle driven through page events.

mod util;

use std::time::Duration;

use blog_search::component::{Dispatch, SearchComponent, UiEvent};
use blog_search::config::SearchConfig;
use blog_search::model::types::ModalState;
use blog_search::page::Page;
use blog_search::ui::headless::HeadlessSurface;
use blog_search::ui::modal::ClickTarget;
use util::fixture_page;

fn component() -> SearchComponent<HeadlessSurface> {
    SearchComponent::init(
        &Page::parse(&fixture_page()),
        &SearchConfig::default(),
        HeadlessSurface::default(),
    )
    .unwrap()
    .unwrap()
}

fn type_query(c: &mut SearchComponent<HeadlessSurface>, text: &str) -> Dispatch {
    c.surface_mut().input_value = text.to_string();
    c.dispatch(UiEvent::Input(text.to_string()))
}

#[test]
fn fixture_exposes_both_triggers() {
    let c = component();
    assert_eq!(c.scaffold().trigger_count, 2);
    assert!(c.scaffold().has_close_control);
}

#[test]
fn open_focuses_input_after_delay() {
    let mut c = component();
    assert_eq!(c.dispatch(UiEvent::TriggerActivated), Dispatch::Opened);
    assert_eq!(c.state(), ModalState::Open);
    assert!(c.surface().scroll_locked);
    assert!(!c.surface().input_focused);
    assert_eq!(c.surface().pending_focus, Some(Duration::from_millis(100)));

    c.surface_mut().fire_timers();
    assert!(c.surface().input_focused);
}

#[test]
fn escape_closes_and_resets() {
    let mut c = component();
    c.dispatch(UiEvent::TriggerActivated);
    type_query(&mut c, "hello");
    assert!(!c.surface().results_html.is_empty());

    assert_eq!(
        c.dispatch(UiEvent::KeyDown("Escape".to_string())),
        Dispatch::Closed
    );
    assert_eq!(c.state(), ModalState::Closed);
    assert_eq!(c.surface().input_value, "");
    assert_eq!(c.surface().results_html, "");
    assert!(!c.surface().scroll_locked);
    assert!(!c.surface().visible);
}

#[test]
fn escape_when_closed_does_nothing() {
    let mut c = component();
    assert_eq!(
        c.dispatch(UiEvent::KeyDown("Escape".to_string())),
        Dispatch::Ignored
    );
}

#[test]
fn content_clicks_do_not_reach_backdrop() {
    let mut c = component();
    c.dispatch(UiEvent::TriggerActivated);
    assert_eq!(
        c.dispatch(UiEvent::Click(ClickTarget::Content)),
        Dispatch::Ignored
    );
    assert_eq!(c.state(), ModalState::Open);
    assert_eq!(
        c.dispatch(UiEvent::Click(ClickTarget::Backdrop)),
        Dispatch::Closed
    );
}

#[test]
fn reopening_starts_blank_with_same_index() {
    let mut c = component();
    c.dispatch(UiEvent::TriggerActivated);
    type_query(&mut c, "second");
    c.dispatch(UiEvent::CloseActivated);
    c.dispatch(UiEvent::TriggerActivated);

    assert_eq!(c.surface().input_value, "");
    assert_eq!(c.surface().results_html, "");
    assert_eq!(c.store().len(), 2);
    assert_eq!(type_query(&mut c, "second"), Dispatch::Rendered { results: 1 });
}

#[test]
fn result_activation_dismisses_and_keeps_navigation() {
    let mut c = component();
    c.dispatch(UiEvent::TriggerActivated);
    type_query(&mut c, "hello");
    assert_eq!(
        c.dispatch(UiEvent::ResultActivated(1)),
        Dispatch::Navigate {
            url: "/2024/02/10/second/".to_string()
        }
    );
    assert_eq!(c.state(), ModalState::Closed);
    assert_eq!(c.dispatch(UiEvent::ResultActivated(0)), Dispatch::Ignored);
}

#[test]
fn clearing_the_input_clears_results() {
    let mut c = component();
    c.dispatch(UiEvent::TriggerActivated);
    type_query(&mut c, "hello");
    assert_eq!(type_query(&mut c, ""), Dispatch::Cleared);
    assert_eq!(c.surface().results_html, "");
}

#[test]
fn localized_no_results_message() {
    let mut config = SearchConfig::default();
    config.strings.no_results = "No matching posts".to_string();
    let mut c = SearchComponent::init(
        &Page::parse(&fixture_page()),
        &config,
        HeadlessSurface::default(),
    )
    .unwrap()
    .unwrap();
    c.dispatch(UiEvent::TriggerActivated);
    assert_eq!(type_query(&mut c, "kubernetes"), Dispatch::Rendered { results: 0 });
    assert_eq!(
        c.surface().results_html,
        r#"<div class="search-no-results">No matching posts</div>"#
    );
}
