//! In-memory [`ModalSurface`] for the CLI and tests.
//!
//! Records what a browser page would show. Timers do not run on their own;
//! call [`HeadlessSurface::fire_timers`] to let the focus delay elapse.

use std::time::Duration;

use serde::Serialize;

use super::modal::ModalSurface;

#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlessSurface {
    pub visible: bool,
    pub scroll_locked: bool,
    pub input_value: String,
    pub input_focused: bool,
    pub pending_focus: Option<Duration>,
    pub results_html: String,
    /// How many times visibility actually flipped.
    pub visible_changes: usize,
}

impl HeadlessSurface {
    /// Run the pending focus timer, if any.
    pub fn fire_timers(&mut self) {
        if self.pending_focus.take().is_some() {
            self.input_focused = true;
        }
    }
}

impl ModalSurface for HeadlessSurface {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible_changes += 1;
        }
        self.visible = visible;
        if !visible {
            self.input_focused = false;
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn schedule_input_focus(&mut self, delay: Duration) {
        self.pending_focus = Some(delay);
    }

    fn cancel_input_focus(&mut self) {
        self.pending_focus = None;
    }

    fn set_input_value(&mut self, value: &str) {
        self.input_value = value.to_string();
    }

    fn set_results_html(&mut self, html: &str) {
        self.results_html = html.to_string();
    }
}
