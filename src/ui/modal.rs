//! Search modal state machine.
//!
//! The controller owns [`ModalState`] and drives three observable effects
//! through a [`ModalSurface`]: visibility, page scroll lock, and input focus.
//!
//! ```text
//!            trigger
//!   Closed ───────────▶ Open
//!     ▲                   │ close control / Escape / backdrop click / result activated
//!     └───────────────────┘   (input and results cleared)
//! ```

use std::time::Duration;

use tracing::{debug, trace};

use crate::model::types::ModalState;

/// The page-side half of the modal: whatever actually shows it.
pub trait ModalSurface {
    /// Toggle the modal's active (visible) state.
    fn set_visible(&mut self, visible: bool);

    /// Lock or release page scrolling behind the modal.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Focus the search input once `delay` has elapsed.
    fn schedule_input_focus(&mut self, delay: Duration);

    /// Drop a focus request that has not fired yet.
    fn cancel_input_focus(&mut self);

    fn set_input_value(&mut self, value: &str);

    fn set_results_html(&mut self, html: &str);
}

/// Where a pointer click inside the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay itself, outside the dialog box.
    Backdrop,
    /// Anything inside the dialog box. Stopped before the backdrop handler.
    Content,
}

/// Why the modal closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseControl,
    Escape,
    Backdrop,
    ResultActivated,
}

pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug)]
pub struct ModalController<S> {
    state: ModalState,
    surface: S,
    focus_delay: Duration,
}

impl<S: ModalSurface> ModalController<S> {
    pub fn new(surface: S, focus_delay: Duration) -> Self {
        Self {
            state: ModalState::Closed,
            surface,
            focus_delay,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Show the modal, lock scrolling, and schedule input focus.
    /// Re-opening an open modal only re-schedules focus.
    pub fn open(&mut self) {
        if !self.state.is_open() {
            self.state = ModalState::Open;
            self.surface.set_visible(true);
            self.surface.set_scroll_locked(true);
            debug!(component = "modal", operation = "open", "search modal opened");
        }
        self.surface.schedule_input_focus(self.focus_delay);
    }

    /// Hide the modal and reset it to a blank state. Returns `false` if it was
    /// already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.state.is_open() {
            trace!(component = "modal", reason = ?reason, "close ignored, already closed");
            return false;
        }
        self.state = ModalState::Closed;
        self.surface.cancel_input_focus();
        self.surface.set_visible(false);
        self.surface.set_scroll_locked(false);
        self.surface.set_input_value("");
        self.surface.set_results_html("");
        debug!(
            component = "modal",
            operation = "close",
            reason = ?reason,
            "search modal closed"
        );
        true
    }

    /// Document-level keydown. Only Escape while open does anything.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == ESCAPE_KEY && self.state.is_open() {
            return self.close(CloseReason::Escape);
        }
        false
    }

    /// Click inside the modal root. Only the backdrop dismisses.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => self.close(CloseReason::Backdrop),
            ClickTarget::Content => false,
        }
    }

    pub fn show_results(&mut self, html: &str) {
        self.surface.set_results_html(html);
    }

    pub fn clear_results(&mut self) {
        self.surface.set_results_html("");
    }
}
