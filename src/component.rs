//! The search component: one instance per page.
//!
//! Owns the index store handle, the builder, the renderer, and the modal
//! controller, and routes page events between them. Nothing here is global;
//! the only state shared outside the instance is the [`IndexStore`] handle an
//! in-flight upgrade writes into.

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::indexer::{IndexBuilder, IndexSource, UpgradeOutcome, run_upgrade};
use crate::model::types::ModalState;
use crate::page::{Page, PageError, Scaffold};
use crate::render::{RenderOptions, ResultRenderer};
use crate::search::{IndexStore, search};
use crate::ui::modal::{ClickTarget, CloseReason, ModalController, ModalSurface};

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Any search trigger (header icon, navbar icon) was activated.
    TriggerActivated,
    CloseActivated,
    /// Document-level keydown, by DOM key name.
    KeyDown(String),
    Click(ClickTarget),
    /// The input's raw value after an edit.
    Input(String),
    /// The n-th rendered result was activated.
    ResultActivated(usize),
}

/// What the component did in response to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dispatch {
    Ignored,
    Opened,
    Closed,
    /// Results container cleared (empty query).
    Cleared,
    Rendered { results: usize },
    /// The modal closed; the host continues its default navigation.
    Navigate { url: String },
}

pub struct SearchComponent<S> {
    store: IndexStore,
    builder: IndexBuilder,
    renderer: ResultRenderer,
    modal: ModalController<S>,
    scaffold: Scaffold,
    targets: Vec<String>,
}

impl<S: ModalSurface> SearchComponent<S> {
    /// Discover the scaffolding on `page` and build the scrape-phase index.
    ///
    /// Returns `Ok(None)` when the modal, input, or results container is
    /// missing: search is simply unavailable on that page.
    pub fn init(page: &Page, config: &SearchConfig, surface: S) -> Result<Option<Self>, PageError> {
        let Some(scaffold) = page.discover_scaffold(&config.selectors)? else {
            return Ok(None);
        };
        let store = IndexStore::new();
        let builder = IndexBuilder::new(store.clone(), &config.selectors)?;
        builder.build_index(page);
        info!(
            component = "search",
            operation = "init",
            entries = store.len(),
            triggers = scaffold.trigger_count,
            "search initialized"
        );
        Ok(Some(Self {
            store,
            builder,
            renderer: ResultRenderer::new(RenderOptions::from_config(
                &config.render,
                &config.strings,
            )),
            modal: ModalController::new(surface, config.modal.focus_delay()),
            scaffold,
            targets: Vec::new(),
        }))
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn scaffold(&self) -> Scaffold {
        self.scaffold
    }

    pub fn state(&self) -> ModalState {
        self.modal.state()
    }

    pub fn surface(&self) -> &S {
        self.modal.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.modal.surface_mut()
    }

    /// Run the upgrade phase inline.
    pub async fn upgrade<I: IndexSource>(&self, source: &I) -> UpgradeOutcome {
        self.builder.upgrade(source).await
    }

    /// Start the upgrade phase in the background. It is never cancelled; if it
    /// lands after the modal was closed or reopened the new corpus is simply
    /// used by the next query.
    pub fn spawn_upgrade<I>(&self, source: I) -> JoinHandle<UpgradeOutcome>
    where
        I: IndexSource + Send + Sync + 'static,
    {
        let store = self.store.clone();
        tokio::spawn(async move { run_upgrade(&store, &source).await })
    }

    pub fn dispatch(&mut self, event: UiEvent) -> Dispatch {
        debug!(component = "search", event = ?event, "dispatch");
        match event {
            UiEvent::TriggerActivated => {
                self.modal.open();
                Dispatch::Opened
            }
            UiEvent::CloseActivated => self.close(CloseReason::CloseControl),
            UiEvent::KeyDown(key) => {
                if self.modal.handle_key(&key) {
                    self.targets.clear();
                    Dispatch::Closed
                } else {
                    Dispatch::Ignored
                }
            }
            UiEvent::Click(target) => {
                if self.modal.handle_click(target) {
                    self.targets.clear();
                    Dispatch::Closed
                } else {
                    Dispatch::Ignored
                }
            }
            UiEvent::Input(raw) => self.perform_search(raw.trim()),
            UiEvent::ResultActivated(idx) => match self.targets.get(idx).cloned() {
                Some(url) => {
                    self.close(CloseReason::ResultActivated);
                    Dispatch::Navigate { url }
                }
                None => Dispatch::Ignored,
            },
        }
    }

    fn close(&mut self, reason: CloseReason) -> Dispatch {
        if self.modal.close(reason) {
            self.targets.clear();
            Dispatch::Closed
        } else {
            Dispatch::Ignored
        }
    }

    /// Filter the current corpus and show the results. Reads a snapshot, so an
    /// upgrade landing mid-render only affects the next query.
    fn perform_search(&mut self, query: &str) -> Dispatch {
        if query.is_empty() {
            self.targets.clear();
            self.modal.clear_results();
            return Dispatch::Cleared;
        }
        let index = self.store.snapshot();
        let hits = search(&index, query);
        let rendered = self.renderer.render(&hits, query);
        self.modal.show_results(&rendered.html);
        self.targets = rendered.targets;
        Dispatch::Rendered {
            results: self.targets.len(),
        }
    }
}
