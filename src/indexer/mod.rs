//! Index builder: populates the [`IndexStore`] in two phases.
//!
//! 1. **Scrape** (synchronous): post previews rendered on the current page.
//! 2. **Upgrade** (asynchronous): the precomputed `/search.json`. A non-empty
//!    payload replaces the scraped corpus wholesale; anything else leaves it
//!    alone.
//!
//! The upgrade is last-writer-wins. Results already rendered from the scraped
//! corpus are not recomputed when it lands.

pub mod remote;
pub mod scrape;

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, SelectorConfig};
use crate::model::types::SearchEntry;
use crate::page::Page;
use crate::search::store::{IndexOrigin, IndexStore};

pub use remote::{DirIndexSource, HttpIndexSource, IndexSource, RemoteIndexError, parse_payload};
pub use scrape::{PreviewSelectors, scrape_previews};

/// What happened to the store after an upgrade attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// The remote corpus replaced the scraped one.
    Installed { entries: usize, replaced: usize },
    /// The store kept whatever it held; `reason` is for diagnostics only.
    Kept { reason: String },
}

impl UpgradeOutcome {
    pub fn installed(&self) -> bool {
        matches!(self, UpgradeOutcome::Installed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct IndexBuilder {
    store: IndexStore,
    selectors: PreviewSelectors,
}

impl IndexBuilder {
    pub fn new(store: IndexStore, selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            selectors: PreviewSelectors::from_config(selectors)?,
        })
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Scrape phase. Installs every indexable preview on `page` and returns
    /// how many. Runs once per store: a second call, or a call after the
    /// remote corpus landed, leaves the store untouched and returns 0.
    ///
    /// Not re-entrant: calls must not overlap.
    pub fn build_index(&self, page: &Page) -> usize {
        if self.store.origin() != IndexOrigin::Empty {
            debug!(
                component = "indexer",
                operation = "scrape",
                origin = ?self.store.origin(),
                "index already built, scrape skipped"
            );
            return 0;
        }
        let started = Instant::now();
        let entries = scrape_previews(page.html(), &self.selectors);
        let count = entries.len();
        if !self.store.install_scraped(entries) {
            return 0;
        }
        info!(
            component = "indexer",
            operation = "scrape",
            entries = count,
            duration_ms = started.elapsed().as_millis(),
            "scrape-phase index built"
        );
        count
    }

    /// Upgrade phase against `source`. See [`install_upgrade`].
    pub async fn upgrade<S: IndexSource>(&self, source: &S) -> UpgradeOutcome {
        run_upgrade(&self.store, source).await
    }
}

/// Fetch from `source` and install the result into `store`.
///
/// Takes the store by handle so the future can outlive the component that
/// started it (it is never cancelled).
pub async fn run_upgrade<S: IndexSource>(store: &IndexStore, source: &S) -> UpgradeOutcome {
    let started = Instant::now();
    let fetched = source.fetch().await;
    debug!(
        component = "indexer",
        operation = "fetch_remote",
        source = %source.describe(),
        ok = fetched.is_ok(),
        duration_ms = started.elapsed().as_millis(),
        "remote index fetch finished"
    );
    install_upgrade(store, fetched)
}

/// Install a fetched corpus, or keep the current one on failure.
pub fn install_upgrade(
    store: &IndexStore,
    fetched: Result<Vec<SearchEntry>, RemoteIndexError>,
) -> UpgradeOutcome {
    match fetched {
        Ok(entries) if !entries.is_empty() => {
            let replaced = store.len();
            let count = entries.len();
            store.replace(entries, IndexOrigin::Remote);
            UpgradeOutcome::Installed {
                entries: count,
                replaced,
            }
        }
        Ok(_) => keep(store, RemoteIndexError::Empty),
        Err(err) => keep(store, err),
    }
}

fn keep(store: &IndexStore, err: RemoteIndexError) -> UpgradeOutcome {
    debug!(
        component = "indexer",
        operation = "install_upgrade",
        kept = store.len(),
        error = %err,
        "remote index unavailable, keeping current index"
    );
    UpgradeOutcome::Kept {
        reason: err.to_string(),
    }
}
