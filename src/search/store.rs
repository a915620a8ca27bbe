//! The index store shared by the builder (writer) and the query path (reader).
//!
//! Replacement swaps an `Arc` under a short write lock, so a query that already
//! took a snapshot keeps filtering the corpus it started with.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::model::types::SearchEntry;

/// Where the current corpus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOrigin {
    Empty,
    Scrape,
    Remote,
}

#[derive(Debug)]
struct Inner {
    entries: Arc<Vec<SearchEntry>>,
    origin: IndexOrigin,
    generation: u64,
}

/// Cloneable handle to the current search corpus.
#[derive(Debug, Clone)]
pub struct IndexStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: Arc::new(Vec::new()),
                origin: IndexOrigin::Empty,
                generation: 0,
            })),
        }
    }

    /// Current corpus. Cheap; later replacements do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<Vec<SearchEntry>> {
        Arc::clone(&self.inner.read().entries)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn origin(&self) -> IndexOrigin {
        self.inner.read().origin
    }

    /// Bumped on every [`IndexStore::replace`].
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Install the scrape-phase corpus. Only an `Empty` store accepts it; once
    /// populated (by a scrape or a remote install) this is a no-op returning
    /// `false`. Does not count as a replacement.
    pub fn install_scraped(&self, entries: Vec<SearchEntry>) -> bool {
        let mut inner = self.inner.write();
        if inner.origin != IndexOrigin::Empty {
            debug!(
                component = "index_store",
                operation = "install_scraped",
                origin = ?inner.origin,
                current = inner.entries.len(),
                "store already populated, scrape ignored"
            );
            return false;
        }
        inner.entries = Arc::new(entries);
        inner.origin = IndexOrigin::Scrape;
        debug!(
            component = "index_store",
            operation = "install_scraped",
            total = inner.entries.len(),
            "scraped entries installed"
        );
        true
    }

    /// Swap in a complete corpus. Never merges with what was there.
    pub fn replace(&self, entries: Vec<SearchEntry>, origin: IndexOrigin) {
        let mut inner = self.inner.write();
        let previous = inner.entries.len();
        inner.entries = Arc::new(entries);
        inner.origin = origin;
        inner.generation += 1;
        info!(
            component = "index_store",
            operation = "replace",
            previous,
            current = inner.entries.len(),
            origin = ?origin,
            generation = inner.generation,
            "index replaced"
        );
    }
}
