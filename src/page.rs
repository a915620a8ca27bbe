//! The rendered page the search core runs against.
//!
//! Wraps a parsed HTML document and discovers the modal scaffolding. When the
//! modal, input, or results container is missing the feature is unavailable
//! and [`Page::discover_scaffold`] returns `None`.

use std::path::{Path, PathBuf};

use scraper::{Html, Selector};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, SelectorConfig};

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A parsed, rendered page.
pub struct Page {
    html: Html,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

impl Page {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, PageError> {
        let markup = std::fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&markup))
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }

    /// Look up the modal scaffolding.
    pub fn discover_scaffold(&self, selectors: &SelectorConfig) -> Result<Option<Scaffold>, PageError> {
        let modal = SelectorConfig::parse("modal", &selectors.modal)?;
        let input = SelectorConfig::parse("input", &selectors.input)?;
        let results = SelectorConfig::parse("results", &selectors.results)?;
        let close = SelectorConfig::parse("close", &selectors.close)?;
        let content = SelectorConfig::parse("modal_content", &selectors.modal_content)?;
        let trigger = SelectorConfig::parse("trigger", &selectors.trigger)?;

        let missing: Vec<&str> = [("modal", &modal), ("input", &input), ("results", &results)]
            .into_iter()
            .filter(|(_, sel)| self.count(sel) == 0)
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            debug!(
                component = "page",
                operation = "discover_scaffold",
                missing = ?missing,
                "search scaffolding absent, search disabled"
            );
            return Ok(None);
        }

        let scaffold = Scaffold {
            trigger_count: self.count(&trigger),
            has_close_control: self.count(&close) > 0,
            has_content_area: self.count(&content) > 0,
        };
        debug!(
            component = "page",
            operation = "discover_scaffold",
            triggers = scaffold.trigger_count,
            close = scaffold.has_close_control,
            content_area = scaffold.has_content_area,
            "search scaffolding found"
        );
        Ok(Some(scaffold))
    }
}

/// What the page offers beyond the three required elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scaffold {
    /// Elements that open the modal (header icon, navbar icon, ...).
    pub trigger_count: usize,
    pub has_close_control: bool,
    pub has_content_area: bool,
}
