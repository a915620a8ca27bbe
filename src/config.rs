//! Search configuration.
//!
//! Loaded from TOML, with a handful of environment overrides. Every field has
//! a default matching the theme's stock markup, so an absent config file is
//! the common case.
//!
//! ```toml
//! [index]
//! remote_path = "/search.json"
//! http_timeout_secs = 5
//!
//! [render]
//! excerpt_chars = 150
//! ellipsis = "..."
//!
//! [strings]
//! no_results = "No results found"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the site root URL the remote index resolves against.
pub const ENV_SITE_ROOT: &str = "BLOG_SEARCH_SITE_ROOT";
/// Environment variable overriding `[index].remote_path`.
pub const ENV_REMOTE_PATH: &str = "BLOG_SEARCH_REMOTE_PATH";
/// Environment variable overriding `[strings].no_results`.
pub const ENV_NO_RESULTS: &str = "BLOG_SEARCH_NO_RESULTS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("Invalid selector for `{field}`: {selector}")]
    Selector { field: &'static str, selector: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub index: IndexConfig,
    pub render: RenderConfig,
    pub modal: ModalConfig,
    pub selectors: SelectorConfig,
    pub strings: Strings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    /// Site-root-relative path of the precomputed index.
    pub remote_path: String,
    /// Site root the remote path resolves against. Unset means no upgrade over HTTP.
    pub site_root: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            remote_path: "/search.json".to_string(),
            site_root: None,
            http_timeout_secs: 5,
        }
    }
}

impl IndexConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Characters of `content` kept in a result excerpt.
    pub excerpt_chars: usize,
    /// Appended to every excerpt, whatever its length.
    pub ellipsis: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: 150,
            ellipsis: "...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModalConfig {
    /// Delay between opening the modal and focusing the input, letting the
    /// opacity transition settle.
    pub focus_delay_ms: u64,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self { focus_delay_ms: 100 }
    }
}

impl ModalConfig {
    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}

/// CSS selectors for the markup the search core reads and discovers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    pub post_preview: String,
    pub post_link: String,
    pub post_title: String,
    pub post_subtitle: String,
    pub post_content: String,
    pub modal: String,
    pub input: String,
    pub results: String,
    pub close: String,
    pub modal_content: String,
    pub trigger: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            post_preview: ".post-preview".to_string(),
            post_link: "a".to_string(),
            post_title: ".post-title".to_string(),
            post_subtitle: ".post-subtitle".to_string(),
            post_content: ".post-content-preview".to_string(),
            modal: "#search-modal".to_string(),
            input: "#search-input".to_string(),
            results: "#search-results".to_string(),
            close: ".search-modal-close".to_string(),
            modal_content: ".search-modal-content".to_string(),
            trigger: ".search-icon".to_string(),
        }
    }
}

impl SelectorConfig {
    fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("post_preview", self.post_preview.as_str()),
            ("post_link", self.post_link.as_str()),
            ("post_title", self.post_title.as_str()),
            ("post_subtitle", self.post_subtitle.as_str()),
            ("post_content", self.post_content.as_str()),
            ("modal", self.modal.as_str()),
            ("input", self.input.as_str()),
            ("results", self.results.as_str()),
            ("close", self.close.as_str()),
            ("modal_content", self.modal_content.as_str()),
            ("trigger", self.trigger.as_str()),
        ]
    }

    /// Parse one configured selector.
    pub fn parse(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
        Selector::parse(selector).map_err(|_| ConfigError::Selector {
            field,
            selector: selector.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, selector) in self.fields() {
            Self::parse(field, selector)?;
        }
        Ok(())
    }
}

/// User-visible resource strings. Defaults are the theme's Chinese originals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Strings {
    pub no_results: String,
    pub modal_label: String,
    pub close_label: String,
    pub input_label: String,
    pub input_placeholder: String,
    pub trigger_label: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            no_results: "未找到相关结果".to_string(),
            modal_label: "搜索".to_string(),
            close_label: "关闭搜索".to_string(),
            input_label: "搜索文章".to_string(),
            input_placeholder: "搜索文章...".to_string(),
            trigger_label: "打开搜索".to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the platform config dir when `path` is `None`.
    /// A missing default file yields the defaults; a missing explicit file is an error.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::read(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::read(&p)?,
                _ => {
                    debug!(component = "config", "no config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(component = "config", path = %path.display(), "loaded config file");
        Ok(toml::from_str(&text)?)
    }

    /// Apply `BLOG_SEARCH_*` environment overrides (a `.env` file is honored).
    pub fn apply_env(&mut self) {
        if let Ok(root) = dotenvy::var(ENV_SITE_ROOT)
            && !root.trim().is_empty()
        {
            self.index.site_root = Some(root);
        }
        if let Ok(path) = dotenvy::var(ENV_REMOTE_PATH)
            && !path.trim().is_empty()
        {
            self.index.remote_path = path;
        }
        if let Ok(text) = dotenvy::var(ENV_NO_RESULTS) {
            self.strings.no_results = text;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selectors.validate()?;
        if self.index.remote_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "index.remote_path must not be empty".to_string(),
            ));
        }
        if self.render.excerpt_chars == 0 {
            return Err(ConfigError::Validation(
                "render.excerpt_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "blog-search", "blog-search")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
