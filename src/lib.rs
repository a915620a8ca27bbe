pub mod component;
pub mod config;
pub mod indexer;
pub mod model;
pub mod page;
pub mod render;
pub mod search;
pub mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use component::{SearchComponent, UiEvent};
use config::SearchConfig;
use indexer::{DirIndexSource, HttpIndexSource, IndexBuilder, UpgradeOutcome};
use page::Page;
use search::IndexStore;
use ui::headless::HeadlessSurface;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "blog-search",
    version,
    about = "Run the blog's client-side search against a rendered page"
)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the modal on a page, type a query, print the results markup
    Query {
        /// Rendered HTML page
        page: PathBuf,

        /// Query as typed into the search input
        query: String,

        /// Site root URL the remote index resolves against
        #[arg(long)]
        site_root: Option<String>,

        /// Built site directory to read the remote index from instead of HTTP
        #[arg(long, conflicts_with = "site_root")]
        site_dir: Option<PathBuf>,

        /// Search the scrape-phase index only
        #[arg(long, default_value_t = false)]
        no_upgrade: bool,

        /// Print a JSON report instead of markup
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report the scaffolding and scrape-phase index of a page as JSON
    Inspect {
        page: PathBuf,
    },
    /// Print the modal markup with localized labels
    Scaffold,
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = SearchConfig::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Query {
            page,
            query,
            site_root,
            site_dir,
            no_upgrade,
            json,
        } => {
            let source = if no_upgrade {
                UpgradeSource::None
            } else if let Some(dir) = site_dir {
                UpgradeSource::Dir(dir)
            } else if let Some(root) = site_root.or_else(|| config.index.site_root.clone()) {
                UpgradeSource::Http(root)
            } else {
                UpgradeSource::None
            };
            run_query(&config, &page, &query, source, json).await
        }
        Commands::Inspect { page } => run_inspect(&config, &page),
        Commands::Scaffold => {
            print!("{}", render::render_modal_scaffold(&config.strings));
            println!("{}", render::render_trigger(&config.strings));
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "blog-search", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "blog_search=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

enum UpgradeSource {
    None,
    Dir(PathBuf),
    Http(String),
}

async fn upgrade(
    component: &SearchComponent<HeadlessSurface>,
    config: &SearchConfig,
    source: UpgradeSource,
) -> Result<Option<UpgradeOutcome>> {
    let handle = match source {
        UpgradeSource::None => return Ok(None),
        UpgradeSource::Dir(dir) => {
            component.spawn_upgrade(DirIndexSource::new(&dir, &config.index.remote_path))
        }
        UpgradeSource::Http(root) => match HttpIndexSource::new(
            &root,
            &config.index.remote_path,
            config.index.http_timeout(),
        ) {
            Ok(source) => component.spawn_upgrade(source),
            Err(err) => {
                warn!(component = "cli", error = %err, "remote index source unusable");
                return Ok(Some(UpgradeOutcome::Kept {
                    reason: err.to_string(),
                }));
            }
        },
    };
    let outcome = handle.await.context("remote index task failed")?;
    debug!(component = "cli", outcome = ?outcome, "upgrade finished");
    Ok(Some(outcome))
}

async fn run_query(
    config: &SearchConfig,
    page_path: &Path,
    query: &str,
    source: UpgradeSource,
    json: bool,
) -> Result<()> {
    let page = Page::from_path(page_path)?;
    let Some(mut component) = SearchComponent::init(&page, config, HeadlessSurface::default())?
    else {
        if json {
            println!("{}", json!({ "available": false }));
        }
        return Ok(());
    };
    let outcome = upgrade(&component, config, source).await?;

    component.dispatch(UiEvent::TriggerActivated);
    component.surface_mut().fire_timers();
    component.surface_mut().input_value = query.to_string();
    let dispatch = component.dispatch(UiEvent::Input(query.to_string()));

    if json {
        let index = component.store().snapshot();
        let hits = search::search(&index, query.trim());
        let report = json!({
            "available": true,
            "origin": component.store().origin(),
            "index_len": index.len(),
            "upgrade": outcome,
            "dispatch": dispatch,
            "results": hits,
            "html": component.surface().results_html,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", component.surface().results_html);
    }
    Ok(())
}

fn run_inspect(config: &SearchConfig, page_path: &Path) -> Result<()> {
    let page = Page::from_path(page_path)?;
    let scaffold = page.discover_scaffold(&config.selectors)?;
    let builder = IndexBuilder::new(IndexStore::new(), &config.selectors)?;
    builder.build_index(&page);
    let entries = builder.store().snapshot();
    let report = json!({
        "available": scaffold.is_some(),
        "scaffold": scaffold,
        "entries": entries.as_slice(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
