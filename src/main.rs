//! vaxview - Entry Point

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use vaxview::integration::{self, DriverSettings};
use vaxview::model::AppError;
use vaxview::repository::CatalogRepository;
use vaxview::state::SearchScreen;

/// vaxview - search a vaccination catalog with incremental paging
#[derive(Parser, Debug)]
#[command(name = "vaxview")]
#[command(version)]
#[command(about = "Search a JSONL vaccination catalog, one command per line on stdin")]
pub struct Args {
    /// Path to JSONL catalog file
    pub catalog: Option<PathBuf>,

    /// Start with this query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Records per page (must be positive)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_size: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = vaxview::config::load_config_with_precedence(args.config.clone())?;
        let merged = vaxview::config::merge_config(config_file);
        let with_env = vaxview::config::apply_env_overrides(merged)?;
        let with_cli =
            vaxview::config::apply_cli_overrides(with_env, args.catalog.clone(), args.page_size);
        vaxview::config::validate(with_cli)?
    };

    vaxview::logging::init(&config.log_file_path, &config.log_level)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let repository = CatalogRepository::new(&config.catalog_path, config.page_size);
    // Fetches report catalog problems as error results; this only makes them visible early.
    match repository.validate() {
        Ok(count) => info!(records = count, "Catalog readable"),
        Err(e) => warn!(error = %e, "Catalog not usable yet"),
    }

    let settings = DriverSettings::from_millis(config.poll_interval_ms, config.settle_timeout_ms);
    let mut screen = SearchScreen::new(Arc::new(repository));
    if let Some(query) = &args.query {
        screen.set_query(query);
        // First page must land before a :more can page past it.
        integration::wait_until_settled(&mut screen, &settings);
    }

    integration::run(&mut screen, io::stdin().lock(), io::stdout().lock(), &settings)?;

    Ok(())
}
