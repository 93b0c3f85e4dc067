pub mod cli;
pub mod core;
pub mod providers;
pub mod store;
pub mod tracker;

use crate::cli::ui::Theme;
use crate::core::Coin;
use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use crate::providers::coingecko::CoinGeckoProvider;
use crate::tracker::RatioTracker;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    List,
    Add {
        numerator: String,
        denominator: String,
    },
    /// 1-based position as shown by `List`
    Remove {
        position: usize,
    },
    Refresh,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Ratios starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let coingecko = &config.providers.coingecko;
    let coin_cache = Arc::new(Cache::<String, Coin>::new(coingecko.cache_ttl()));
    let provider = Arc::new(CoinGeckoProvider::new(coingecko, coin_cache)?);
    let store = store::open(&config)?;
    let tracker = RatioTracker::open(provider, store).await;
    let theme = Theme::from(&config.theme);

    match command {
        AppCommand::List => cli::list::run(&tracker, &theme).await,
        AppCommand::Add {
            numerator,
            denominator,
        } => cli::add::run(&tracker, &numerator, &denominator, &theme).await,
        AppCommand::Remove { position } => cli::remove::run(&tracker, position, &theme).await,
        AppCommand::Refresh => cli::refresh::run(&tracker, &theme).await,
    }
}
