//! CLI interface for crypto-ticker
//!
//! Provides subcommands for:
//! - `price`: fetch, persist, and print the current price of a ticker
//! - `history`: print a page of stored observations, newest first
//! - `config`: show the effective configuration

mod history;
mod price;

pub use history::HistoryArgs;
pub use price::PriceArgs;

use crate::config::Config;
use crate::feed::{CoinGeckoClient, CoinGeckoConfig};
use crate::router::QueryRouter;
use crate::store::JsonlStore;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "crypto-ticker")]
#[command(about = "Query a crypto ticker's current and historical price")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and persist the current price of a ticker
    Price(PriceArgs),
    /// Show stored price history for a ticker
    History(HistoryArgs),
    /// Show the effective configuration
    Config,
}

/// Wire the live feed client and the durable store into a router
pub(crate) fn build_router(config: &Config) -> anyhow::Result<QueryRouter> {
    let feed = CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url: config.feed.base_url.clone(),
        timeout: Duration::from_secs(config.feed.timeout_secs),
    });
    let store = JsonlStore::open(&config.store.data_dir)?;

    Ok(QueryRouter::new(Arc::new(feed), Arc::new(store)))
}
