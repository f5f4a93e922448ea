use chrono::Utc;

use crate::catalog::Catalog;
use crate::engine::Tracker;
use crate::error::AppResult;
use crate::store::FileStore;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult, Rules};

pub mod catalog;
pub mod engine;
pub mod error;
pub mod store;

static APPLICATION_NAME: &str = "alfred";

/// Wire the whole stack from configuration: catalog, file store, tracker.
pub fn build_tracker() -> AppResult<(Tracker<FileStore>, Catalog)> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local);

    let catalog = Catalog::load(config.app().catalog())?;
    tracing::debug!("catalog loaded: {} episodes", catalog.len());

    let store = FileStore::open(config.app().data_dir())?;
    let tracker = Tracker::open(store, config.rules().clone(), Utc::now())?;
    Ok((tracker, catalog))
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}
