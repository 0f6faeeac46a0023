//! `coursebook-api` binary entrypoint.
//!
//! Loads configuration from environment variables, seeds the store when a
//! seed file is configured, and starts the HTTP server.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use coursebook_api::config::Config;
use coursebook_api::server::Server;
use coursebook_catalog::seed;
use coursebook_core::observability::{init_logging, LogFormat};
use coursebook_core::storage::{DocumentStore, MemoryStore};

fn choose_log_format(config: &Config) -> LogFormat {
    if config.debug {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(choose_log_format(&config));

    let storage: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    if let Some(path) = config.seed_path.clone() {
        let count = seed::seed_from_path(Arc::clone(&storage), Path::new(&path)).await?;
        tracing::info!(count, path = %path, "seed import complete");
    } else {
        tracing::warn!("COURSEBOOK_SEED_PATH not set; starting with an empty catalog");
    }

    let server = Server::with_storage(config, storage);
    server.serve().await?;
    Ok(())
}
