//! Books Server - Main entry point

use anyhow::{Context, Result};
use books_common::logging::{init_logging, LogConfig};
use tracing::info;

use books_server::{api, config::Config, store};

#[tokio::main]
async fn main() -> Result<()> {
    // Builder defaults first, LOG_* environment variables take precedence
    let log_config = LogConfig::builder()
        .log_file_prefix("books-server")
        .filter_directives("books_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&log_config)?;

    info!("Starting Books Server");

    let config = Config::load().context("Failed to load configuration")?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store = store::connect(&config)
        .await
        .context("Failed to initialize book store")?;
    info!(backend = ?config.store.backend, "Book store ready");

    let result = api::serve(&config, store.clone()).await;

    store.close().await;

    result
}
