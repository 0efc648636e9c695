pub mod api;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod core_state;
pub mod dashboard;
pub mod filter;
pub mod forms;
pub mod models;
pub mod notification;
pub mod seed;
pub mod session;
pub mod session_store;
pub mod views;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::core_state::{CoreError, CoreState};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Serve the API until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "{} starting v{} on {}",
        config::APP_NAME,
        config::APP_VERSION,
        config.bind_addr
    );

    let core = Arc::new(CoreState::new(config.clone())?);
    let mut server = api::start_api_server_on(core, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    tokio::signal::ctrl_c().await.map_err(RunError::Signal)?;

    server.shutdown();
    server.stopped().await;
    Ok(())
}
