//! Tic-tac-toe REST API server.

#![warn(missing_docs)]

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_api::{
    AppState, GameRepository, GameService, GameStore, MemoryGameStore, ServerConfig, build_router,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictactoe_api=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            host,
            database_url,
            host_address,
            memory,
        } => {
            let config =
                load_config(config)?.apply_overrides(host, port, database_url, host_address);
            config.validate()?;
            run_server(config, memory).await
        }
        Command::Migrate {
            config,
            database_url,
        } => {
            let config = load_config(config)?.apply_overrides(None, None, database_url, None);
            config.validate()?;
            run_migrations(config).await
        }
    }
}

/// Defaults, then the optional config file, then the environment.
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<ServerConfig> {
    let config = match path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    Ok(config.apply_env())
}

/// Run the HTTP game server until Ctrl-C.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_server(config: ServerConfig, memory: bool) -> Result<()> {
    let store: Arc<dyn GameStore> = if memory {
        info!("Using in-memory game store");
        Arc::new(MemoryGameStore::new())
    } else {
        info!(path = %config.database_url(), "Using SQLite game store");
        Arc::new(
            GameRepository::connect(
                config.database_url().clone(),
                *config.connect_attempts(),
                config.connect_retry_delay(),
            )
            .await?,
        )
    };

    let state = AppState::new(GameService::new(store), config.host_address());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Apply pending migrations and exit.
#[instrument(skip(config), fields(path = %config.database_url()))]
async fn run_migrations(config: ServerConfig) -> Result<()> {
    GameRepository::connect(
        config.database_url().clone(),
        *config.connect_attempts(),
        config.connect_retry_delay(),
    )
    .await?;
    info!("Database is up to date");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => tracing::warn!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
