//! Serves the todo HTTP API.
//!
//! Usage:
//!
//! ```text
//! todo-server
//! ```
//!
//! Configuration comes from the environment (and a `.env` file when
//! present); see [`todo_api::config`]. `RUST_LOG` controls log filtering and
//! defaults to `todo_api=debug,todo_server=debug,tower_http=debug`.
//!
//! This binary is the composition root: it builds the selected store, wraps
//! it in the repository, the service and the router, and serves until
//! SIGINT or SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use todo_api::config::{AppConfig, ConfigurationError, StorageMode};
use todo_api::todo::{
    adapters::{memory::InMemoryTodoRepository, postgres::PostgresTodoRepository},
    api,
    ports::{TodoRepository, TodoRepositoryError},
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "todo_api=debug,todo_server=debug,tower_http=debug";

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to initialise storage: {0}")]
    Storage(#[from] TodoRepositoryError),
    #[error("server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal outside development.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => {
            tracing::info!("server shutdown complete");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "todo server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        storage_mode = ?config.storage_mode,
        bind_address = %config.bind_address,
        "configuration loaded"
    );

    let repository = build_repository(&config).await?;
    let application = api::router(repository);

    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_repository(config: &AppConfig) -> Result<Arc<dyn TodoRepository>, ServerError> {
    match (config.storage_mode, config.database_url.as_deref()) {
        (StorageMode::Postgres, Some(database_url)) => {
            let database_url = database_url.to_owned();
            let pool_size = config.database_pool_size;
            // r2d2 opens its initial connections synchronously.
            let repository = tokio::task::spawn_blocking(move || {
                PostgresTodoRepository::connect(&database_url, pool_size)
            })
            .await
            .map_err(TodoRepositoryError::persistence)??;
            tracing::info!("postgres repository initialised");
            Ok(Arc::new(repository))
        }
        (StorageMode::Postgres, None) => Err(ConfigurationError::MissingDatabaseUrl.into()),
        (StorageMode::InMemory, _) => {
            tracing::info!("in-memory repository initialised");
            Ok(Arc::new(InMemoryTodoRepository::new()))
        }
    }
}

/// Completes when SIGINT or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
