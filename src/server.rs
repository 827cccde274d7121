//! HTTP server initialization and runtime setup.
//!
//! Builds the storage backend selected by configuration, wires the services,
//! and runs the Axum server until a shutdown signal arrives.

use crate::application::services::{ShortenerService, StaticUserDirectory, UserService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::RedirectRepository;
use crate::domain::user_directory::UserDirectory;
use crate::infrastructure::memory::{InMemoryRedirectRepository, InMemoryUserRepository};
use crate::infrastructure::persistence::{PgRedirectRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::{CodeGenerator, FnvCodeGenerator};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the shared PostgreSQL pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the application state for the configured backend.
///
/// For Postgres this connects the pool and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn build_state(config: Config) -> Result<AppState> {
    let (repository, user_directory) = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(&config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;

            let pool = Arc::new(pool);
            let repository: Arc<dyn RedirectRepository> =
                Arc::new(PgRedirectRepository::new(pool.clone()));
            let users: Arc<dyn UserDirectory> =
                Arc::new(UserService::new(Arc::new(PgUserRepository::new(pool))));
            (repository, users)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let repository: Arc<dyn RedirectRepository> =
                Arc::new(InMemoryRedirectRepository::new());
            let users: Arc<dyn UserDirectory> =
                Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
            (repository, users)
        }
    };

    let users: Arc<dyn UserDirectory> = match config.single_tenant_user {
        Some(ref owner_id) => Arc::new(StaticUserDirectory::new(owner_id.clone())),
        None => user_directory,
    };

    let generator: Arc<dyn CodeGenerator> = Arc::new(FnvCodeGenerator::new());
    let shortener =
        ShortenerService::new(generator, repository).with_store_timeout(config.store_timeout());

    Ok(AppState::new(Arc::new(shortener), users, Arc::new(config)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;

    let state = build_state(config).await?;
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
