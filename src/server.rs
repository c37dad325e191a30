//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, probe clients and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::probes::TxtResolver;
use crate::infrastructure::dns::HickoryTxtResolver;
use crate::infrastructure::http::ReqwestProbe;
use crate::infrastructure::persistence::{
    PgDomainRepository, PgHealthLogRepository, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Builds the TXT resolver from `DNS_NAMESERVER` or the system configuration.
///
/// # Errors
///
/// Returns an error if the system resolver configuration cannot be read.
pub fn build_resolver(config: &Config) -> Result<Arc<dyn TxtResolver>> {
    let resolver: Arc<dyn TxtResolver> = match config.dns_nameserver {
        Some(addr) => {
            tracing::info!(nameserver = %addr, "Using configured DNS nameserver");
            Arc::new(HickoryTxtResolver::with_nameserver(addr))
        }
        None => Arc::new(
            HickoryTxtResolver::from_system().context("Failed to read system DNS configuration")?,
        ),
    };

    Ok(resolver)
}

/// Wires repositories, probes and services into the application state.
///
/// # Errors
///
/// Returns an error if the DNS resolver or HTTP client cannot be built.
pub fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let pool = Arc::new(pool);

    let http = ReqwestProbe::new(&config.probe_client()).context("Failed to build HTTP client")?;

    Ok(AppState::new(
        Arc::new(PgDomainRepository::new(pool.clone())),
        Arc::new(PgHealthLogRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        build_resolver(config)?,
        Arc::new(http),
        config.token_signing_secret.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - DNS resolver and HTTP probe client
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(&config, pool)?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
