//! Transient state used by the gateway.
//!
//! This is initialized on startup.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info_span, Instrument};

use inventory_gateway_configuration::{Configuration, PoolSettings};
use query_engine_execution::metrics;
use query_engine_metadata::metadata;

/// State shared by every request handler.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub pool: PgPool,
    pub metadata: Arc<metadata::Metadata>,
    pub metrics: metrics::Metrics,
    pub metrics_registry: prometheus::Registry,
}

/// Create a connection pool, check that it can reach the database,
/// and wrap it inside the server state.
pub async fn create_state(configuration: &Configuration) -> Result<ServerState, InitializationError> {
    let pool = pool_options(&configuration.pool_settings)
        .connect(&configuration.connection_uri)
        .instrument(info_span!("Connect to database"))
        .await
        .map_err(InitializationError::UnableToCreatePool)?;

    assemble(configuration, pool)
}

/// Like [`create_state`], but no connection is opened until the first query runs.
pub fn create_lazy_state(configuration: &Configuration) -> Result<ServerState, InitializationError> {
    let pool = pool_options(&configuration.pool_settings)
        .connect_lazy(&configuration.connection_uri)
        .map_err(InitializationError::UnableToCreatePool)?;

    assemble(configuration, pool)
}

fn assemble(configuration: &Configuration, pool: PgPool) -> Result<ServerState, InitializationError> {
    let mut metrics_registry = prometheus::Registry::new();
    let metrics = metrics::Metrics::initialize(&mut metrics_registry)
        .map_err(InitializationError::MetricsError)?;
    metrics.update_pool_metrics(&pool);

    Ok(ServerState {
        pool,
        metadata: Arc::new(configuration.metadata.clone()),
        metrics,
        metrics_registry,
    })
}

/// Pool options from the configured settings.
/// - <https://docs.rs/sqlx/latest/sqlx/pool/struct.PoolOptions.html>
fn pool_options(pool_settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
        .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
        .max_lifetime(pool_settings.connection_lifetime.map(Duration::from_secs))
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
