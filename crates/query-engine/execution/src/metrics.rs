//! Metrics setup and update for the gateway.

use prometheus::core::{AtomicI64, AtomicU64, GenericCounter, GenericGauge};

/// The collection of all metrics exposed through the `/metrics` endpoint.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub mutation_total: GenericCounter<AtomicU64>,
    pub error_total: GenericCounter<AtomicU64>,
    pub pool_size: GenericGauge<AtomicI64>,
    pub pool_idle_count: GenericGauge<AtomicI64>,
    pub pool_max_connections: GenericGauge<AtomicI64>,
}

impl Metrics {
    /// Set up counters and gauges used to produce Prometheus metrics
    pub fn initialize(metrics_registry: &mut prometheus::Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "inventory_query_total",
            "Total successful reads.",
        )?;

        let mutation_total = add_int_counter_metric(
            metrics_registry,
            "inventory_mutation_total",
            "Total successful inserts, updates and deletes.",
        )?;

        let error_total = add_int_counter_metric(
            metrics_registry,
            "inventory_error_total",
            "Total requests that ended in an error response.",
        )?;

        let pool_size = add_int_gauge_metric(
            metrics_registry,
            "inventory_pool_size",
            "The number of connections currently active. This includes idle connections.",
        )?;

        let pool_idle_count = add_int_gauge_metric(
            metrics_registry,
            "inventory_pool_idle_count",
            "The number of connections active and idle (not in use).",
        )?;

        let pool_max_connections = add_int_gauge_metric(
            metrics_registry,
            "inventory_pool_max_connections",
            "The maximum number of connections that this pool should maintain.",
        )?;

        Ok(Self {
            query_total,
            mutation_total,
            error_total,
            pool_size,
            pool_idle_count,
            pool_max_connections,
        })
    }

    /// Refresh the pool gauges from the pool's current state.
    pub fn update_pool_metrics(&self, pool: &sqlx::PgPool) {
        let pool_size: i64 = pool.size().into();
        self.pool_size.set(pool_size);

        // the idle count can never exceed the pool size
        let pool_idle: i64 = pool.num_idle().try_into().unwrap_or(pool_size);
        self.pool_idle_count.set(pool_idle);

        let max_connections: i64 = pool.options().get_max_connections().into();
        self.pool_max_connections.set(max_connections);
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new int gauge metric and register it with the provided Prometheus Registry
fn add_int_gauge_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericGauge<AtomicI64>, prometheus::Error> {
    let int_gauge =
        prometheus::IntGauge::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_gauge.clone()))?;
    Ok(int_gauge)
}
