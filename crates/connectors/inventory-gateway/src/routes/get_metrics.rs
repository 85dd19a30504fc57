use axum::{extract::State, http::header};

use crate::{error::ServerError, state::ServerState};

/// Prometheus text exposition of every registered metric.
/// Pool gauges are refreshed on each scrape.
pub async fn get_metrics(
    State(state): State<ServerState>,
) -> Result<([(header::HeaderName, &'static str); 1], String), ServerError> {
    state.metrics.update_pool_metrics(&state.pool);

    let body = prometheus::TextEncoder::new()
        .encode_to_string(&state.metrics_registry.gather())
        .map_err(|err| ServerError::Internal(err.to_string()))?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
