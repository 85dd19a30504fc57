use axum::{extract::State, Json};
use tracing::{info_span, Instrument};

use crate::{error::ServerError, health, state::ServerState};

pub async fn get_health(
    State(state): State<ServerState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    health::health_check(&state.pool)
        .instrument(info_span!("Health check"))
        .await
        .map_err(|err| ServerError::Internal(format!("database is unreachable: {err}")))?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
