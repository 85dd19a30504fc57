use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info_span, Instrument};

use query_engine_execution as execution;
use query_engine_translation::translation;

use crate::{
    auth::{self, LoginRequest, LoginResponse},
    error::ServerError,
    state::ServerState,
};

pub async fn post_login(
    State(state): State<ServerState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
    let Json(LoginRequest { username, password }) = body?;

    let plan = translation::login::translate_credentials_lookup(&state.metadata, &username)?;
    let rows = execution::query::execute(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Look up credentials"))
        .await?;

    let response = auth::authenticate(rows, &password)?;
    tracing::info!(user_id = %response.session.user_id, "user logged in");
    Ok(Json(response))
}
