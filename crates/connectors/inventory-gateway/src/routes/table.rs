//! The generic table endpoints: `GET|POST|PATCH|DELETE /api/{table}`.

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use tracing::{info_span, Instrument};

use query_engine_execution as execution;
use query_engine_translation::translation;
use query_engine_translation::translation::request::Arguments;

use crate::{error::ServerError, state::ServerState};

pub async fn get_table(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<serde_json::Value>, ServerError> {
    let arguments = Arguments::parse(query.as_deref());

    let plan = info_span!("Plan query", table = %table)
        .in_scope(|| translation::query::translate(&state.metadata, &table, &arguments))?;

    let rows = execution::query::execute(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Execute query", table = %table))
        .await?;

    Ok(Json(rows))
}

pub async fn post_table(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServerError> {
    let Json(body) = body?;

    let plan = info_span!("Plan insert", table = %table)
        .in_scope(|| translation::mutation::insert::translate(&state.metadata, &table, &body))?;

    let inserted = execution::mutation::execute(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Execute insert", table = %table))
        .await?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

pub async fn patch_table(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let arguments = Arguments::parse(query.as_deref());

    let plan = info_span!("Plan update", table = %table).in_scope(|| {
        // a missing filter is reported before any problem with the body
        translation::mutation::update::check_target(&state.metadata, &table, &arguments)?;
        let Json(body) = body?;
        translation::mutation::update::translate(&state.metadata, &table, &arguments, &body)
            .map_err(ServerError::from)
    })?;

    let updated = execution::mutation::execute(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Execute update", table = %table))
        .await?;

    Ok(Json(updated))
}

pub async fn delete_table(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<serde_json::Value>, ServerError> {
    let arguments = Arguments::parse(query.as_deref());

    let plan = info_span!("Plan delete", table = %table)
        .in_scope(|| translation::mutation::delete::translate(&state.metadata, &table, &arguments))?;

    let deleted = execution::mutation::execute(&state.pool, &state.metrics, plan)
        .instrument(info_span!("Execute delete", table = %table))
        .await?;

    Ok(Json(deleted))
}
