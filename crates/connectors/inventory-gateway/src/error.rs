//! Errors at the HTTP boundary, and how they become responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use query_engine_execution::error as execution;
use query_engine_translation::translation::error as translation;

/// Everything a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Translation(#[from] translation::Error),
    #[error("{0}")]
    Execution(#[from] execution::Error),
    #[error("invalid username or password")]
    Unauthorized,
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Translation(_) | ServerError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServerError::Execution(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidBody(rejection.body_text())
    }
}

#[derive(Serialize)]
struct JsonErrorResponse {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %error, "request failed");
        } else {
            tracing::warn!(status = %status, error = %error, "request rejected");
        }

        (status, Json(JsonErrorResponse { error })).into_response()
    }
}
