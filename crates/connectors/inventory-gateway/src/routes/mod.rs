mod get_health;
mod get_metrics;
mod post_login;
mod table;

use axum::{
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::state::ServerState;

pub use get_health::get_health;
pub use get_metrics::get_metrics;
pub use post_login::post_login;
pub use table::{delete_table, get_table, patch_table, post_table};

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .route("/api/auth/login", post(post_login))
        .route(
            "/api/:table",
            get(get_table)
                .post(post_table)
                .patch(patch_table)
                .delete(delete_table),
        )
        .layer(middleware::from_fn_with_state(state.clone(), count_errors))
        .with_state(state)
}

/// Count every response with a 4xx or 5xx status.
async fn count_errors<B>(
    State(state): State<ServerState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        state.metrics.error_total.inc();
    }
    response
}
