pub mod action_logs;

use axum::Router;
use axum::routing::post;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Action logs
        .route("/api/v1/action-logs", post(action_logs::create))
}
