pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::audit::ActionLogStore;
use crate::config::Config;
use crate::db::LogRepository;
use crate::state::{AppState, SharedState};

pub fn build_app(repository: Arc<dyn LogRepository>, config: Config) -> (Router, SharedState) {
    if !config.blacklist.is_empty() {
        tracing::info!("{} action(s) blacklisted from logging", config.blacklist.len());
    }

    let store = ActionLogStore::new(repository, config.blacklist);
    let state: SharedState = Arc::new(AppState { store });

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
