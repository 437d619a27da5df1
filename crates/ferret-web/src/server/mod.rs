//! Web server — Axum router + shared agent.

pub mod api;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use ferret_core::{Agent, OllamaBackend};

/// Shared application state: one agent for every request.
pub struct AppState {
    pub agent: Agent<OllamaBackend>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::routes())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
