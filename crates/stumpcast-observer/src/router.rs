//! Axum router construction for the Observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin scoreboard access.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML scoreboard page
/// - `GET /ws/score` -- `WebSocket` score update stream
/// - `GET /api/summary` -- current scoreboard summary
/// - `GET /api/feed` -- feed events, newest first
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Scoreboard page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/score", get(ws::ws_score))
        // REST API
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/feed", get(handlers::get_feed))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
