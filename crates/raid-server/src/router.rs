//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS enabled so viewer pages served from elsewhere can connect.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /event` -- sensor slot report
/// - `GET /state` -- composite snapshot
/// - `GET /health` -- liveness probe
/// - `GET /ws` -- `WebSocket` push channel
/// - `POST /admin/hp`, `/admin/hp/reduce`, `/admin/hp-damage`,
///   `/admin/reset`, `/admin/wled` -- admin controls
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Sensors and viewers
        .route("/event", post(handlers::report))
        .route("/state", get(handlers::get_state))
        .route("/health", get(handlers::health))
        .route("/ws", get(ws::ws_state))
        // Admin
        .route("/admin/hp", post(admin::set_hp))
        .route("/admin/hp/reduce", post(admin::reduce_hp))
        .route("/admin/hp-damage", post(admin::set_hp_damage))
        .route("/admin/reset", post(admin::reset))
        .route("/admin/wled", post(admin::lighting_passthrough))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
