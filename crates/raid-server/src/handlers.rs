//! Sensor intake and read-only endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/event` | Full slot report from the sensor unit |
//! | `GET` | `/state` | Composite game snapshot |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use raid_core::input::parse_crystal_report;
use raid_types::Slots;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for `POST /event`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Always `true`; failures use the error body.
    pub ok: bool,
    /// Boss HP after reconciliation.
    pub boss_hp: u32,
    /// Whether the boss is at zero HP.
    pub game_over: bool,
    /// Occupancy after reconciliation.
    pub slots: Slots,
}

/// Accept a full slot report.
///
/// Body: `{ "type": "crystal", "slots": [7 values] }`. Reports are
/// idempotent; resending identical slots is accepted and changes nothing.
pub async fn report(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let slots = parse_crystal_report(&body)?;
    let snapshot = state.apply_report(slots).await;

    Ok(Json(ReportResponse {
        ok: true,
        boss_hp: snapshot.boss_hp,
        game_over: snapshot.game_over,
        slots: snapshot.slots,
    }))
}

/// Return the composite snapshot.
pub async fn get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.snapshot().await)
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
