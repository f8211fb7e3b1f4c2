//! Admin REST handlers for direct game control.
//!
//! These bypass slot reporting but run through the same pipeline: the
//! change is logged, lighting is updated, and observers get a broadcast.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/admin/hp` | Set boss HP (`{ "hp": number }`) |
//! | `POST` | `/admin/hp/reduce` | Remove 5% of max HP |
//! | `POST` | `/admin/hp-damage` | Toggle slot damage (`{ "enabled": bool }`) |
//! | `POST` | `/admin/reset` | Reset game progress |
//! | `POST` | `/admin/wled` | Forward a raw body to the lighting device |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use raid_core::input::{parse_enabled, parse_hp};
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /admin/hp
// ---------------------------------------------------------------------------

/// Set boss HP. The value is floored and clamped to `0..=max_hp`.
pub async fn set_hp(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let hp = parse_hp(&body)?;
    let snapshot = state.set_hp(hp).await?;

    Ok(Json(json!({
        "ok": true,
        "bossHp": snapshot.boss_hp,
        "gameOver": snapshot.game_over,
    })))
}

// ---------------------------------------------------------------------------
// POST /admin/hp/reduce
// ---------------------------------------------------------------------------

/// Remove a fixed share of max HP from the current HP.
pub async fn reduce_hp(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let (damage, snapshot) = state.reduce_hp().await?;

    Ok(Json(json!({
        "ok": true,
        "damage": damage,
        "bossHp": snapshot.boss_hp,
        "gameOver": snapshot.game_over,
    })))
}

// ---------------------------------------------------------------------------
// POST /admin/hp-damage
// ---------------------------------------------------------------------------

/// Enable or disable slot-driven damage.
pub async fn set_hp_damage(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let enabled = parse_enabled(&body)?;
    let snapshot = state.set_damage_enabled(enabled).await;

    Ok(Json(json!({
        "ok": true,
        "hpDamageEnabled": snapshot.hp_damage_enabled,
        "bossHp": snapshot.boss_hp,
        "gameOver": snapshot.game_over,
    })))
}

// ---------------------------------------------------------------------------
// POST /admin/reset
// ---------------------------------------------------------------------------

/// Reset HP, slots, counters, and the event log.
pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.reset().await;

    Json(json!({
        "ok": true,
        "bossHp": snapshot.boss_hp,
        "gameOver": snapshot.game_over,
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/wled
// ---------------------------------------------------------------------------

/// Forward the body verbatim to the lighting device.
///
/// Nothing in the game state changes and no broadcast is sent. The
/// response does not wait for the device.
pub async fn lighting_passthrough(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let forwarded = state.lighting_passthrough(body);
    info!(forwarded, "Manual lighting override");

    Ok(Json(json!({
        "ok": true,
        "forwarded": forwarded,
    })))
}
