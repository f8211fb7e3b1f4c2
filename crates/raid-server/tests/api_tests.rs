//! Integration tests for the coordinator HTTP API.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Broadcasts are observed by subscribing to the
//! shared [`AppState`] before issuing requests.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use raid_core::GameConfig;
use raid_lighting::LightingDriver;
use raid_server::{AppState, build_router};
use raid_types::GameSnapshot;
use serde_json::{Value, json};
use tokio::sync::broadcast::error::TryRecvError;
use tower::ServiceExt;

fn make_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        GameConfig {
            max_hp: 100,
            hp_per_crystal: 10,
        },
        LightingDriver::disabled(),
    ));
    (build_router(Arc::clone(&state)), state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_to_json(resp.into_body()).await)
}

async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_to_json(resp.into_body()).await)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_to_json(resp.into_body()).await)
}

fn report(slots: [bool; 7]) -> Value {
    json!({ "type": "crystal", "slots": slots })
}

// =========================================================================
// Sensor reports
// =========================================================================

#[tokio::test]
async fn report_returns_updated_state() {
    let (app, _) = make_app();
    let (status, body) = post_json(
        &app,
        "/event",
        &report([true, false, true, false, false, false, false]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["bossHp"], 80);
    assert_eq!(body["gameOver"], false);
    assert_eq!(
        body["slots"],
        json!([true, false, true, false, false, false, false])
    );
}

#[tokio::test]
async fn scripted_game_through_http() {
    let (app, _) = make_app();
    post_json(&app, "/event", &report([false; 7])).await;

    let (_, body) = post_json(
        &app,
        "/event",
        &report([true, false, true, false, false, false, false]),
    )
    .await;
    assert_eq!(body["bossHp"], 80);

    let (_, body) = post_json(
        &app,
        "/event",
        &report([false, false, true, false, false, false, false]),
    )
    .await;
    assert_eq!(body["bossHp"], 90);

    let (_, body) = post_json(
        &app,
        "/event",
        &report([false, true, true, true, true, true, true]),
    )
    .await;
    assert_eq!(body["bossHp"], 40);

    let (_, state) = get_json(&app, "/state").await;
    assert_eq!(state["crystalCount"], 6);
    assert_eq!(state["totalCrystalsReceived"], 7);
    assert_eq!(state["recentEvents"].as_array().unwrap().len(), 8);
    assert_eq!(state["recentEvents"][0]["type"], "crystal_insert");
    assert_eq!(state["recentEvents"][0]["slot"], 6);
}

#[tokio::test]
async fn repeated_full_report_is_idempotent() {
    let (app, _) = make_app();
    let (_, body) = post_json(&app, "/event", &report([true; 7])).await;
    assert_eq!(body["bossHp"], 30);
    let (_, before) = get_json(&app, "/state").await;

    for _ in 0..3 {
        let (status, body) = post_json(&app, "/event", &report([true; 7])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bossHp"], 30);
    }

    let (_, after) = get_json(&app, "/state").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn malformed_report_is_rejected_without_mutation() {
    let (app, state) = make_app();
    post_json(
        &app,
        "/event",
        &report([true, false, false, false, false, false, false]),
    )
    .await;
    let before = state.snapshot().await;
    let mut rx = state.subscribe().await.1;

    let short = json!({ "type": "crystal", "slots": [true, true, true, true, true] });
    let (status, body) = post_json(&app, "/event", &short).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("exactly 7"));

    let not_array = json!({ "type": "crystal", "slots": true });
    let (status, _) = post_json(&app, "/event", &not_array).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let wrong_type = json!({ "type": "button", "slots": [false, false, false, false, false, false, false] });
    let (status, body) = post_json(&app, "/event", &wrong_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);

    assert_eq!(state.snapshot().await, before);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn invalid_json_uses_error_shape() {
    let (app, _) = make_app();
    let req = Request::builder()
        .method("POST")
        .uri("/event")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_to_json(resp.into_body()).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

// =========================================================================
// Admin
// =========================================================================

#[tokio::test]
async fn admin_set_hp_clamps_and_validates() {
    let (app, _) = make_app();

    let (status, body) = post_json(&app, "/admin/hp", &json!({ "hp": 500 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bossHp"], 100);

    let (_, body) = post_json(&app, "/admin/hp", &json!({ "hp": 12.8 })).await;
    assert_eq!(body["bossHp"], 12);

    let (_, body) = post_json(&app, "/admin/hp", &json!({ "hp": 0 })).await;
    assert_eq!(body["gameOver"], true);

    for bad in [json!({ "hp": -1 }), json!({ "hp": "10" }), json!({})] {
        let (status, body) = post_json(&app, "/admin/hp", &bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
    }

    let (_, state) = get_json(&app, "/state").await;
    assert_eq!(state["bossHp"], 0);
    assert_eq!(state["recentEvents"][0]["type"], "admin_hp");
}

#[tokio::test]
async fn admin_reduce_removes_five_percent_of_max() {
    let (app, _) = make_app();

    let (status, body) = post_empty(&app, "/admin/hp/reduce").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["damage"], 5);
    assert_eq!(body["bossHp"], 95);

    let (_, body) = post_empty(&app, "/admin/hp/reduce").await;
    assert_eq!(body["bossHp"], 90);

    post_json(&app, "/admin/hp", &json!({ "hp": 2 })).await;
    let (_, body) = post_empty(&app, "/admin/hp/reduce").await;
    assert_eq!(body["bossHp"], 0);
    assert_eq!(body["gameOver"], true);
}

#[tokio::test]
async fn damage_toggle_freezes_and_recomputes() {
    let (app, _) = make_app();
    post_json(
        &app,
        "/event",
        &report([true, false, false, false, false, false, false]),
    )
    .await;

    let (status, body) = post_json(&app, "/admin/hp-damage", &json!({ "enabled": false })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hpDamageEnabled"], false);

    let (_, body) = post_json(
        &app,
        "/event",
        &report([true, true, true, false, false, false, false]),
    )
    .await;
    assert_eq!(body["bossHp"], 90);

    let (_, body) = post_json(&app, "/admin/hp-damage", &json!({ "enabled": true })).await;
    assert_eq!(body["bossHp"], 70);

    let (status, body) = post_json(&app, "/admin/hp-damage", &json!({ "enabled": "yes" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn repeated_enable_keeps_operator_hp() {
    let (app, _) = make_app();
    post_json(
        &app,
        "/event",
        &report([true, true, false, false, false, false, false]),
    )
    .await;
    post_json(&app, "/admin/hp", &json!({ "hp": 50 })).await;

    let (status, body) = post_json(&app, "/admin/hp-damage", &json!({ "enabled": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bossHp"], 50);

    let (_, state) = get_json(&app, "/state").await;
    assert_eq!(state["recentEvents"][0]["type"], "admin_hp_damage");
}

#[tokio::test]
async fn reset_restores_fresh_game() {
    let (app, _) = make_app();
    post_json(&app, "/event", &report([true; 7])).await;
    post_json(&app, "/admin/hp-damage", &json!({ "enabled": false })).await;
    post_json(&app, "/admin/hp", &json!({ "hp": 0 })).await;

    let (status, body) = post_empty(&app, "/admin/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bossHp"], 100);

    let (_, state) = get_json(&app, "/state").await;
    assert_eq!(state["bossHp"], 100);
    assert_eq!(state["slots"], json!([false, false, false, false, false, false, false]));
    assert_eq!(state["crystalCount"], 0);
    assert_eq!(state["totalCrystalsReceived"], 0);
    assert_eq!(state["hpDamageEnabled"], true);
    assert_eq!(state["gameOver"], false);
    assert!(state["recentEvents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn passthrough_without_device_is_a_no_op() {
    let (app, state) = make_app();
    let mut rx = state.subscribe().await.1;

    let (status, body) = post_json(&app, "/admin/wled", &json!({ "on": false, "bri": 10 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["forwarded"], false);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

// =========================================================================
// Broadcast
// =========================================================================

#[tokio::test]
async fn every_mutation_broadcasts_once_in_order() {
    let (app, state) = make_app();
    let (initial, mut rx) = state.subscribe().await;
    assert_eq!(initial.boss_hp, 100);

    post_json(
        &app,
        "/event",
        &report([true, false, false, false, false, false, false]),
    )
    .await;
    post_json(&app, "/admin/hp", &json!({ "hp": 50 })).await;
    post_empty(&app, "/admin/hp/reduce").await;
    post_json(&app, "/admin/hp-damage", &json!({ "enabled": false })).await;
    post_empty(&app, "/admin/reset").await;
    // Reads never broadcast.
    get_json(&app, "/state").await;

    let received: Vec<GameSnapshot> = (0..5).map(|_| rx.try_recv().unwrap()).collect();
    let hps: Vec<u32> = received.iter().map(|s| s.boss_hp).collect();
    assert_eq!(hps, vec![90, 50, 45, 45, 100]);
    assert!(!received[3].hp_damage_enabled);
    assert!(received[4].recent_events.is_empty());
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn joining_observer_sees_latest_commit() {
    let (app, state) = make_app();
    post_json(&app, "/event", &report([true; 7])).await;

    let (initial, mut rx) = state.subscribe().await;
    assert_eq!(initial.boss_hp, 30);
    assert_eq!(initial.crystal_count, 7);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

    post_empty(&app, "/admin/reset").await;
    assert_eq!(rx.try_recv().unwrap().boss_hp, 100);
}

#[tokio::test]
async fn concurrent_reports_are_serialized() {
    let (app, state) = make_app();
    let (_, mut rx) = state.subscribe().await;

    let mut tasks = Vec::new();
    for i in 0..7 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let mut slots = [false; 7];
            for slot in slots.iter_mut().take(i + 1) {
                *slot = true;
            }
            post_json(&app, "/event", &report(slots)).await
        }));
    }
    for task in tasks {
        let (status, _) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let mut seen = 0;
    while let Ok(snapshot) = rx.try_recv() {
        assert!(snapshot.boss_hp <= snapshot.max_hp);
        assert_eq!(
            snapshot.crystal_count,
            u32::try_from(snapshot.slots.iter().filter(|&&s| s).count()).unwrap()
        );
        seen += 1;
    }
    assert_eq!(seen, 7);
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = make_app();
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}
