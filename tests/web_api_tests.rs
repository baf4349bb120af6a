//! Integration tests for the Panelsmith Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use panelsmith::config::Config;
use panelsmith::models::PanelSize;
use panelsmith::web::{create_router, AppState};

/// Creates a router over a fresh session for `size` / `variant`.
fn create_test_app(size: PanelSize, variant: &str) -> axum::Router {
    let mut config = Config::default();
    config.defaults.size = size;
    config.defaults.variant = variant.to_string();

    let state = AppState::new(&config).expect("Failed to create app state");
    create_router(state)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

/// Helper to make a POST request with JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Helper to make a PUT request with JSON body.
async fn put_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

// ============================================================================
// Health / Catalog
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_list_sizes() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (status, json) = get_json(&app, "/api/sizes").await;

    assert_eq!(status, StatusCode::OK);
    let sizes = json["sizes"].as_array().unwrap();
    assert_eq!(sizes.len(), 4);
    assert_eq!(sizes[0]["size"], "2");
    assert_eq!(sizes[0]["preferred"], "2 curtains");
}

#[tokio::test]
async fn test_get_descriptor() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (status, json) = get_json(&app, "/api/descriptor?size=6&variant=8%20switch%20%2B%201%20Plug").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_slots"], 9);
    assert_eq!(json["labels"][8], "Plug");
}

#[tokio::test]
async fn test_get_descriptor_invalid_size() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (status, json) = get_json(&app, "/api/descriptor?size=3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_list_icons_with_filters() {
    let app = create_test_app(PanelSize::Four, "8 switches");

    let (status, all) = get_json(&app, "/api/icons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["total"], 70);

    let (_, lamps) = get_json(&app, "/api/icons?search=lamp%201").await;
    assert!(lamps["icons"]
        .as_array()
        .unwrap()
        .iter()
        .all(|icon| icon["name"].as_str().unwrap().starts_with("Lamp 1")));

    let (_, fans) = get_json(&app, "/api/icons?category=fans").await;
    assert!(fans["total"].as_u64().unwrap() > 0);
    assert!(fans["icons"]
        .as_array()
        .unwrap()
        .iter()
        .all(|icon| icon["category"] == "fans"));
}

#[tokio::test]
async fn test_list_categories() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (status, json) = get_json(&app, "/api/icons/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categories"].as_array().unwrap().len(), 9);
}

// ============================================================================
// Panel Session
// ============================================================================

#[tokio::test]
async fn test_get_panel_initial_state() {
    let app = create_test_app(PanelSize::Four, "4 switches + fan");
    let (status, json) = get_json(&app, "/api/panel").await;

    assert_eq!(status, StatusCode::OK);
    let slots = json["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[4]["kind"], "fan");
    assert_eq!(slots[4]["label"], "SPEED+");
    assert!(slots.iter().all(|slot| slot["icon"].is_null()));
    assert_eq!(json["occupied"], 0);
}

#[tokio::test]
async fn test_place_and_remove_round_trip() {
    let app = create_test_app(PanelSize::Four, "8 switches");

    let (status, placed) = post_json(&app, "/api/panel/slots/3", json!({"icon_id": "12"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(placed["outcome"], "placed");
    assert_eq!(placed["panel"]["slots"][3]["icon"]["name"], "Lamp 2");
    assert_eq!(placed["notifications"][0]["kind"], "icon_added");
    assert_eq!(placed["notifications"][0]["title"], "Icon Added");

    let instance_id = placed["placement"]["instance_id"].as_str().unwrap().to_string();
    let (status, removed) = send(
        &app,
        "DELETE",
        &format!("/api/panel/icons/{instance_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["outcome"], "removed");
    assert!(removed["panel"]["slots"][3]["icon"].is_null());

    let (_, again) = send(
        &app,
        "DELETE",
        &format!("/api/panel/icons/{instance_id}"),
        None,
    )
    .await;
    assert_eq!(again["outcome"], "not_found");
}

#[tokio::test]
async fn test_place_out_of_range_is_bad_request() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    let (status, json) = post_json(&app, "/api/panel/slots/4", json!({"icon_id": "1"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn test_place_unknown_icon_is_not_found() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    let (status, _) = post_json(&app, "/api/panel/icons", json!({"icon_id": "missing"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_place_first_empty_until_full() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    for expected in 0..4 {
        let (_, json) = post_json(&app, "/api/panel/icons", json!({"icon_id": "1"})).await;
        assert_eq!(json["placement"]["slot"], expected);
    }

    let (status, json) = post_json(&app, "/api/panel/icons", json!({"icon_id": "1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "panel_full");
    assert_eq!(json["notifications"][0]["kind"], "panel_full");
    assert_eq!(json["notifications"][0]["severity"], "destructive");
    assert_eq!(json["panel"]["occupied"], 4);
}

#[tokio::test]
async fn test_move_swaps_slots() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    post_json(&app, "/api/panel/slots/0", json!({"icon_id": "1"})).await;
    post_json(&app, "/api/panel/slots/1", json!({"icon_id": "2"})).await;

    let (status, json) = post_json(&app, "/api/panel/move", json!({"from": 0, "to": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "moved");
    assert_eq!(json["panel"]["slots"][0]["icon"]["name"], "Bulb 2");
    assert_eq!(json["panel"]["slots"][1]["icon"]["name"], "Bulb 1");

    let (_, json) = post_json(&app, "/api/panel/move", json!({"from": 2, "to": 3})).await;
    assert_eq!(json["outcome"], "not_moved");
}

#[tokio::test]
async fn test_gesture_endpoint() {
    let app = create_test_app(PanelSize::Two, "4 switches");

    let (status, json) = post_json(
        &app,
        "/api/panel/gestures",
        json!({
            "phase": "end",
            "source": {"type": "catalog-icon", "icon": "12"},
            "target": {"type": "panel-surface"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "placed");
    assert_eq!(json["placement"]["slot"], 0);

    let (_, json) = post_json(
        &app,
        "/api/panel/gestures",
        json!({
            "phase": "end",
            "source": {"type": "placed-icon", "slot": 0}
        }),
    )
    .await;
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(json["panel"]["occupied"], 1);
}

#[tokio::test]
async fn test_config_change_resets_panel() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    post_json(&app, "/api/panel/slots/0", json!({"icon_id": "1"})).await;
    post_json(&app, "/api/panel/slots/7", json!({"icon_id": "1"})).await;

    let (status, json) = put_json(
        &app,
        "/api/panel/config",
        json!({"variant": "4 switches + fan"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "reset");
    assert_eq!(json["panel"]["slots"].as_array().unwrap().len(), 8);
    assert_eq!(json["panel"]["occupied"], 0);
    let dropped: Vec<&Value> = json["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "icon_dropped")
        .collect();
    assert_eq!(dropped.len(), 2);
}

#[tokio::test]
async fn test_glass_change_keeps_icons() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    post_json(&app, "/api/panel/slots/2", json!({"icon_id": "1"})).await;

    let (_, json) = put_json(&app, "/api/panel/config", json!({"glass": "White"})).await;

    assert_eq!(json["outcome"], "unchanged");
    assert_eq!(json["panel"]["config"]["glass"], "White");
    assert_eq!(json["panel"]["occupied"], 1);
}

#[tokio::test]
async fn test_size_change_uses_preferred_variant() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    let (_, json) = put_json(&app, "/api/panel/config", json!({"size": "8"})).await;

    assert_eq!(json["panel"]["config"]["variant"], "10 switches + 1 Plug");
    assert_eq!(json["panel"]["slots"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_same_size_with_glass_change_keeps_icons() {
    let app = create_test_app(PanelSize::Four, "8 switches");
    post_json(&app, "/api/panel/slots/6", json!({"icon_id": "1"})).await;

    let (status, json) = put_json(
        &app,
        "/api/panel/config",
        json!({"size": "4", "glass": "White"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "unchanged");
    assert_eq!(json["panel"]["config"]["variant"], "8 switches");
    assert_eq!(json["panel"]["config"]["glass"], "White");
    assert_eq!(json["panel"]["occupied"], 1);
    assert_eq!(json["panel"]["slots"][6]["icon"]["name"], "Bulb 1");
}

#[tokio::test]
async fn test_clear_all() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    post_json(&app, "/api/panel/slots/0", json!({"icon_id": "1"})).await;
    post_json(&app, "/api/panel/slots/2", json!({"icon_id": "2"})).await;

    let (status, json) = send(&app, "DELETE", "/api/panel/icons", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "cleared");
    assert_eq!(json["panel"]["occupied"], 0);
    assert_eq!(json["notifications"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_snapshot() {
    let app = create_test_app(PanelSize::Four, "4 switches + 1 Plug");
    post_json(&app, "/api/panel/slots/4", json!({"icon_id": "1"})).await;

    let (status, json) = get_json(&app, "/api/panel/export").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["size"], "4");
    assert_eq!(json["total_slots"], 5);
    assert_eq!(json["icons"][0]["slot"], 4);
    assert_eq!(json["icons"][0]["kind"], "plug");
}

#[tokio::test]
async fn test_export_markdown() {
    let app = create_test_app(PanelSize::Two, "4 switches");
    post_json(&app, "/api/panel/slots/0", json!({"icon_id": "12"})).await;

    let (status, json) = get_json(&app, "/api/panel/export/markdown").await;

    assert_eq!(status, StatusCode::OK);
    let markdown = json["markdown"].as_str().unwrap();
    assert!(markdown.contains("# 2 Module Panel"));
    assert!(markdown.contains("| 1 | Switch 1 | Lamp 2 | Lamps |"));
    let filename = json["suggested_filename"].as_str().unwrap();
    assert!(filename.starts_with("panel-2module-"));
    assert!(filename.ends_with(".md"));
}
