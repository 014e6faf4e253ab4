//! Integration tests for the snapshot and dashboard endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json, put_raw, sample_snapshot};
use hamdash_api::state::AppState;
use serde_json::{json, Value};

/// State with [`sample_snapshot`] loaded through the API.
async fn loaded_state() -> AppState {
    let state = common::test_state();
    let response = put_json(
        common::build_test_app(state.clone()),
        "/api/v1/snapshot",
        &sample_snapshot(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    state
}

async fn dashboard_cards(state: &AppState) -> Vec<Value> {
    let response = get(common::build_test_app(state.clone()), "/api/v1/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"].as_array().expect("data must be an array").clone()
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_snapshot_returns_summary() {
    let state = common::test_state();
    let response = put_json(
        common::build_test_app(state),
        "/api/v1/snapshot",
        &sample_snapshot(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["has_solar"], true);
    assert_eq!(json["data"]["bands"], 2);
    assert_eq!(json["data"]["contests"], 2);
    assert_eq!(json["data"]["meteor_showers"], 1);
    assert_eq!(json["data"]["activations"], 1);
}

#[tokio::test]
async fn get_snapshot_returns_what_was_stored() {
    let state = loaded_state().await;
    let response = get(common::build_test_app(state), "/api/v1/snapshot").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["solar"]["source"], "NOAA SWPC");
    assert_eq!(json["data"]["bands"][1]["notes"], "High noise");
    assert_eq!(json["data"]["activations"][0]["callsign"], "W1AW");
}

#[tokio::test]
async fn invalid_snapshot_rejected_and_previous_kept() {
    let state = loaded_state().await;

    let mut bad = sample_snapshot();
    bad["solar"]["k_index"] = json!(12);

    let response = put_json(common::build_test_app(state.clone()), "/api/v1/snapshot", &bad).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let json = body_json(get(common::build_test_app(state), "/api/v1/snapshot").await).await;
    assert_eq!(json["data"]["solar"]["k_index"], 2);
}

#[tokio::test]
async fn contests_sharing_a_card_id_rejected() {
    let mut bad = sample_snapshot();
    let mut twin = bad["contests"][0].clone();
    twin["name"] = json!("CQ-WW-DX SSB");
    twin["sponsor"] = json!("Another Sponsor");
    bad["contests"].as_array_mut().unwrap().push(twin);

    let response = put_json(
        common::build_test_app(common::test_state()),
        "/api/v1/snapshot",
        &bad,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("same card id"));
}

#[tokio::test]
async fn out_of_range_confidence_is_bad_request() {
    let mut bad = sample_snapshot();
    bad["bands"][0]["confidence"] = json!(1.5);

    let response = put_json(
        common::build_test_app(common::test_state()),
        "/api/v1/snapshot",
        &bad,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let response = put_raw(
        common::build_test_app(common::test_state()),
        "/api/v1/snapshot",
        "{not json".to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_snapshot_renders_no_cards() {
    let cards = dashboard_cards(&common::test_state()).await;
    assert!(cards.is_empty());
}

#[tokio::test]
async fn dashboard_cards_ordered_by_priority() {
    let state = loaded_state().await;
    let cards = dashboard_cards(&state).await;

    // Ended contest is left out.
    assert_eq!(cards.len(), 6);
    assert!(cards
        .iter()
        .all(|c| !c["id"].as_str().unwrap().contains("finished-sprint")));

    let priorities: Vec<i64> = cards.iter().map(|c| c["priority"].as_i64().unwrap()).collect();
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]), "{priorities:?}");

    assert_eq!(cards[0]["id"], "band-20m");
    assert_eq!(cards[0]["hotness"], "hot");
    assert_eq!(cards[5]["id"], "band-160m");
    assert_eq!(cards[5]["hotness"], "cool");
}

#[tokio::test]
async fn dashboard_card_shape() {
    let state = loaded_state().await;
    let cards = dashboard_cards(&state).await;

    let solar = cards.iter().find(|c| c["type"] == "solar").unwrap();
    assert_eq!(solar["id"], "solar");
    assert_eq!(solar["size"], "large");
    assert_eq!(solar["view"]["title"], "Solar Conditions");
    assert_eq!(solar["view"]["favorable"], true);

    let meteor = cards.iter().find(|c| c["type"] == "meteor").unwrap();
    assert_eq!(meteor["size"], "medium");
    assert_eq!(meteor["view"]["state"], "active");
    assert!(meteor["view"]["badges"]
        .as_array()
        .unwrap()
        .contains(&json!("At peak")));
}

#[tokio::test]
async fn get_single_card_by_id() {
    let state = loaded_state().await;
    let response = get(common::build_test_app(state), "/api/v1/dashboard/cards/band-160m").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "band");
    assert_eq!(json["data"]["view"]["headline"], "POOR");
}

#[tokio::test]
async fn missing_card_is_not_found() {
    let state = loaded_state().await;
    let response = get(common::build_test_app(state), "/api/v1/dashboard/cards/band-6m").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn help_sections_listed() {
    let response = get(
        common::build_test_app(common::test_state()),
        "/api/v1/dashboard/help",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["solar", "band", "contest", "meteor", "activation"]);
}
