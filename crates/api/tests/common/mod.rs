#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hamdash_api::config::ServerConfig;
use hamdash_api::router::build_app_router;
use hamdash_api::state::AppState;
use hamdash_core::cards::producers::default_registry;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Fresh state with the built-in producers and an empty snapshot.
pub fn test_state() -> AppState {
    AppState::new(test_config(), default_registry())
}

/// Full application router over the given state, with the production
/// middleware stack.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state, &test_config())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: &Value) -> Response<Body> {
    put_raw(app, uri, body.to_string()).await
}

pub async fn put_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A snapshot payload with one entity of every family, timed around now.
///
/// Running contest, at-peak meteor shower and freshly spotted activation
/// are all favorable; the second contest ended yesterday.
pub fn sample_snapshot() -> Value {
    let now = Utc::now();
    json!({
        "solar": {
            "sfi": 165.0,
            "a_index": 8,
            "k_index": 2,
            "sunspot_number": 140,
            "source": "NOAA SWPC",
            "observed_at": now - Duration::minutes(5),
        },
        "bands": [
            { "band": "20m", "rating": "good", "confidence": 0.9 },
            { "band": "160m", "rating": "poor", "confidence": 0.8, "notes": "High noise" },
        ],
        "contests": [
            {
                "name": "CQ WW DX SSB",
                "start": now - Duration::hours(3),
                "end": now + Duration::hours(45),
                "bands": ["20m", "40m"],
                "modes": ["SSB"],
                "sponsor": "CQ Magazine",
            },
            {
                "name": "Finished Sprint",
                "start": now - Duration::hours(30),
                "end": now - Duration::hours(26),
            },
        ],
        "meteor_showers": [
            {
                "name": "Perseids",
                "code": "PER",
                "peak": { "start": now - Duration::hours(6), "end": now + Duration::hours(6) },
                "visibility": { "start": now - Duration::days(20), "end": now + Duration::days(10) },
                "peak_zhr": 100,
            },
        ],
        "activations": [
            {
                "callsign": "W1AW",
                "program": "pota",
                "reference": "K-1234",
                "frequency_khz": 7150.0,
                "mode": "SSB",
                "start": now - Duration::minutes(20),
                "end": now + Duration::hours(2),
                "last_spot": now - Duration::minutes(2),
                "spot_count": 4,
            },
        ],
    })
}
