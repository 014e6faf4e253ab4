//! Handlers for the composed dashboard.
//!
//! Every request runs a fresh render pass against the current snapshot at
//! the current wall-clock time. Nothing is cached between requests.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /dashboard
///
/// All renderable cards, highest priority first.
pub async fn list_cards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await;
    let cards = state.registry.render(&snapshot, Utc::now());

    tracing::debug!(cards = cards.len(), "Rendered dashboard");
    Ok(Json(DataResponse { data: cards }))
}

/// GET /dashboard/cards/{id}
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await;
    let card = state.registry.find(&snapshot, &id, Utc::now())?;
    Ok(Json(DataResponse { data: card }))
}

/// GET /dashboard/help
pub async fn help(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.registry.help_sections().to_vec(),
    }))
}
