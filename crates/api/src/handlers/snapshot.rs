//! Handlers for reading and replacing the entity snapshot.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hamdash_core::snapshot::DashboardSnapshot;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /snapshot
pub async fn get_snapshot(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.snapshot().await;
    Ok(Json(DataResponse {
        data: snapshot.as_ref().clone(),
    }))
}

/// PUT /snapshot
///
/// Replaces the snapshot wholesale. The payload is validated first; on any
/// error the current snapshot stays in place.
pub async fn replace_snapshot(
    State(state): State<AppState>,
    body: Result<Json<DashboardSnapshot>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(snapshot) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    snapshot.validate()?;

    let summary = snapshot.summary();
    state.replace_snapshot(snapshot).await;

    tracing::info!(
        has_solar = summary.has_solar,
        bands = summary.bands,
        contests = summary.contests,
        meteor_showers = summary.meteor_showers,
        activations = summary.activations,
        "Snapshot replaced",
    );
    Ok(Json(DataResponse { data: summary }))
}
