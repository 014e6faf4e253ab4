use axum::routing::get;
use axum::Router;

use crate::handlers::snapshot;
use crate::state::AppState;

/// Snapshot routes mounted at `/snapshot`.
///
/// ```text
/// GET  /   -> get_snapshot
/// PUT  /   -> replace_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(snapshot::get_snapshot).put(snapshot::replace_snapshot),
    )
}
