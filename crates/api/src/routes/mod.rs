pub mod dashboard;
pub mod health;
pub mod snapshot;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboard                       composed cards (GET)
/// /dashboard/cards/{id}            single card (GET)
/// /dashboard/help                  help sections (GET)
///
/// /snapshot                        current snapshot (GET), replace (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/snapshot", snapshot::router())
}
