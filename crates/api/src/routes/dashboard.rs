use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET  /              -> list_cards
/// GET  /cards/{id}    -> get_card
/// GET  /help          -> help
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::list_cards))
        .route("/cards/{id}", get(dashboard::get_card))
        .route("/help", get(dashboard::help))
}
