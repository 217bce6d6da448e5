pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{annotations, labels};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /check     existence check (primary store, then legacy CSV)
/// /save      save protocol (insert / conflict / forced overwrite)
/// /list      all documents as JSON or CSV export
/// /labels    zone/actor/event vocabularies
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/check", get(annotations::check))
        .route("/save", post(annotations::save))
        .route("/list", get(annotations::list))
        .route("/labels", get(labels::get_labels))
}
