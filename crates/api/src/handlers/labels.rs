//! Handler for the label vocabulary endpoint.

use axum::extract::State;
use axum::Json;

use clipmark_core::labels::LabelConfig;

use crate::state::AppState;

/// GET /api/labels
///
/// The zone/actor/event vocabularies the editing UI builds its selection
/// dropdowns from.
pub async fn get_labels(State(state): State<AppState>) -> Json<LabelConfig> {
    Json(state.labels.as_ref().clone())
}
