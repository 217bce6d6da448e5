//! Handlers for the annotation check/save/list flow.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use clipmark_core::error::CoreError;
use clipmark_core::sequence::AnnotationSequence;
use clipmark_db::models::annotation_document::AnnotationDocument;
use clipmark_db::repositories::AnnotationDocumentRepo;

use crate::error::{AppError, AppResult};
use crate::negotiator::{negotiate_save, SaveOutcome};
use crate::resolver;
use crate::response::{CheckResponse, SaveResponse};
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Check
   -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub filename: Option<String>,
}

/// GET /api/check?filename=...
///
/// Dual-source existence check. A primary hit includes the stored
/// document so the UI can hydrate previously saved annotations.
pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> AppResult<impl IntoResponse> {
    let filename = params.filename.unwrap_or_default();
    if filename.is_empty() {
        return Err(AppError::BadRequest("filename required".to_string()));
    }

    let outcome =
        resolver::lookup(&state.pool, &state.config.fallback_csv_path, &filename).await?;

    Ok(Json(CheckResponse {
        annotated: outcome.found,
        source: outcome.source,
        doc: outcome.document,
    }))
}

/* --------------------------------------------------------------------------
   Save
   -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct SaveBody {
    pub filename: Option<String>,
    /// Absent means a malformed request; an empty array is a valid save
    /// of zero tokens.
    pub annotations: Option<AnnotationSequence>,
    #[serde(default)]
    pub force: bool,
    pub meta: Option<serde_json::Value>,
}

/// POST /api/save
///
/// Runs the save protocol. An unconfirmed overwrite returns 409 with
/// `exists: true`; the client re-sends with `force: true` to proceed.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveBody>,
) -> AppResult<impl IntoResponse> {
    let filename = body.filename.unwrap_or_default();
    let meta = body.meta.unwrap_or_else(|| serde_json::json!({}));

    let outcome = negotiate_save(
        &state.pool,
        &filename,
        body.annotations.as_ref(),
        &meta,
        body.force,
    )
    .await?;

    match outcome {
        SaveOutcome::Committed(_) => Ok(Json(SaveResponse { ok: true })),
        SaveOutcome::Conflict => Err(CoreError::Conflict(format!(
            "annotations for '{filename}' already exist; re-send with force to overwrite"
        ))
        .into()),
    }
}

/* --------------------------------------------------------------------------
   List
   -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub format: Option<String>,
}

/// GET /api/list?format=json|csv
///
/// All documents as a JSON array, or as a CSV attachment with columns
/// `filename, createdAt, updatedAt, annotations` (annotations
/// JSON-encoded into one cell).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let docs = AnnotationDocumentRepo::list_all(&state.pool).await?;

    let format = params.format.as_deref().unwrap_or("json").to_ascii_lowercase();
    match format.as_str() {
        "csv" => {
            let csv_output = documents_to_csv(&docs);
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "text/csv; charset=utf-8")
                .header(
                    "Content-Disposition",
                    "attachment; filename=\"annotations.csv\"",
                )
                .body(axum::body::Body::from(csv_output))
                .map_err(|e| AppError::InternalError(e.to_string()))?
                .into_response())
        }
        _ => Ok(Json(docs).into_response()),
    }
}

/// Flatten documents into CSV rows with ISO-8601 timestamps.
fn documents_to_csv(docs: &[AnnotationDocument]) -> String {
    let mut csv_output = String::from("filename,createdAt,updatedAt,annotations\n");
    for doc in docs {
        csv_output.push_str(&format!(
            "{},{},{},{}\n",
            csv_escape(&doc.filename),
            doc.created_at.to_rfc3339(),
            doc.updated_at.to_rfc3339(),
            csv_escape(&doc.annotations.to_string()),
        ));
    }
    csv_output
}

/// Quote a CSV cell when it contains separators or quotes; embedded
/// quotes are doubled.
fn csv_escape(value: &str) -> String {
    if value.contains('"') || value.contains(',') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
