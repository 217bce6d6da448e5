//! Save negotiation: the check-then-write protocol.
//!
//! A save is a fresh insert, a transparent re-save under `force`, or a
//! conflict that the operator must confirm with a second attempt. The
//! existence check and the write are two store operations; the table's
//! unique constraint backstops the window between them, so a create race
//! degrades to a conflict rather than duplicate rows. The fallback CSV
//! source is never consulted here, only during the check operation.

use clipmark_core::error::CoreError;
use clipmark_core::sequence::AnnotationSequence;
use clipmark_db::models::annotation_document::{AnnotationDocument, NewAnnotationDocument};
use clipmark_db::repositories::AnnotationDocumentRepo;
use clipmark_db::DbPool;

use crate::error::AppError;

/// Outcome of one save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The document was written. Carries the stored row.
    Committed(AnnotationDocument),
    /// A document already exists and the caller did not assert intent to
    /// overwrite. Nothing was written.
    Conflict,
}

/// Run the save protocol for one filename.
///
/// - Empty filename or absent sequence is rejected up front. An empty
///   sequence is not absent: saving zero tokens is valid.
/// - No existing document: insert with `created_at = updated_at`.
/// - Existing document without `force`: [`SaveOutcome::Conflict`], store
///   untouched.
/// - Existing document with `force`: replace annotations and meta,
///   refresh `updated_at`, preserve `created_at`.
pub async fn negotiate_save(
    pool: &DbPool,
    filename: &str,
    annotations: Option<&AnnotationSequence>,
    meta: &serde_json::Value,
    force: bool,
) -> Result<SaveOutcome, AppError> {
    if filename.is_empty() {
        return Err(CoreError::Validation("missing filename".to_string()).into());
    }
    let Some(annotations) = annotations else {
        return Err(CoreError::Validation("missing annotations".to_string()).into());
    };

    let annotations_json = serde_json::to_value(annotations)
        .map_err(|e| AppError::InternalError(format!("failed to encode annotations: {e}")))?;

    let existing = AnnotationDocumentRepo::find_by_filename(pool, filename).await?;

    match existing {
        None => {
            let input = NewAnnotationDocument {
                filename: filename.to_string(),
                annotations: annotations_json,
                meta: meta.clone(),
            };
            match AnnotationDocumentRepo::insert(pool, &input).await {
                Ok(document) => {
                    tracing::info!(
                        filename,
                        token_count = annotations.len(),
                        "Annotation document created"
                    );
                    Ok(SaveOutcome::Committed(document))
                }
                Err(err) if is_unique_violation(&err) => {
                    // Lost a create race to a concurrent session.
                    tracing::info!(filename, "Concurrent create detected, reporting conflict");
                    Ok(SaveOutcome::Conflict)
                }
                Err(err) => Err(err.into()),
            }
        }
        Some(_) if !force => Ok(SaveOutcome::Conflict),
        Some(_) => {
            let document = AnnotationDocumentRepo::overwrite(pool, filename, &annotations_json, meta)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "document for '{filename}' vanished during overwrite"
                    ))
                })?;
            tracing::info!(
                filename,
                token_count = annotations.len(),
                "Annotation document overwritten"
            );
            Ok(SaveOutcome::Committed(document))
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

/// Per-editing-session save state machine.
///
/// A conflict arms the overwrite confirmation; the next attempt through
/// this session carries `force = true`. Every successful commit disarms,
/// so confirmation never persists beyond one write.
#[derive(Debug, Default)]
pub struct SaveSession {
    armed: bool,
}

impl SaveSession {
    pub fn new() -> Self {
        Self { armed: false }
    }

    /// Whether the next save will assert intent to overwrite.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Run one save attempt, arming on conflict and disarming on commit.
    ///
    /// Errors (validation, store failure) leave the armed state as it
    /// was: the attempt never reached a protocol decision.
    pub async fn save(
        &mut self,
        pool: &DbPool,
        filename: &str,
        annotations: &AnnotationSequence,
        meta: &serde_json::Value,
    ) -> Result<SaveOutcome, AppError> {
        let outcome = negotiate_save(pool, filename, Some(annotations), meta, self.armed).await?;
        match &outcome {
            SaveOutcome::Committed(_) => self.armed = false,
            SaveOutcome::Conflict => self.armed = true,
        }
        Ok(outcome)
    }

    /// Forget an armed confirmation, e.g. when the operator selects a new
    /// source file.
    pub fn reset(&mut self) {
        self.armed = false;
    }
}
