//! Annotation document model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use clipmark_core::types::{DbId, Timestamp};

/// A row from the `annotation_documents` table: the persisted label set
/// for one video filename.
///
/// Wire names are camelCase to preserve the document format of earlier
/// exports (`createdAt`/`updatedAt`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDocument {
    pub id: DbId,
    pub filename: String,
    /// The full ordered token array, replaced wholesale on every write.
    pub annotations: serde_json::Value,
    pub meta: serde_json::Value,
    /// Set once on first insert; preserved across overwrites.
    pub created_at: Timestamp,
    /// Refreshed on every successful write.
    pub updated_at: Timestamp,
}

/// DTO for inserting a fresh document.
#[derive(Debug, Clone)]
pub struct NewAnnotationDocument {
    pub filename: String,
    pub annotations: serde_json::Value,
    pub meta: serde_json::Value,
}
