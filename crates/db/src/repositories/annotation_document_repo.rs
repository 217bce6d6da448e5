//! Repository for the `annotation_documents` table.

use sqlx::PgPool;

use crate::models::annotation_document::{AnnotationDocument, NewAnnotationDocument};

/// Column list for annotation_documents queries.
const COLUMNS: &str = "id, filename, annotations, meta, created_at, updated_at";

/// Provides lookups and writes for annotation documents.
///
/// The table holds at most one row per filename
/// (`uq_annotation_documents_filename`); a duplicate insert surfaces as a
/// unique-constraint violation for the caller to classify.
pub struct AnnotationDocumentRepo;

impl AnnotationDocumentRepo {
    /// Find the document for a filename, if any.
    pub async fn find_by_filename(
        pool: &PgPool,
        filename: &str,
    ) -> Result<Option<AnnotationDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotation_documents WHERE filename = $1");
        sqlx::query_as::<_, AnnotationDocument>(&query)
            .bind(filename)
            .fetch_optional(pool)
            .await
    }

    /// Insert a fresh document. `created_at` and `updated_at` are assigned
    /// the same statement timestamp.
    pub async fn insert(
        pool: &PgPool,
        input: &NewAnnotationDocument,
    ) -> Result<AnnotationDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotation_documents
                (filename, annotations, meta, created_at, updated_at)
             VALUES ($1, $2, $3, now(), now())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationDocument>(&query)
            .bind(&input.filename)
            .bind(&input.annotations)
            .bind(&input.meta)
            .fetch_one(pool)
            .await
    }

    /// Replace the annotations and meta of an existing document.
    ///
    /// Full replacement, not a merge. `updated_at` is refreshed and
    /// `created_at` is left untouched. Returns `None` if no document
    /// exists for the filename.
    pub async fn overwrite(
        pool: &PgPool,
        filename: &str,
        annotations: &serde_json::Value,
        meta: &serde_json::Value,
    ) -> Result<Option<AnnotationDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE annotation_documents
             SET annotations = $2, meta = $3, updated_at = now()
             WHERE filename = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnnotationDocument>(&query)
            .bind(filename)
            .bind(annotations)
            .bind(meta)
            .fetch_optional(pool)
            .await
    }

    /// List every document, ordered by filename for deterministic exports.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AnnotationDocument>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM annotation_documents ORDER BY filename ASC");
        sqlx::query_as::<_, AnnotationDocument>(&query)
            .fetch_all(pool)
            .await
    }
}
