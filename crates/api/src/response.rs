//! Response payload types for the annotation API.
//!
//! The shapes are fixed by the wire format of the original tool, so they
//! are spelled out as types here instead of ad-hoc `json!` blocks.

use serde::Serialize;

use clipmark_db::models::annotation_document::AnnotationDocument;

use crate::resolver::LookupSource;

/// Response for `GET /api/check`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Whether any source knows this filename.
    pub annotated: bool,
    pub source: LookupSource,
    /// The stored document on a primary hit, for hydrating the editing UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<AnnotationDocument>,
}

/// Response for a committed `POST /api/save`.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub ok: bool,
}
