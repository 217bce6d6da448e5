//! Existence resolution for the check operation.
//!
//! Answers "does this filename already have annotations?" from two
//! sources: the primary store first, then the legacy CSV export. Primary
//! unavailability degrades to the fallback scan instead of failing the
//! lookup; only unparsable fallback data is a hard error.

use std::path::Path;

use serde::Serialize;

use clipmark_core::error::CoreError;
use clipmark_core::fallback::FallbackTable;
use clipmark_db::models::annotation_document::AnnotationDocument;
use clipmark_db::repositories::AnnotationDocumentRepo;
use clipmark_db::DbPool;

/// Which source answered the existence question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    Primary,
    Fallback,
    None,
}

impl LookupSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::None => "none",
        }
    }
}

/// Result of a dual-source existence lookup.
///
/// `document` is populated only on a primary hit; the flat fallback
/// format retains no structured annotation records to hydrate from.
#[derive(Debug)]
pub struct LookupOutcome {
    pub found: bool,
    pub source: LookupSource,
    pub document: Option<AnnotationDocument>,
}

impl LookupOutcome {
    fn not_found() -> Self {
        Self {
            found: false,
            source: LookupSource::None,
            document: None,
        }
    }
}

/// Look up a filename in the primary store, then the fallback CSV.
///
/// A failed primary query is logged and treated as a primary miss, so a
/// store outage still lets the fallback answer. A missing fallback file
/// means no fallback source. Fallback matching is exact and
/// case-sensitive against the alias columns, first row wins.
pub async fn lookup(
    pool: &DbPool,
    fallback_csv: &Path,
    filename: &str,
) -> Result<LookupOutcome, CoreError> {
    match AnnotationDocumentRepo::find_by_filename(pool, filename).await {
        Ok(Some(document)) => {
            return Ok(LookupOutcome {
                found: true,
                source: LookupSource::Primary,
                document: Some(document),
            });
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "Primary store lookup failed, falling back to CSV");
        }
    }

    let text = match tokio::fs::read_to_string(fallback_csv).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LookupOutcome::not_found());
        }
        Err(err) => {
            return Err(CoreError::Internal(format!(
                "failed to read fallback file: {err}"
            )));
        }
    };

    let table = FallbackTable::parse(&text)?;

    if table.contains_filename(filename) {
        Ok(LookupOutcome {
            found: true,
            source: LookupSource::Fallback,
            document: None,
        })
    } else {
        Ok(LookupOutcome::not_found())
    }
}
