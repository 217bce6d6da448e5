//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod annotation_document_repo;

pub use annotation_document_repo::AnnotationDocumentRepo;
