pub mod annotation_document;
