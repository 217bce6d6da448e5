//! Pure domain logic for the clipmark annotation service.
//!
//! This crate has no I/O and no async: label enumerations, token
//! construction, the ordered annotation sequence, and the tolerant
//! parser for the legacy CSV fallback source. Persistence lives in
//! `clipmark-db`, HTTP in `clipmark-api`.

pub mod error;
pub mod fallback;
pub mod labels;
pub mod sequence;
pub mod token;
pub mod types;
