//! Annotation token construction.
//!
//! A token captures one structured event: a zone transition, an actor
//! transition, and an event label. The display string is rendered with a
//! fixed separator grammar so that equal fields always produce
//! byte-identical strings. Position in the sequence, not the string, is
//! the identity of a token.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::labels::LabelConfig;

/// The five-field selection the editing UI submits to build a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSelection {
    pub z1: String,
    pub z2: String,
    pub a1: String,
    pub a2: String,
    pub e: String,
}

/// An immutable annotation token: the five source fields plus the
/// canonical rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationToken {
    pub z1: String,
    pub z2: String,
    pub a1: String,
    pub a2: String,
    pub e: String,
    pub token: String,
}

/// Render the canonical token string for the given fields.
///
/// Grammar: `<z1→z2 : a1→a2 : e>`. Deterministic; equal inputs yield
/// byte-identical output.
pub fn render_token(z1: &str, z2: &str, a1: &str, a2: &str, e: &str) -> String {
    format!("<{z1}→{z2} : {a1}→{a2} : {e}>")
}

impl AnnotationToken {
    /// Build a token from a selection, validating every field against its
    /// label vocabulary.
    pub fn build(selection: &TokenSelection, labels: &LabelConfig) -> Result<Self, CoreError> {
        for (field, value, valid) in [
            ("z1", &selection.z1, labels.has_zone(&selection.z1)),
            ("z2", &selection.z2, labels.has_zone(&selection.z2)),
            ("a1", &selection.a1, labels.has_actor(&selection.a1)),
            ("a2", &selection.a2, labels.has_actor(&selection.a2)),
            ("e", &selection.e, labels.has_event(&selection.e)),
        ] {
            if !valid {
                return Err(CoreError::Validation(format!(
                    "Invalid {field} label '{value}'"
                )));
            }
        }

        Ok(Self {
            token: render_token(
                &selection.z1,
                &selection.z2,
                &selection.a1,
                &selection.a2,
                &selection.e,
            ),
            z1: selection.z1.clone(),
            z2: selection.z2.clone(),
            a1: selection.a1.clone(),
            a2: selection.a2.clone(),
            e: selection.e.clone(),
        })
    }
}
