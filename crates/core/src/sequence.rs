//! The ordered annotation sequence for one editing session.
//!
//! Insertion order is the only order. The sequence is owned by exactly one
//! session and is discarded (via [`AnnotationSequence::clear`]) when the
//! operator selects a new source file, so stale labels never carry over.

use serde::{Deserialize, Serialize};

use crate::token::AnnotationToken;

/// Ordered list of annotation tokens, positions `0..len-1`.
///
/// Serde-transparent: serializes as a bare JSON array, so an HTTP body
/// field `annotations: [...]` deserializes directly into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSequence(Vec<AnnotationToken>);

impl AnnotationSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[AnnotationToken] {
        &self.0
    }

    /// Add a token at the end. Always succeeds.
    pub fn append(&mut self, token: AnnotationToken) {
        self.0.push(token);
    }

    /// Remove and return the token at position `i`.
    ///
    /// Out-of-bounds indices are a no-op returning `None`. UI actions may
    /// race with list mutation during reordering, so this must not panic.
    pub fn remove_at(&mut self, i: usize) -> Option<AnnotationToken> {
        if i < self.0.len() {
            Some(self.0.remove(i))
        } else {
            None
        }
    }

    /// Relocate the token at `from` to position `to`.
    ///
    /// The reordering law: `to` is clamped into `[0, len-1]` before the
    /// removal, then the token is removed from `from` and inserted at the
    /// clamped index. Because the removal shifts later elements down by
    /// one, a clamped `to` of `len-1` places the token last, which matches
    /// dropping onto the final visible row. An out-of-bounds `from` leaves
    /// the sequence unchanged.
    pub fn move_to(&mut self, from: usize, to: usize) {
        let len = self.0.len();
        if from >= len {
            return;
        }
        let clamped_to = to.min(len - 1);
        let token = self.0.remove(from);
        self.0.insert(clamped_to, token);
    }

    /// Up-button gesture: swap with the previous row.
    pub fn move_up(&mut self, i: usize) {
        self.move_to(i, i.saturating_sub(1));
    }

    /// Down-button gesture: swap with the next row.
    pub fn move_down(&mut self, i: usize) {
        self.move_to(i, i + 1);
    }

    /// Drop-on-list-tail gesture: move to the last position.
    pub fn move_to_end(&mut self, i: usize) {
        let len = self.0.len();
        if len > 0 {
            self.move_to(i, len - 1);
        }
    }

    /// Discard all tokens. Used when a new source file is selected.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}
