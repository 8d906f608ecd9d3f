//! Client-side note search
//!
//! Filtering is a case-insensitive substring match over title and content,
//! evaluated locally against the notes already loaded from the store.

use crate::models::Note;

/// A normalized search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The term exactly as typed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        note.matches_lowercase(&self.needle)
    }
}

/// Notes matching `term`, in their original order.
pub fn filter_notes(notes: &[Note], term: &SearchTerm) -> Vec<Note> {
    if term.is_empty() {
        return notes.to_vec();
    }
    notes
        .iter()
        .filter(|note| term.matches(note))
        .cloned()
        .collect()
}
