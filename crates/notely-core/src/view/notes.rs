//! Canonical and filtered note collections.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{Note, NoteDraft, NoteId};
use crate::search::{filter_notes, SearchTerm};

/// A remote operation the controller is waiting on.
///
/// Mutations are keyed by their payload, so only a repeat of the very same
/// request counts as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingOp {
    Load,
    Create(NoteDraft),
    Edit(NoteId, NoteDraft),
    Delete(NoteId),
}

impl fmt::Display for PendingOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load notes"),
            Self::Create(_) => f.write_str("create note"),
            Self::Edit(id, _) => write!(f, "edit note {id}"),
            Self::Delete(id) => write!(f, "delete note {id}"),
        }
    }
}

/// What the list should render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesSnapshot {
    /// Notes matching the active term, in display order
    pub notes: Vec<Note>,
    /// Size of the canonical collection
    pub total: usize,
    /// Active search term as typed
    pub search_term: String,
}

impl NotesSnapshot {
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
    }
}

/// Local note state. Only mutated after a store call succeeds.
///
/// `filtered` is always the subsequence of `canonical` matching `term`.
#[derive(Debug, Default)]
pub struct NotesView {
    canonical: Vec<Note>,
    filtered: Vec<Note>,
    term: SearchTerm,
    pending: HashSet<PendingOp>,
}

impl NotesView {
    #[must_use]
    pub fn canonical(&self) -> &[Note] {
        &self.canonical
    }

    #[must_use]
    pub fn filtered(&self) -> &[Note] {
        &self.filtered
    }

    #[must_use]
    pub fn snapshot(&self) -> NotesSnapshot {
        NotesSnapshot {
            notes: self.filtered.clone(),
            total: self.canonical.len(),
            search_term: self.term.as_str().to_string(),
        }
    }

    /// Register `op` as outstanding. Returns `false` if it already is.
    pub fn begin(&mut self, op: PendingOp) -> bool {
        self.pending.insert(op)
    }

    pub fn finish(&mut self, op: &PendingOp) {
        self.pending.remove(op);
    }

    #[must_use]
    pub fn is_pending(&self, op: &PendingOp) -> bool {
        self.pending.contains(op)
    }

    pub fn search(&mut self, term: SearchTerm) {
        self.term = term;
        self.refilter();
    }

    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.canonical = notes;
        self.refilter();
    }

    pub fn prepend(&mut self, note: Note) {
        if self.term.matches(&note) {
            self.filtered.insert(0, note.clone());
        }
        self.canonical.insert(0, note);
    }

    /// Apply an edit in place. Returns `false` if the note is not held locally.
    pub fn apply_edit(&mut self, id: &NoteId, draft: &NoteDraft, at: DateTime<Utc>) -> bool {
        let Some(note) = self.canonical.iter_mut().find(|note| &note.id == id) else {
            return false;
        };
        note.apply_draft(draft, at);
        self.refilter();
        true
    }

    /// Remove by id. Returns `false` if the note is not held locally.
    pub fn remove(&mut self, id: &NoteId) -> bool {
        let before = self.canonical.len();
        self.canonical.retain(|note| &note.id != id);
        self.filtered.retain(|note| &note.id != id);
        self.canonical.len() != before
    }

    /// Drop every note and the search term. Outstanding ops stay registered.
    pub fn clear(&mut self) {
        self.canonical.clear();
        self.filtered.clear();
        self.term = SearchTerm::default();
    }

    fn refilter(&mut self) {
        self.filtered = filter_notes(&self.canonical, &self.term);
    }
}
