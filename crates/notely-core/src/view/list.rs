//! Notes list state machine: browsing cards or editing one note.

use crate::models::{Note, NoteDraft, NoteId};

/// How the editor was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorLaunch {
    Create,
    Edit(Note),
}

impl EditorLaunch {
    /// Initial editor contents.
    #[must_use]
    pub fn initial_draft(&self) -> NoteDraft {
        match self {
            Self::Create => NoteDraft::default(),
            Self::Edit(note) => NoteDraft::from(note),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListMode {
    #[default]
    Browsing,
    Editing(EditorLaunch),
}

/// A mutation the list asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIntent {
    Create(NoteDraft),
    Edit { id: NoteId, draft: NoteDraft },
    Delete(NoteId),
}

/// Editor-open/closed state of the notes list.
///
/// Only one of the card collection and the editor is shown at a time; the
/// machine cycles between the two for the lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesListState {
    mode: ListMode,
}

impl NotesListState {
    #[must_use]
    pub const fn mode(&self) -> &ListMode {
        &self.mode
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, ListMode::Editing(_))
    }

    pub fn open_new(&mut self) {
        self.mode = ListMode::Editing(EditorLaunch::Create);
    }

    pub fn open_existing(&mut self, note: Note) {
        self.mode = ListMode::Editing(EditorLaunch::Edit(note));
    }

    /// Leave the editor without saving.
    pub fn back(&mut self) {
        self.mode = ListMode::Browsing;
    }

    /// Close the editor and turn the draft into an intent.
    ///
    /// Blank drafts are discarded. Saving while browsing does nothing.
    pub fn save(&mut self, draft: NoteDraft) -> Option<NoteIntent> {
        let ListMode::Editing(launch) = std::mem::take(&mut self.mode) else {
            return None;
        };
        if draft.is_blank() {
            tracing::debug!("Discarding blank note draft");
            return None;
        }
        Some(match launch {
            EditorLaunch::Create => NoteIntent::Create(draft),
            EditorLaunch::Edit(note) => NoteIntent::Edit { id: note.id, draft },
        })
    }

    /// Delete from a card. The mode is left alone.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn delete(&self, id: NoteId) -> NoteIntent {
        NoteIntent::Delete(id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn existing() -> Note {
        Note {
            id: NoteId::parse("n1").unwrap(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn starts_browsing() {
        assert_eq!(NotesListState::default().mode(), &ListMode::Browsing);
    }

    #[test]
    fn new_note_saves_as_create() {
        let mut state = NotesListState::default();
        state.open_new();
        assert!(state.is_editing());

        let intent = state.save(NoteDraft::new("Hello", ""));
        assert_eq!(intent, Some(NoteIntent::Create(NoteDraft::new("Hello", ""))));
        assert_eq!(state.mode(), &ListMode::Browsing);
    }

    #[test]
    fn existing_note_saves_as_edit() {
        let mut state = NotesListState::default();
        state.open_existing(existing());

        let intent = state.save(NoteDraft::new("Title", "New body"));
        assert_eq!(
            intent,
            Some(NoteIntent::Edit {
                id: NoteId::parse("n1").unwrap(),
                draft: NoteDraft::new("Title", "New body"),
            })
        );
        assert!(!state.is_editing());
    }

    #[test]
    fn blank_save_discards_and_returns_to_browsing() {
        let mut state = NotesListState::default();
        state.open_existing(existing());

        assert_eq!(state.save(NoteDraft::new("", "   ")), None);
        assert_eq!(state.mode(), &ListMode::Browsing);
    }

    #[test]
    fn back_produces_no_intent() {
        let mut state = NotesListState::default();
        state.open_new();
        state.back();
        assert_eq!(state.mode(), &ListMode::Browsing);
        assert_eq!(state.save(NoteDraft::new("late", "save")), None);
    }

    #[test]
    fn delete_does_not_open_editor() {
        let state = NotesListState::default();
        let intent = state.delete(NoteId::parse("n1").unwrap());
        assert_eq!(intent, NoteIntent::Delete(NoteId::parse("n1").unwrap()));
        assert_eq!(state.mode(), &ListMode::Browsing);
    }

    #[test]
    fn launch_seeds_editor() {
        assert_eq!(EditorLaunch::Create.initial_draft(), NoteDraft::default());
        assert_eq!(
            EditorLaunch::Edit(existing()).initial_draft(),
            NoteDraft::new("Title", "Body")
        );
    }
}
