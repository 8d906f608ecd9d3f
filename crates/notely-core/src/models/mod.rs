//! Data models for Notely

mod note;

pub use note::{Note, NoteDraft, NoteId};
