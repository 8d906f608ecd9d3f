//! UI-independent view logic shared by Notely front-ends.

mod controller;
mod editor;
mod list;
mod notes;

pub use controller::NotesController;
pub use editor::EditorBuffer;
pub use list::{EditorLaunch, ListMode, NoteIntent, NotesListState};
pub use notes::{NotesSnapshot, NotesView, PendingOp};
