//! UI Components
//!
//! Reusable UI components for the desktop application.

mod button;
mod error_banner;
mod header;
mod note_card;
mod note_editor;
mod note_list;

pub use button::{Button, ButtonVariant};
pub use error_banner::ErrorBanner;
pub use header::Header;
pub use note_card::NoteCard;
pub use note_editor::NoteEditor;
pub use note_list::NoteList;
