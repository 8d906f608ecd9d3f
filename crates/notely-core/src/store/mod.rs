//! Remote note store abstraction.
//!
//! The view controller only talks to notes through [`NoteStore`]; the
//! Supabase implementation speaks PostgREST, the in-memory one backs tests.

mod memory;
mod supabase;

pub use memory::{MemoryNoteStore, StoreHold};
pub use supabase::SupabaseNoteStore;

use crate::models::{Note, NoteDraft, NoteId};
use crate::Result;

/// Table-like note resource keyed by owner.
///
/// Every method either returns data or an error; callers must not touch
/// local state until the call has succeeded.
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    /// All notes of `owner`, newest `last_modified` first.
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>>;

    /// Insert one note for `owner`, returning the stored record with its
    /// assigned id and timestamp.
    async fn insert_note(&self, owner: &str, draft: &NoteDraft) -> Result<Note>;

    /// Replace title and content of the note with `id`.
    ///
    /// Fails with [`crate::Error::NotFound`] when no row matches.
    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> Result<()>;

    /// Remove the note with `id`.
    ///
    /// Fails with [`crate::Error::NotFound`] when no row matches.
    async fn delete_note(&self, id: &NoteId) -> Result<()>;
}
