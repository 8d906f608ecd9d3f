//! Notes view controller: reconciles local note state with the remote store.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use super::notes::{NotesSnapshot, NotesView, PendingOp};
use crate::models::{Note, NoteDraft, NoteId};
use crate::search::SearchTerm;
use crate::store::NoteStore;
use crate::{Error, Result};

/// Owns the canonical and filtered note collections for one signed-in owner.
///
/// Local state changes only after the store call succeeds, so a failed call
/// leaves everything as it was. Each operation is keyed ([`PendingOp`]); an
/// identical operation started while one is outstanding fails with
/// [`Error::Busy`] without reaching the store.
///
/// A load runs alone: it waits for outstanding mutations, and mutations
/// wait for it, so a list fetched before a mutation never replaces it.
///
/// The view lock is never held across a store call. Clones share state.
pub struct NotesController<S> {
    store: Arc<S>,
    owner: String,
    view: Arc<Mutex<NotesView>>,
    turns: Arc<RwLock<()>>,
}

impl<S> Clone for NotesController<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            owner: self.owner.clone(),
            view: Arc::clone(&self.view),
            turns: Arc::clone(&self.turns),
        }
    }
}

impl<S: NoteStore> NotesController<S> {
    pub fn new(store: S, owner: impl Into<String>) -> Self {
        Self {
            store: Arc::new(store),
            owner: owner.into(),
            view: Arc::new(Mutex::new(NotesView::default())),
            turns: Arc::new(RwLock::new(())),
        }
    }

    /// Fetch every note of the owner and replace both collections.
    pub async fn load(&self) -> Result<()> {
        let count = self
            .run(
                PendingOp::Load,
                self.store.list_notes(&self.owner),
                |view, notes: Vec<Note>| {
                    let count = notes.len();
                    view.replace_all(notes);
                    count
                },
            )
            .await?;
        tracing::info!("Loaded {} notes", count);
        Ok(())
    }

    /// Recompute the filtered collection. Never touches the store.
    pub async fn search(&self, term: &str) {
        self.view.lock().await.search(SearchTerm::new(term));
    }

    /// Create a note and put it at the front of the collections.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        reject_blank(&draft)?;
        let note = self
            .run(
                PendingOp::Create(draft.clone()),
                self.store.insert_note(&self.owner, &draft),
                |view, note: Note| {
                    view.prepend(note.clone());
                    note
                },
            )
            .await?;
        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    /// Replace title/content of `id`, stamping the local copy with the
    /// current time. Position in the collections is preserved.
    pub async fn edit(&self, id: NoteId, draft: NoteDraft) -> Result<()> {
        reject_blank(&draft)?;
        let found = self
            .run(
                PendingOp::Edit(id.clone(), draft.clone()),
                self.store.update_note(&id, &draft),
                |view, ()| view.apply_edit(&id, &draft, Utc::now()),
            )
            .await?;
        if found {
            tracing::info!("Updated note {}", id);
        } else {
            tracing::warn!("Updated note {} is not in the local collection", id);
        }
        Ok(())
    }

    /// Remove `id` remotely, then locally.
    pub async fn delete(&self, id: NoteId) -> Result<()> {
        let found = self
            .run(
                PendingOp::Delete(id.clone()),
                self.store.delete_note(&id),
                |view, ()| view.remove(&id),
            )
            .await?;
        if found {
            tracing::info!("Deleted note {}", id);
        } else {
            tracing::warn!("Deleted note {} was not in the local collection", id);
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> NotesSnapshot {
        self.view.lock().await.snapshot()
    }

    pub async fn is_pending(&self, op: &PendingOp) -> bool {
        self.view.lock().await.is_pending(op)
    }

    /// Forget all local notes and the search term.
    pub async fn reset(&self) {
        self.view.lock().await.clear();
    }

    async fn run<T, R>(
        &self,
        op: PendingOp,
        call: impl Future<Output = Result<T>>,
        apply: impl FnOnce(&mut NotesView, T) -> R,
    ) -> Result<R> {
        if !self.view.lock().await.begin(op.clone()) {
            tracing::warn!("Ignoring duplicate request to {}", op);
            return Err(Error::Busy(op.to_string()));
        }

        if op == PendingOp::Load {
            let _alone = self.turns.write().await;
            self.settle(&op, call.await, apply).await
        } else {
            let _shared = self.turns.read().await;
            self.settle(&op, call.await, apply).await
        }
    }

    async fn settle<T, R>(
        &self,
        op: &PendingOp,
        outcome: Result<T>,
        apply: impl FnOnce(&mut NotesView, T) -> R,
    ) -> Result<R> {
        let mut view = self.view.lock().await;
        view.finish(op);
        match outcome {
            Ok(value) => Ok(apply(&mut view, value)),
            Err(error) => {
                tracing::error!("Failed to {}: {}", op, error);
                Err(error)
            }
        }
    }
}

fn reject_blank(draft: &NoteDraft) -> Result<()> {
    if draft.is_blank() {
        return Err(Error::InvalidInput(
            "Note title and content are both empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNoteStore;

    #[tokio::test]
    async fn blank_drafts_never_reach_the_store() {
        let store = MemoryNoteStore::new();
        let controller = NotesController::new(store.clone(), "owner");

        let error = controller
            .create(NoteDraft::new("", "   "))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidInput(_)));

        let id = NoteId::parse("n1").unwrap();
        assert!(controller.edit(id, NoteDraft::new(" ", "")).await.is_err());
        assert_eq!(store.calls().await, 0);
    }

    #[tokio::test]
    async fn pending_key_is_released_after_failure() {
        let store = MemoryNoteStore::new();
        let controller = NotesController::new(store.clone(), "owner");

        store.fail_next("offline").await;
        assert!(controller.load().await.is_err());
        assert!(!controller.is_pending(&PendingOp::Load).await);
        assert!(controller.load().await.is_ok());
    }

    #[tokio::test]
    async fn reset_clears_notes_and_term() {
        let controller = NotesController::new(MemoryNoteStore::new(), "owner");
        controller.create(NoteDraft::new("t", "c")).await.unwrap();
        controller.search("t").await;

        controller.reset().await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.search_term.is_empty());
    }
}
