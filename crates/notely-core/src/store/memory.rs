//! In-process note store used by tests.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};
use uuid::Uuid;

use super::NoteStore;
use crate::models::{Note, NoteDraft, NoteId};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<(String, Note)>,
    calls: usize,
    fail_next: Option<String>,
}

/// Keeps every store call waiting until dropped.
pub type StoreHold = OwnedRwLockWriteGuard<()>;

/// Note store backed by a vector behind an async mutex.
///
/// Clones share the same rows. Counts calls and can inject a one-shot
/// failure so callers can observe "no remote call" and error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryNoteStore {
    inner: Arc<Mutex<Inner>>,
    gate: Arc<RwLock<()>>,
}

impl MemoryNoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note for `owner` without counting it as a call.
    pub async fn seed(&self, owner: &str, note: Note) {
        self.inner.lock().await.rows.push((owner.to_string(), note));
    }

    /// Number of store operations performed so far.
    pub async fn calls(&self) -> usize {
        self.inner.lock().await.calls
    }

    /// Make the next operation fail with a remote error.
    pub async fn fail_next(&self, message: impl Into<String>) {
        self.inner.lock().await.fail_next = Some(message.into());
    }

    /// Block all operations until the returned guard is dropped.
    pub async fn hold(&self) -> StoreHold {
        Arc::clone(&self.gate).write_owned().await
    }

    /// Current rows of `owner` in insertion order.
    pub async fn rows_for(&self, owner: &str) -> Vec<Note> {
        self.inner
            .lock()
            .await
            .rows
            .iter()
            .filter(|(row_owner, _)| row_owner == owner)
            .map(|(_, note)| note.clone())
            .collect()
    }

    async fn begin_call(&self) -> Result<()> {
        let _pass = self.gate.read().await;
        let mut inner = self.inner.lock().await;
        inner.calls += 1;
        match inner.fail_next.take() {
            Some(message) => Err(Error::Remote(message)),
            None => Ok(()),
        }
    }
}

impl NoteStore for MemoryNoteStore {
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>> {
        self.begin_call().await?;
        let mut notes = self.rows_for(owner).await;
        notes.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        Ok(notes)
    }

    async fn insert_note(&self, owner: &str, draft: &NoteDraft) -> Result<Note> {
        self.begin_call().await?;
        let note = Note {
            id: NoteId::parse(Uuid::now_v7().to_string())?,
            title: draft.title.clone(),
            content: draft.content.clone(),
            last_modified: Utc::now(),
        };
        self.inner
            .lock()
            .await
            .rows
            .push((owner.to_string(), note.clone()));
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> Result<()> {
        self.begin_call().await?;
        let mut inner = self.inner.lock().await;
        let (_, note) = inner
            .rows
            .iter_mut()
            .find(|(_, note)| &note.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        note.apply_draft(draft, Utc::now());
        Ok(())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.begin_call().await?;
        let mut inner = self.inner.lock().await;
        let before = inner.rows.len();
        inner.rows.retain(|(_, note)| &note.id != id);
        if inner.rows.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn note(id: &str, minutes_ago: i64) -> Note {
        Note {
            id: NoteId::parse(id).unwrap(),
            title: id.to_string(),
            content: String::new(),
            last_modified: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_and_newest_first() {
        let store = MemoryNoteStore::new();
        store.seed("alice", note("old", 10)).await;
        store.seed("alice", note("new", 1)).await;
        store.seed("bob", note("other", 0)).await;

        let notes = store.list_notes("alice").await.unwrap();
        let ids: Vec<_> = notes.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(store.calls().await, 1);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryNoteStore::new();
        let id = NoteId::parse("ghost").unwrap();
        assert!(matches!(
            store.delete_note(&id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.update_note(&id, &NoteDraft::new("t", "c")).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let store = MemoryNoteStore::new();
        store.fail_next("boom").await;
        assert!(store.list_notes("alice").await.is_err());
        assert!(store.list_notes("alice").await.is_ok());
    }
}
