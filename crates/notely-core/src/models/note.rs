//! Note model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque identifier assigned to a note by the remote store.
///
/// Never empty: construction goes through [`NoteId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Parse a store-assigned identifier, rejecting blank values.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Note id must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NoteId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<NoteId> for String {
    fn from(value: NoteId) -> Self {
        value.0
    }
}

const UNTITLED_NOTE: &str = "Untitled Note";

/// A note owned by the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: NoteId,
    /// Title, may be empty
    pub title: String,
    /// Plain text body, may be empty
    pub content: String,
    /// Last modification time
    pub last_modified: DateTime<Utc>,
}

impl Note {
    /// Title for display; blank titles read as "Untitled Note".
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_NOTE
        } else {
            &self.title
        }
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches.
    #[must_use]
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }

    /// Replace title/content from a draft and stamp the modification time.
    pub fn apply_draft(&mut self, draft: &NoteDraft, modified_at: DateTime<Utc>) {
        self.title.clone_from(&draft.title);
        self.content.clone_from(&draft.content);
        self.last_modified = modified_at;
    }

    /// First `max_len` characters of the content on a single line.
    #[must_use]
    pub fn content_preview(&self, max_len: usize) -> String {
        self.content
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(max_len)
            .collect()
    }
}

/// The `{title, content}` payload an editor produces on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Both fields are empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: NoteId::parse("n1").unwrap(),
            title: title.to_string(),
            content: content.to_string(),
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn note_id_rejects_blank() {
        assert!(NoteId::parse("").is_err());
        assert!(NoteId::parse("   ").is_err());
        assert_eq!(NoteId::parse(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn note_id_deserialize_rejects_blank() {
        let parsed: std::result::Result<NoteId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: NoteId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(parsed.to_string(), "42");
    }

    #[test]
    fn matches_title_or_content_case_insensitively() {
        let note = note("Groceries", "Buy MILK and eggs");
        assert!(note.matches_lowercase("grocer"));
        assert!(note.matches_lowercase("milk"));
        assert!(note.matches_lowercase(""));
        assert!(!note.matches_lowercase("bread"));
    }

    #[test]
    fn draft_blankness_ignores_whitespace() {
        assert!(NoteDraft::new("", "   ").is_blank());
        assert!(NoteDraft::new("\t", "\n").is_blank());
        assert!(!NoteDraft::new("", " x ").is_blank());
        assert!(!NoteDraft::new("title", "").is_blank());
    }

    #[test]
    fn apply_draft_keeps_id() {
        let mut note = note("old", "old body");
        let stamp = Utc::now();
        note.apply_draft(&NoteDraft::new("new", "new body"), stamp);
        assert_eq!(note.id.as_str(), "n1");
        assert_eq!(note.title, "new");
        assert_eq!(note.content, "new body");
        assert_eq!(note.last_modified, stamp);
    }

    #[test]
    fn content_preview_flattens_lines() {
        let note = note("t", "first line\nsecond   line");
        assert_eq!(note.content_preview(100), "first line second line");
        assert_eq!(note.content_preview(5), "first");
    }

    #[test]
    fn blank_title_displays_placeholder() {
        assert_eq!(note("  ", "body").display_title(), "Untitled Note");
        assert_eq!(note("Plans", "").display_title(), "Plans");
    }
}
