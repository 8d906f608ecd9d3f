//! Local editor buffer. Knows nothing about persistence.

use crate::models::NoteDraft;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    title: String,
    content: String,
}

impl EditorBuffer {
    #[must_use]
    pub fn seeded(initial: NoteDraft) -> Self {
        Self {
            title: initial.title,
            content: initial.content,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Empty both fields.
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }

    /// The payload handed to the save callback, fields untrimmed.
    #[must_use]
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft::new(self.title.clone(), self.content.clone())
    }
}
