//! notely-core - Core library for Notely
//!
//! This crate contains the note model, the remote note store, Supabase auth,
//! and the UI-independent view logic used by the Notely desktop app.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod store;
pub mod util;
pub mod view;

pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NoteId};
