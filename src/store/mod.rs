//! # Storage Layer
//!
//! This module defines the persistence abstraction for the workspace. The
//! [`KeyValueBackend`] trait models the host's key-value store (the browser's
//! local storage, a directory of files, a hash map in tests), and
//! [`DocumentStore`] is the gateway the repository talks to.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with [`memory::MemoryBackend`] (no filesystem needed)
//! - Allow **other hosts** (wasm shim over local storage, desktop files)
//!   without changing core logic
//!
//! ## Failure posture
//!
//! The workspace must never be blocked by its storage (a corrupt entry, a full
//! quota). [`DocumentStore`] therefore absorbs every failure:
//! - loads fall back to empty state,
//! - saves are best-effort, no retry.
//!
//! Both paths emit `log::warn!` so embedders and tests can observe what was
//! swallowed.
//!
//! ## Stored layout
//!
//! Two independent keys:
//! - [`DOCUMENTS_KEY`]: a JSON array of document records (`id`, `title`,
//!   `content`, `updatedAt` in epoch millis, `titleLocked`)
//! - [`THEME_KEY`]: the bare theme string, `"light"` or `"dark"`
//!
//! There is no schema versioning beyond the key suffix; any shape mismatch is
//! treated as absent data.

use std::str::FromStr;

use log::warn;

use crate::error::Result;
use crate::model::{DocumentRecord, Theme};

pub mod fs;
pub mod memory;

/// Key under which the whole document collection is serialized.
pub const DOCUMENTS_KEY: &str = "draftdesk-documents-v1";

/// Key for the theme preference, independent lifecycle from the documents.
pub const THEME_KEY: &str = "draftdesk-theme";

/// Abstract interface over the host's key-value store.
pub trait KeyValueBackend {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value (create or overwrite).
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Persistence gateway for the document collection and theme preference.
pub struct DocumentStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> DocumentStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Load the stored collection, most recently touched first. Missing key,
    /// unreadable backend and malformed payload all yield an empty collection.
    pub fn load_documents(&self) -> Vec<DocumentRecord> {
        let raw = match self.backend.get(DOCUMENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("could not read stored documents, starting empty: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<DocumentRecord>>(&raw) {
            Ok(mut documents) => {
                documents.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                documents
            }
            Err(err) => {
                warn!("stored documents are malformed, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    /// Serialize the whole collection under [`DOCUMENTS_KEY`]. Best-effort:
    /// failures are logged and swallowed, never retried.
    pub fn save_documents(&mut self, documents: &[DocumentRecord]) {
        if let Err(err) = self.try_save_documents(documents) {
            warn!("document save failed (best-effort, not retried): {}", err);
        }
    }

    /// The fallible save path; serialization failures surface as
    /// [`crate::error::WorkspaceError::Serialization`], backend failures as
    /// whatever the backend reports.
    fn try_save_documents(&mut self, documents: &[DocumentRecord]) -> Result<()> {
        let payload = serde_json::to_string(documents)?;
        self.backend.set(DOCUMENTS_KEY, &payload)
    }

    pub fn load_theme(&self) -> Option<Theme> {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::from_str(raw.trim()).ok(),
            Ok(None) => None,
            Err(err) => {
                warn!("could not read theme preference: {}", err);
                None
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) {
        if let Err(err) = self.backend.set(THEME_KEY, theme.as_str()) {
            warn!("theme save failed (best-effort): {}", err);
        }
    }
}
