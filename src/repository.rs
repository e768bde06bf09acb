//! # Document Repository
//!
//! Owns the document collection and the in-progress edit buffer, and keeps
//! both reconciled with the persistence gateway.
//!
//! ## The reconciliation model
//!
//! Edits land in the buffer immediately (live metrics and title inference read
//! from it), but only [`reconcile`] merges the buffer into the collection:
//!
//! - With no current document, a record is created **lazily** — an empty,
//!   untitled, unlocked draft is never persisted.
//! - With a current document, reconcile is insert-or-update: a record missing
//!   from the collection (deleted from under us) is re-inserted under the same
//!   id rather than treated as fatal, and an unchanged buffer is a no-op that
//!   leaves `updated_at` untouched.
//! - Any insert or update moves the affected record to the front, so the
//!   collection is always ordered most-recently-touched first.
//!
//! Every mutation persists the whole collection in the same synchronous call,
//! strictly after the in-memory change, so stored state never reflects a torn
//! collection. Persistence itself is best-effort (see [`crate::store`]).
//!
//! [`reconcile`]: Repository::reconcile

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::markup;
use crate::model::{DocumentRecord, Theme, UNTITLED_TITLE};
use crate::store::{DocumentStore, KeyValueBackend};
use crate::title;

pub struct Repository<B: KeyValueBackend> {
    store: DocumentStore<B>,
    documents: Vec<DocumentRecord>,
    current_id: Option<Uuid>,
    buffer_title: String,
    buffer_content: String,
    title_locked: bool,
}

impl<B: KeyValueBackend> Repository<B> {
    /// Load the stored collection and open its most recently touched record,
    /// or start with a fresh draft when nothing is stored.
    pub fn open(store: DocumentStore<B>) -> Self {
        let documents = store.load_documents();
        let mut repository = Self {
            store,
            documents,
            current_id: None,
            buffer_title: UNTITLED_TITLE.to_string(),
            buffer_content: String::new(),
            title_locked: false,
        };
        if let Some(front) = repository.documents.first().cloned() {
            repository.load_into_buffer(&front);
        }
        repository
    }

    // --- Edit buffer ---

    /// Record a content edit. While the title is unlocked it tracks the
    /// inferred title of the new content.
    pub fn set_content(&mut self, markup: &str) {
        self.buffer_content = markup.to_string();
        if !self.title_locked {
            if let Some(auto) = title::infer_title(markup) {
                if auto != self.buffer_title {
                    self.buffer_title = auto;
                }
            }
        }
    }

    /// Record a manual title edit. Locks the title against inference.
    pub fn set_title(&mut self, text: &str) {
        self.buffer_title = text.to_string();
        self.title_locked = true;
    }

    /// Drop the manual title and fall back to inference.
    pub fn reset_title(&mut self) {
        self.buffer_title = title::infer_title_or_untitled(&self.buffer_content);
        self.title_locked = false;
    }

    // --- Collection operations ---

    /// Merge the edit buffer into the collection (insert-or-update) and
    /// persist. Safe to call at any time; unchanged buffers are a no-op.
    pub fn reconcile(&mut self) {
        let resolved_title = self.resolved_title();

        let Some(current_id) = self.current_id else {
            // Lazy creation: skip while the draft is still empty and untouched
            let text = markup::strip_tags(&self.buffer_content);
            if !self.title_locked && text.is_empty() && resolved_title == UNTITLED_TITLE {
                return;
            }
            let record = DocumentRecord::new(
                resolved_title,
                self.buffer_content.clone(),
                self.title_locked,
            );
            debug!("created document {}", record.id);
            self.current_id = Some(record.id);
            self.documents.insert(0, record);
            self.persist();
            return;
        };

        match self.documents.iter().position(|d| d.id == current_id) {
            None => {
                // The current record vanished from the collection (deleted
                // concurrently). Recoverable: re-insert under the same id.
                debug!("current document {} missing, re-inserting", current_id);
                let mut record = DocumentRecord::new(
                    resolved_title,
                    self.buffer_content.clone(),
                    self.title_locked,
                );
                record.id = current_id;
                self.documents.insert(0, record);
                self.persist();
            }
            Some(index) => {
                let existing = &self.documents[index];
                if existing.content == self.buffer_content
                    && existing.title == resolved_title
                    && existing.title_locked == self.title_locked
                {
                    // Identical buffer: no write, updated_at untouched
                    return;
                }
                let mut record = self.documents.remove(index);
                record.title = resolved_title;
                record.content = self.buffer_content.clone();
                record.title_locked = self.title_locked;
                record.updated_at = Utc::now();
                self.documents.insert(0, record);
                self.persist();
            }
        }
    }

    /// Make another record current. Pending edits of the outgoing document are
    /// reconciled first, so switching never loses work. No-op when the id is
    /// already current or unknown.
    pub fn select(&mut self, id: Uuid) {
        if self.current_id == Some(id) {
            return;
        }
        self.reconcile();
        if let Some(record) = self.documents.iter().find(|d| d.id == id).cloned() {
            self.load_into_buffer(&record);
        }
    }

    /// Remove a record. When the current one is deleted, the new front of the
    /// collection takes over, or the workspace resets to a fresh draft.
    pub fn delete(&mut self, id: Uuid) {
        let len_before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        if self.documents.len() == len_before {
            return;
        }
        if self.current_id == Some(id) {
            if let Some(front) = self.documents.first().cloned() {
                self.load_into_buffer(&front);
            } else {
                self.start_fresh();
            }
        }
        self.persist();
    }

    /// Copy a stored record under a fresh id with a `" (copy)"` title suffix.
    /// The copy is inserted at the front; the current document is unchanged.
    pub fn duplicate(&mut self, id: Uuid) {
        let Some(original) = self.documents.iter().find(|d| d.id == id) else {
            return;
        };
        let copy = original.derived_copy(" (copy)");
        self.documents.insert(0, copy);
        self.persist();
    }

    /// Freeze the edit buffer as a new `" (snapshot)"` record. Requires a
    /// current document; the current document itself is unchanged.
    pub fn snapshot(&mut self) {
        if self.current_id.is_none() {
            return;
        }
        let snapshot = DocumentRecord::new(
            format!("{} (snapshot)", self.buffer_title),
            self.buffer_content.clone(),
            true,
        );
        self.documents.insert(0, snapshot);
        self.persist();
    }

    /// Clear the current document and reset the buffer to an empty, untitled,
    /// unlocked draft. The collection is untouched.
    pub fn start_fresh(&mut self) {
        self.current_id = None;
        self.buffer_title = UNTITLED_TITLE.to_string();
        self.buffer_content = String::new();
        self.title_locked = false;
    }

    // --- Theme preference (independent lifecycle) ---

    pub fn theme(&self) -> Option<Theme> {
        self.store.load_theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.store.save_theme(theme);
    }

    // --- Accessors ---

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn current_id(&self) -> Option<Uuid> {
        self.current_id
    }

    pub fn title(&self) -> &str {
        &self.buffer_title
    }

    pub fn content(&self) -> &str {
        &self.buffer_content
    }

    pub fn title_locked(&self) -> bool {
        self.title_locked
    }

    // --- Internals ---

    fn load_into_buffer(&mut self, record: &DocumentRecord) {
        self.current_id = Some(record.id);
        self.buffer_title = record.title.clone();
        self.buffer_content = record.content.clone();
        self.title_locked = record.title_locked;
    }

    /// The title a reconciled record ends up with: an explicit locked title
    /// wins, then inference, then whatever non-empty title the buffer holds,
    /// then the untitled default.
    fn resolved_title(&self) -> String {
        if self.title_locked && !self.buffer_title.is_empty() {
            return self.buffer_title.clone();
        }
        title::infer_title(&self.buffer_content).unwrap_or_else(|| {
            if self.buffer_title.trim().is_empty() {
                UNTITLED_TITLE.to_string()
            } else {
                self.buffer_title.clone()
            }
        })
    }

    fn persist(&mut self) {
        self.store.save_documents(&self.documents);
    }
}
