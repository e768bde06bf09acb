//! # Workspace Controller
//!
//! The entry point for the embedding shell. The [`Workspace`] routes raw edit
//! events into the repository's buffer immediately (so metrics and the
//! inferred title update on every keystroke) and defers reconciliation behind
//! per-stream debouncers, coalescing bursts of input into a single write.
//!
//! The shell drives time explicitly: it passes `Instant::now()` into the edit
//! events and calls [`tick`] from its event loop. Switching documents,
//! starting a new one and [`flush`] reconcile immediately instead — no edit is
//! ever lost to a cancelled timer.
//!
//! Teardown: the shell is expected to call [`flush`] before dropping the
//! workspace, so pending debounced edits reach storage.
//!
//! [`tick`]: Workspace::tick
//! [`flush`]: Workspace::flush

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::debounce::Debouncer;
use crate::metrics::{self, TextMetrics};
use crate::model::Theme;
use crate::repository::Repository;
use crate::store::{DocumentStore, KeyValueBackend};

/// Quiescence delay before a content edit is reconciled.
pub const CONTENT_DEBOUNCE: Duration = Duration::from_millis(600);

/// Quiescence delay before a title edit is reconciled.
pub const TITLE_DEBOUNCE: Duration = Duration::from_millis(400);

pub struct Workspace<B: KeyValueBackend> {
    repository: Repository<B>,
    content_debounce: Debouncer,
    title_debounce: Debouncer,
}

impl<B: KeyValueBackend> Workspace<B> {
    pub fn open(store: DocumentStore<B>) -> Self {
        Self {
            repository: Repository::open(store),
            content_debounce: Debouncer::new(CONTENT_DEBOUNCE),
            title_debounce: Debouncer::new(TITLE_DEBOUNCE),
        }
    }

    // --- Edit events ---

    /// The editing surface reported new markup.
    pub fn content_edited(&mut self, markup: &str, now: Instant) {
        self.repository.set_content(markup);
        self.content_debounce.trigger(now);
    }

    /// The user typed in the title field. Locks the title.
    pub fn title_edited(&mut self, text: &str, now: Instant) {
        self.repository.set_title(text);
        self.title_debounce.trigger(now);
    }

    /// The "auto title" action: back to inference.
    pub fn reset_title(&mut self, now: Instant) {
        self.repository.reset_title();
        self.title_debounce.trigger(now);
    }

    /// Fire any debouncer whose quiescence delay has elapsed. Reconciliation
    /// reads the buffer at fire time, never a stale snapshot. Returns whether
    /// a reconcile ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let content_due = self.content_debounce.fire_if_due(now);
        let title_due = self.title_debounce.fire_if_due(now);
        if content_due || title_due {
            self.repository.reconcile();
            true
        } else {
            false
        }
    }

    /// Reconcile immediately, superseding any pending debounced write. Call on
    /// teardown.
    pub fn flush(&mut self) {
        self.cancel_pending();
        self.repository.reconcile();
    }

    pub fn has_pending_edits(&self) -> bool {
        self.content_debounce.is_pending() || self.title_debounce.is_pending()
    }

    // --- Document management ---

    /// Save pending edits and open another document.
    pub fn select(&mut self, id: Uuid) {
        self.repository.select(id);
        self.cancel_pending();
    }

    /// Save pending edits and start an empty draft.
    pub fn new_document(&mut self) {
        self.repository.reconcile();
        self.repository.start_fresh();
        self.cancel_pending();
    }

    pub fn delete(&mut self, id: Uuid) {
        let was_current = self.repository.current_id() == Some(id);
        self.repository.delete(id);
        if was_current {
            // The buffer was replaced; pending timers refer to discarded edits
            self.cancel_pending();
        }
    }

    pub fn duplicate(&mut self, id: Uuid) {
        self.repository.duplicate(id);
    }

    pub fn snapshot(&mut self) {
        self.repository.snapshot();
    }

    // --- Derived data ---

    /// Live metrics of the edit buffer, recomputed synchronously on request.
    pub fn metrics(&self) -> TextMetrics {
        metrics::compute_metrics(self.repository.content())
    }

    pub fn theme(&self) -> Option<Theme> {
        self.repository.theme()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.repository.set_theme(theme);
    }

    // --- Accessors ---

    pub fn repository(&self) -> &Repository<B> {
        &self.repository
    }

    pub fn title(&self) -> &str {
        self.repository.title()
    }

    pub fn content(&self) -> &str {
        self.repository.content()
    }

    pub fn title_locked(&self) -> bool {
        self.repository.title_locked()
    }

    pub fn current_id(&self) -> Option<Uuid> {
        self.repository.current_id()
    }

    fn cancel_pending(&mut self) {
        self.content_debounce.cancel();
        self.title_debounce.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryBackend;

    fn workspace() -> Workspace<MemoryBackend> {
        Workspace::open(DocumentStore::new(MemoryBackend::new()))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn burst_of_edits_coalesces_into_one_write() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>H</p>", start);
        ws.content_edited("<p>He</p>", start + ms(100));
        ws.content_edited("<p>Hello.</p>", start + ms(200));

        // Quiescent for less than the delay: nothing reconciled yet
        assert!(!ws.tick(start + ms(700)));
        assert!(ws.repository().documents().is_empty());

        // Past the deadline of the last edit: one reconcile, latest value
        assert!(ws.tick(start + ms(800)));
        assert_eq!(ws.repository().documents().len(), 1);
        assert_eq!(ws.repository().documents()[0].content, "<p>Hello.</p>");

        // Fired once: nothing further
        assert!(!ws.tick(start + ms(5000)));
    }

    #[test]
    fn title_edits_use_their_own_shorter_delay() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.title_edited("Plan", start);
        assert!(!ws.tick(start + ms(300)));
        assert!(ws.tick(start + ms(400)));

        let docs = ws.repository().documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Plan");
        assert!(docs[0].title_locked);
    }

    #[test]
    fn reconcile_sees_buffer_state_at_fire_time() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>Something.</p>", start);
        ws.title_edited("Named", start);

        // Title debouncer fires first (400ms); the content edit made at t0 is
        // still in the buffer and gets written along with it
        assert!(ws.tick(start + ms(450)));
        let docs = ws.repository().documents();
        assert_eq!(docs[0].title, "Named");
        assert_eq!(docs[0].content, "<p>Something.</p>");
    }

    #[test]
    fn select_saves_pending_edits_and_cancels_timers() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>Doc A.</p>", start);
        ws.flush();
        let a = ws.current_id().unwrap();

        ws.new_document();
        ws.content_edited("<p>Doc B.</p>", start);
        ws.flush();
        let b = ws.current_id().unwrap();

        ws.content_edited("<p>Doc B edited.</p>", start + ms(100));
        assert!(ws.has_pending_edits());
        ws.select(a);

        assert!(!ws.has_pending_edits());
        assert_eq!(ws.current_id(), Some(a));
        let b_record = ws
            .repository()
            .documents()
            .iter()
            .find(|d| d.id == b)
            .unwrap();
        assert_eq!(b_record.content, "<p>Doc B edited.</p>");

        // A late tick does not spuriously reconcile
        assert!(!ws.tick(start + ms(10_000)));
    }

    #[test]
    fn new_document_saves_outgoing_edits() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>Keep this.</p>", start);
        ws.new_document();

        assert_eq!(ws.current_id(), None);
        assert_eq!(ws.content(), "");
        assert_eq!(ws.repository().documents().len(), 1);
        assert_eq!(ws.repository().documents()[0].content, "<p>Keep this.</p>");
    }

    #[test]
    fn flush_writes_immediately() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>Teardown.</p>", start);
        ws.flush();

        assert!(!ws.has_pending_edits());
        assert_eq!(ws.repository().documents().len(), 1);
    }

    #[test]
    fn deleting_current_document_discards_its_pending_edits() {
        let start = Instant::now();
        let mut ws = workspace();

        ws.content_edited("<p>Doc.</p>", start);
        ws.flush();
        let id = ws.current_id().unwrap();

        ws.content_edited("<p>Edit that will be deleted.</p>", start + ms(50));
        ws.delete(id);

        assert!(ws.repository().documents().is_empty());
        assert_eq!(ws.current_id(), None);
        // The stale timer is gone; a tick recreates nothing
        assert!(!ws.tick(start + ms(10_000)));
        assert!(ws.repository().documents().is_empty());
    }

    #[test]
    fn metrics_track_the_live_buffer() {
        let start = Instant::now();
        let mut ws = workspace();
        assert_eq!(ws.metrics().words, 0);

        // No tick needed: metrics are live, not debounced
        ws.content_edited("<p>Three little words.</p>", start);
        assert_eq!(ws.metrics().words, 3);
    }

    #[test]
    fn theme_passthrough() {
        let mut ws = workspace();
        assert_eq!(ws.theme(), None);
        ws.set_theme(Theme::Light);
        assert_eq!(ws.theme(), Some(Theme::Light));
    }
}
