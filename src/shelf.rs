//! Display listing for the document shelf sidebar.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::markup;
use crate::repository::Repository;
use crate::store::KeyValueBackend;

/// Character bound on a row's content preview.
const PREVIEW_MAX_CHARS: usize = 80;

const EMPTY_PREVIEW: &str = "Empty document";

/// One row of the shelf: identity, title, a content preview and a human
/// "edited … ago" string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfEntry {
    pub id: Uuid,
    pub title: String,
    pub preview: String,
    pub updated_at: DateTime<Utc>,
    pub edited: String,
    pub is_current: bool,
}

/// Entries in collection order (most recently touched first). `now` comes from
/// the caller so rendering is deterministic under test.
pub fn shelf_entries<B: KeyValueBackend>(
    repository: &Repository<B>,
    now: DateTime<Utc>,
) -> Vec<ShelfEntry> {
    let formatter = timeago::Formatter::new();
    repository
        .documents()
        .iter()
        .map(|record| {
            // Clock skew can put updated_at in the future; clamp to "now"
            let elapsed = (now - record.updated_at).to_std().unwrap_or_default();
            ShelfEntry {
                id: record.id,
                title: record.title.clone(),
                preview: preview(&record.content),
                updated_at: record.updated_at,
                edited: formatter.convert(elapsed),
                is_current: repository.current_id() == Some(record.id),
            }
        })
        .collect()
}

/// Stripped leading text of a document, bounded for a single shelf row.
fn preview(content: &str) -> String {
    let text = markup::strip_tags(content);
    if text.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    if text.chars().count() > PREVIEW_MAX_CHARS {
        let head: String = text.chars().take(PREVIEW_MAX_CHARS - 3).collect();
        format!("{}…", head)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryBackend;
    use crate::store::DocumentStore;
    use chrono::Duration;

    fn repo() -> Repository<MemoryBackend> {
        Repository::open(DocumentStore::new(MemoryBackend::new()))
    }

    #[test]
    fn entries_follow_collection_order_and_mark_current() {
        let mut repo = repo();
        repo.set_content("<p>Older.</p>");
        repo.reconcile();

        repo.start_fresh();
        repo.set_content("<p>Newer.</p>");
        repo.reconcile();
        let current = repo.current_id().unwrap();

        let entries = shelf_entries(&repo, Utc::now());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, current);
        assert!(entries[0].is_current);
        assert!(!entries[1].is_current);
        assert_eq!(entries[1].title, "Older.");
    }

    #[test]
    fn previews_strip_markup_and_stay_bounded() {
        let mut repo = repo();
        repo.set_content("<p>Short <b>and</b> sweet.</p>");
        repo.reconcile();

        repo.start_fresh();
        let long = format!("<p>{}</p>", "lorem ipsum ".repeat(20));
        repo.set_content(&long);
        repo.reconcile();

        let entries = shelf_entries(&repo, Utc::now());
        assert_eq!(entries[1].preview, "Short and sweet.");

        let bounded = &entries[0].preview;
        assert_eq!(bounded.chars().count(), 78);
        assert!(bounded.ends_with('…'));
        assert!(bounded.starts_with("lorem ipsum"));
    }

    #[test]
    fn content_free_documents_preview_as_empty() {
        let mut repo = repo();
        repo.set_title("Placeholder");
        repo.reconcile();

        let entries = shelf_entries(&repo, Utc::now());
        assert_eq!(entries[0].preview, "Empty document");
    }

    #[test]
    fn edited_strings_are_relative_to_now() {
        let mut repo = repo();
        repo.set_content("<p>Doc.</p>");
        repo.reconcile();

        let later = repo.documents()[0].updated_at + Duration::minutes(5);
        let entries = shelf_entries(&repo, later);
        assert_eq!(entries[0].edited, "5 minutes ago");
    }

    #[test]
    fn future_timestamps_clamp_to_now() {
        let mut repo = repo();
        repo.set_content("<p>Doc.</p>");
        repo.reconcile();

        let earlier = repo.documents()[0].updated_at - Duration::minutes(5);
        let entries = shelf_entries(&repo, earlier);
        assert_eq!(entries[0].edited, "now");
    }
}
