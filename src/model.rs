use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a document before anything can be inferred from its content.
pub const UNTITLED_TITLE: &str = "Untitled document";

/// One saved document in the workspace.
///
/// `content` is an opaque markup string — the workspace never parses it beyond
/// stripping tags for metrics and title inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    // Epoch milliseconds on the wire, matching the stored layout
    #[serde(with = "chrono::serde::ts_milliseconds", rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    // Defaults to false so older entries without the field still load
    #[serde(default, rename = "titleLocked")]
    pub title_locked: bool,
}

impl DocumentRecord {
    pub fn new(title: String, content: String, title_locked: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            updated_at: Utc::now(),
            title_locked,
        }
    }

    /// A fresh record carrying this one's content under a suffixed, locked
    /// title, so inference never silently renames the copy.
    pub fn derived_copy(&self, title_suffix: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: format!("{}{}", self.title, title_suffix),
            content: self.content.clone(),
            updated_at: Utc::now(),
            title_locked: true,
        }
    }
}

/// Workspace color theme, persisted independently of the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}
