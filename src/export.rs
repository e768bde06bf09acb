//! Export rendering and filename derivation.
//!
//! The library renders the bytes and derives the filename; actually delivering
//! the download (or writing the file) belongs to the embedding shell, which
//! points [`write_export`] at whatever sink it owns.

use std::io::Write;

use crate::error::Result;
use crate::markup;

/// Maximum length of a derived filename stem, in characters.
const FILENAME_MAX_CHARS: usize = 60;

const FALLBACK_STEM: &str = "untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tags stripped, block boundaries as newlines.
    Text,
    /// The raw markup, byte for byte.
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }
}

/// Render the document body for the given format.
pub fn render(document_markup: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Text => markup::to_plain_text(document_markup),
        ExportFormat::Html => document_markup.to_string(),
    }
}

/// Derive a download filename from the document title: non-alphanumeric runs
/// collapse to a single `-`, bounded length, extension appended.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    format!("{}.{}", sanitize_stem(title), format.extension())
}

/// Render the document into a sink.
pub fn write_export<W: Write>(
    writer: &mut W,
    document_markup: &str,
    format: ExportFormat,
) -> Result<()> {
    writer.write_all(render(document_markup, format).as_bytes())?;
    Ok(())
}

fn sanitize_stem(title: &str) -> String {
    let mut stem = String::new();
    let mut len = 0;
    let mut pending_separator = false;
    for c in title.chars() {
        if len == FILENAME_MAX_CHARS {
            break;
        }
        if c.is_alphanumeric() {
            if pending_separator && len > 0 {
                stem.push('-');
                len += 1;
                if len == FILENAME_MAX_CHARS {
                    break;
                }
            }
            pending_separator = false;
            stem.push(c);
            len += 1;
        } else {
            pending_separator = true;
        }
    }
    let stem = stem.trim_end_matches('-');
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}
