//! Helpers for treating document markup as text.
//!
//! The workspace never builds a DOM — documents are opaque markup strings and
//! everything here is a single forward scan. That is deliberate: the editing
//! surface owns the markup's structure, this crate only needs the text out of
//! it for metrics, title inference and plain-text export.

/// Tags whose closing boundary ends a block of text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote", "pre",
];

/// Strip all tags, collapse whitespace, trim. The text used for word counts
/// and title inference.
///
/// Block boundaries and `<br>` become a word separator; inline tags vanish
/// entirely, so `<b>world</b>.` keeps its punctuation attached.
pub fn strip_tags(markup: &str) -> String {
    let mut flat = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        flat.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                if is_block_boundary(&after[..end]) {
                    flat.push(' ');
                }
                rest = &after[end + 1..];
            }
            // Unterminated tag: drop the rest of the input
            None => {
                rest = "";
            }
        }
    }
    flat.push_str(rest);
    collapse_whitespace(&flat)
}

/// Render markup as plain text for export: block boundaries become newlines,
/// common entities are decoded, runs of blank lines are collapsed.
pub fn to_plain_text(markup: &str) -> String {
    let mut flat = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        flat.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                let tag = &after[..end];
                if is_line_break(tag) {
                    flat.push('\n');
                } else if is_block_boundary(tag) {
                    flat.push(' ');
                }
                rest = &after[end + 1..];
            }
            // Unterminated tag: drop the rest of the input
            None => {
                rest = "";
            }
        }
    }
    flat.push_str(rest);

    let decoded = decode_entities(&flat);
    let mut lines = Vec::new();
    let mut last_blank = true;
    for line in decoded.lines() {
        let line = collapse_whitespace(line);
        if line.is_empty() {
            if !last_blank {
                lines.push(line);
                last_blank = true;
            }
        } else {
            lines.push(line);
            last_blank = false;
        }
    }
    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }
    lines.join("\n")
}

/// Number of block-level text separations in the markup. Zero when the markup
/// carries no block tags at all (bare text).
pub fn block_count(markup: &str) -> usize {
    let mut count = 0;
    let mut rest = markup;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) => {
                let tag = &after[..end];
                if !tag.starts_with('/') && BLOCK_TAGS.contains(&tag_name(tag).as_str()) {
                    count += 1;
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    count
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn is_line_break(tag: &str) -> bool {
    let name = tag_name(tag);
    name == "br" || (tag.starts_with('/') && BLOCK_TAGS.contains(&name.as_str()))
}

/// True for tags that separate runs of text: block openers and closers, and
/// `<br>`. Inline tags (`<b>`, `<a href=…>`, …) are not boundaries.
fn is_block_boundary(tag: &str) -> bool {
    let name = tag_name(tag);
    name == "br" || BLOCK_TAGS.contains(&name.as_str())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    // &amp; last so already-decoded ampersands are not expanded twice
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
