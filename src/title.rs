//! Auto-title inference.
//!
//! While the title is not locked, the workspace keeps deriving it from the
//! document's leading text. Pure function, bounded output.

use crate::markup;
use crate::model::UNTITLED_TITLE;

/// Upper bound on an inferred title, in characters (before the ellipsis).
pub const TITLE_MAX_CHARS: usize = 60;

const ELLIPSIS: char = '…';

/// Derive a title from the document's leading text: up to the first sentence
/// terminator or [`TITLE_MAX_CHARS`], whichever comes first. Returns `None`
/// when the markup holds no text at all.
pub fn infer_title(markup: &str) -> Option<String> {
    let text = markup::strip_tags(markup);
    if text.is_empty() {
        return None;
    }

    let chars: Vec<char> = text.chars().collect();

    if let Some(mut end) = chars.iter().position(|c| matches!(c, '.' | '!' | '?')) {
        // Take the whole terminator run, so "Wait..." keeps its dots
        while end + 1 < chars.len() && matches!(chars[end + 1], '.' | '!' | '?') {
            end += 1;
        }
        if end < TITLE_MAX_CHARS {
            return Some(chars[..=end].iter().collect::<String>().trim().to_string());
        }
    }

    if chars.len() <= TITLE_MAX_CHARS {
        return Some(text);
    }

    // Hard cut, then drop the trailing partial word and mark the truncation
    let cut: String = chars[..TITLE_MAX_CHARS].iter().collect();
    let mut head = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => cut[..idx].trim_end().to_string(),
        _ => cut,
    };
    head.push(ELLIPSIS);
    Some(head)
}

/// Like [`infer_title`], falling back to the untitled default.
pub fn infer_title_or_untitled(markup: &str) -> String {
    infer_title(markup).unwrap_or_else(|| UNTITLED_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_markup_has_no_title() {
        assert_eq!(infer_title(""), None);
        assert_eq!(infer_title("<p>   </p>"), None);
        assert_eq!(infer_title_or_untitled(""), UNTITLED_TITLE);
    }

    #[test]
    fn short_text_becomes_the_title() {
        assert_eq!(infer_title("<p>Meeting notes</p>"), Some("Meeting notes".into()));
    }

    #[test]
    fn stops_at_first_sentence() {
        assert_eq!(
            infer_title("<p>Hello world. The rest of the document continues.</p>"),
            Some("Hello world.".into())
        );
    }

    #[test]
    fn keeps_terminator_runs() {
        assert_eq!(infer_title("<p>Wait... there is more</p>"), Some("Wait...".into()));
    }

    #[test]
    fn truncates_long_text_on_a_word_boundary() {
        let markup = format!("<p>{}</p>", "alpha beta gamma delta ".repeat(10));
        let title = infer_title(&markup).unwrap();

        assert!(title.ends_with('…'));
        assert!(!title.trim_end_matches('…').ends_with(' '));
        // Never cuts a word in half: the part before the ellipsis is whole words
        let body = title.trim_end_matches('…');
        assert!("alpha beta gamma delta ".repeat(10).starts_with(&format!("{} ", body)));
    }

    #[test]
    fn inferred_title_is_bounded() {
        // One character of slack for the ellipsis marker
        let inputs = [
            "x".repeat(500),
            "word ".repeat(100),
            format!("{}?", "y".repeat(300)),
        ];
        for input in &inputs {
            let title = infer_title(input).unwrap();
            assert!(
                title.chars().count() <= TITLE_MAX_CHARS + 1,
                "title too long: {:?}",
                title
            );
        }
    }

    #[test]
    fn unbroken_text_is_hard_cut() {
        let title = infer_title(&"z".repeat(200)).unwrap();
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 1);
        assert!(title.ends_with('…'));
    }
}
