//! Live text metrics for the stats panel.
//!
//! [`compute_metrics`] is a pure function of the markup: no state, no clock,
//! identical input always yields identical output. It runs on every keystroke,
//! so it works on the stripped text in a single pass.

use crate::markup;

/// Assumed reading speed for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMetrics {
    pub words: usize,
    pub characters: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_time: String,
}

pub fn compute_metrics(markup: &str) -> TextMetrics {
    let text = markup::strip_tags(markup);

    let words = text.split_whitespace().count();
    let characters = text.chars().count();
    let sentences = if text.is_empty() {
        0
    } else {
        count_sentence_runs(&text).max(1)
    };
    let paragraphs = if text.is_empty() {
        0
    } else {
        markup::block_count(markup).max(1)
    };

    TextMetrics {
        words,
        characters,
        sentences,
        paragraphs,
        reading_time: reading_time(words),
    }
}

/// Maximal runs of sentence-terminal punctuation, so "Wait..." is one sentence.
fn count_sentence_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

fn reading_time(words: usize) -> String {
    if words < WORDS_PER_MINUTE {
        "< 1 min".to_string()
    } else {
        format!("{} min", words.div_ceil(WORDS_PER_MINUTE))
    }
}
