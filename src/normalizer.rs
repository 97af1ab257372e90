//! Text normalisation into sentence and paragraph streams.
//!
//! Both streams are derived independently from the raw extracted text.

use lazy_static::lazy_static;
use regex::Regex;

/// Sentences this short (after trimming) are treated as noise.
const MIN_SENTENCE_CHARS: usize = 10;

/// Paragraphs this short (after trimming) are treated as noise.
const MIN_PARAGRAPH_CHARS: usize = 20;

lazy_static! {
    static ref CARRIAGE_RETURNS: Regex = Regex::new(r"\r\n|\r").unwrap();
    static ref LINE_BREAKS: Regex = Regex::new(r"\n+").unwrap();
    static ref PERIOD_RUNS: Regex = Regex::new(r"\.+").unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
}

/// Split raw text into an ordered stream of trimmed sentences.
///
/// Line breaks are folded into spaces, runs of periods and whitespace are
/// collapsed, and the result is split on `". "`. Fragments of 10 characters
/// or fewer are discarded.
pub fn sentences(raw: &str) -> Vec<String> {
    let text = CARRIAGE_RETURNS.replace_all(raw, "\n");
    let text = LINE_BREAKS.replace_all(&text, " ");
    let text = PERIOD_RUNS.replace_all(&text, ".");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");

    text.split(". ")
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Split raw text into an ordered stream of trimmed lines.
///
/// Lines of 20 characters or fewer are discarded.
pub fn paragraphs(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|paragraph| paragraph.chars().count() > MIN_PARAGRAPH_CHARS)
        .map(str::to_string)
        .collect()
}
