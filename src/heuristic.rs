//! Deterministic summarisation without an LLM.
//!
//! The summary samples sentences by position (opening, middle, near the
//! end) and then fills up to a soft character bound. Key points favour
//! paragraphs containing trigger words, topped up with the first and last
//! paragraphs and then evenly spaced ones.

use crate::normalizer;
use crate::pipeline::{SummarizeError, Summarizer, SummaryOptions};
use crate::summary::Summary;
use async_trait::async_trait;

/// Paragraphs containing any of these (case-sensitive) are key-point candidates.
pub const TRIGGER_WORDS: [&str; 7] = [
    "key",
    "important",
    "significant",
    "note",
    "finding",
    "conclusion",
    "result",
];

const SENTENCE_SEPARATOR: &str = ". ";

/// Build a summary from a sentence stream.
///
/// `max_length` is a soft bound: it is checked before each sentence is
/// appended, so the result may overrun it by up to one sentence. The first
/// sentence is always included when the stream is non-empty.
pub fn summarize_sentences<S: AsRef<str>>(sentences: &[S], max_length: usize) -> String {
    let count = sentences.len();
    if count == 0 {
        return String::new();
    }

    let middle = (count > 5).then_some(count / 2);
    // floor(count * 0.8) without going through floats
    let near_end = (count > 10).then_some(count * 4 / 5);

    let mut summary = String::new();
    let mut length = 0;
    let mut push = |index: usize, summary: &mut String| {
        let sentence = sentences[index].as_ref();
        summary.push_str(sentence);
        summary.push_str(SENTENCE_SEPARATOR);
        length += sentence.chars().count() + SENTENCE_SEPARATOR.len();
        length
    };

    let mut current = push(0, &mut summary);
    for index in [middle, near_end].into_iter().flatten() {
        current = push(index, &mut summary);
    }

    let mut index = 1;
    while current < max_length && index < count {
        if Some(index) != middle && Some(index) != near_end {
            current = push(index, &mut summary);
        }
        index += 1;
    }

    tracing::debug!(sentences = count, chars = current, "heuristic summary built");
    summary.trim().to_string()
}

/// Pick up to `num_points` key points from a paragraph stream.
///
/// Duplicate detection is exact string identity on the paragraphs as
/// given; only the final output is trimmed.
pub fn extract_key_points<S: AsRef<str>>(paragraphs: &[S], num_points: usize) -> Vec<String> {
    let paragraphs: Vec<&str> = paragraphs.iter().map(AsRef::as_ref).collect();
    let mut points: Vec<&str> = Vec::new();

    for &paragraph in &paragraphs {
        let is_candidate = TRIGGER_WORDS.iter().any(|word| paragraph.contains(*word));
        if is_candidate && !points.contains(&paragraph) {
            points.push(paragraph);
        }
    }

    if points.len() < num_points {
        if let Some(&first) = paragraphs.first() {
            if !points.contains(&first) {
                points.push(first);
            }
        }
        if paragraphs.len() > 1 {
            if let Some(&last) = paragraphs.last() {
                if !points.contains(&last) {
                    points.push(last);
                }
            }
        }
    }

    if points.len() < num_points && paragraphs.len() > 3 {
        let stride = (paragraphs.len() / (num_points - points.len() + 1)).max(1);
        let mut index = stride;
        while index < paragraphs.len() && points.len() < num_points {
            if !points.contains(&paragraphs[index]) {
                points.push(paragraphs[index]);
            }
            index += stride;
        }
    }

    points
        .into_iter()
        .take(num_points)
        .map(|point| point.trim().to_string())
        .collect()
}

/// The heuristic strategy: normalise, then sample sentences and paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSummarizer;

impl HeuristicSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Summarizer::summarize`]; this path cannot fail.
    pub fn summarize_text(&self, text: &str, options: &SummaryOptions) -> Summary {
        let sentences = normalizer::sentences(text);
        let paragraphs = normalizer::paragraphs(text);

        Summary::new(
            summarize_sentences(&sentences, options.max_length),
            extract_key_points(&paragraphs, options.num_points),
        )
    }
}

#[async_trait]
impl Summarizer for HeuristicSummarizer {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<Summary, SummarizeError> {
        Ok(self.summarize_text(text, options))
    }
}
