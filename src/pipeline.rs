//! The summarisation pipeline.
//!
//! A [`Summarizer`] turns raw text into a [`Summary`]; [`summarize`] checks
//! the input, runs the chosen strategy, and renders the result.

use crate::config::{Config, ConfigError};
use crate::formatter;
use crate::heuristic::HeuristicSummarizer;
use crate::remote::{BackendError, OpenAiBackend, RemoteSummarizer};
use crate::summary::{DocumentInfo, Summary};
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown instead of a summary when the document has no text.
pub const NO_TEXT_MESSAGE: &str =
    "We could not extract any text from this PDF. It may be scanned, image-only, or empty.";

/// Shown instead of a summary when the LLM backend fails.
pub const BACKEND_FAILURE_MESSAGE: &str =
    "Sorry, we were unable to generate a summary for this document. Please try again later.";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("no extractable text in document")]
    NoExtractableText,
    #[error("summarization backend failed: {0}")]
    Backend(#[from] BackendError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Which strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Deterministic sentence and paragraph sampling
    #[default]
    Heuristic,
    /// LLM-generated summary and key points
    Remote,
}

/// Length budgets for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Heuristic summary soft bound, in characters
    pub max_length: usize,
    /// Remote summary target, in words
    pub max_words: usize,
    pub num_points: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 1000,
            max_words: 500,
            num_points: 5,
        }
    }
}

/// A summarisation strategy.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<Summary, SummarizeError>;
}

/// A document as handed over by the PDF parser.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub file_name: String,
    pub text: String,
    pub info: DocumentInfo,
}

/// Build the strategy for `mode`.
///
/// The remote strategy needs an API key; the heuristic one never fails.
pub fn summarizer_for(mode: Mode, config: &Config) -> Result<Box<dyn Summarizer>, SummarizeError> {
    match mode {
        Mode::Heuristic => Ok(Box::new(HeuristicSummarizer::new())),
        Mode::Remote => {
            let backend = OpenAiBackend::new(config.remote_config()?)?;
            Ok(Box::new(RemoteSummarizer::new(backend)))
        }
    }
}

/// Summarise `document` with `summarizer` and render it as markdown.
pub async fn summarize(
    summarizer: &dyn Summarizer,
    document: &Document,
    options: &SummaryOptions,
) -> Result<String, SummarizeError> {
    if document.text.trim().is_empty() {
        tracing::warn!(file = %document.file_name, "document has no extractable text");
        return Err(SummarizeError::NoExtractableText);
    }

    tracing::info!(
        file = %document.file_name,
        chars = document.text.chars().count(),
        "summarizing document"
    );
    let summary = summarizer.summarize(&document.text, options).await?;
    Ok(formatter::format_summary(&document.file_name, &summary, &document.info))
}

/// The text a caller should show in place of a failed summary.
///
/// Configuration problems are not request failures and have no fallback.
pub fn fallback_message(error: &SummarizeError) -> Option<&'static str> {
    match error {
        SummarizeError::NoExtractableText => Some(NO_TEXT_MESSAGE),
        SummarizeError::Backend(_) => Some(BACKEND_FAILURE_MESSAGE),
        SummarizeError::Config(_) => None,
    }
}
