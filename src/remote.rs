//! LLM-backed summarisation.
//!
//! The backend is reached through the [`TextBackend`] capability so the
//! strategy can run against any chat-completion service, or a test double.

use crate::pipeline::{SummarizeError, Summarizer, SummaryOptions};
use crate::summary::Summary;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Content longer than this many characters is cut before sending.
pub const MAX_CONTENT_CHARS: usize = 15_000;

/// Appended to content that was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Returned when the backend answers with no text.
pub const EMPTY_SUMMARY_FALLBACK: &str = "No summary could be generated.";

const SUMMARY_TEMPERATURE: f32 = 0.5;
const SUMMARY_TOKEN_BUDGET: u32 = 1000;
const KEY_POINTS_TEMPERATURE: f32 = 0.3;
const KEY_POINTS_TOKEN_BUDGET: u32 = 500;

lazy_static! {
    static ref NUMBERED_ITEM: Regex = Regex::new(r"\d+\.\s+").unwrap();
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("LLM backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A single generation request: system instruction plus user content.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// Anything that can turn a prompt into generated text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Generate text for `prompt`, producing at most `budget` tokens.
    async fn generate_text(&self, prompt: &Prompt, budget: u32) -> Result<String, BackendError>;
}

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions over HTTP.
pub struct OpenAiBackend {
    client: Client,
    config: RemoteConfig,
}

impl OpenAiBackend {
    pub fn new(config: RemoteConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(concat!("docsumma/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextBackend for OpenAiBackend {
    async fn generate_text(&self, prompt: &Prompt, budget: u32) -> Result<String, BackendError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.temperature,
            max_tokens: budget,
        };

        tracing::debug!(model = %self.config.model, budget, "sending chat completion request");
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::ParseError(format!("{}: {}", e, body)))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

/// Cut `content` to [`MAX_CONTENT_CHARS`] characters, marking the cut.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_index, _)) => format!("{}{}", &content[..byte_index], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

/// Split a numbered-list response into its items.
///
/// A non-empty response with no `N. ` markers at all is treated as
/// malformed and yields no points.
pub fn parse_key_points(response: &str, num_points: usize) -> Vec<String> {
    if response.trim().is_empty() {
        return Vec::new();
    }
    if !NUMBERED_ITEM.is_match(response) {
        tracing::warn!("key point response is not a numbered list, discarding it");
        return Vec::new();
    }

    let mut points: Vec<String> = Vec::new();
    for fragment in NUMBERED_ITEM.split(response) {
        let point = fragment.trim();
        if point.is_empty() || points.iter().any(|p| p == point) {
            continue;
        }
        points.push(point.to_string());
    }
    points.truncate(num_points);
    points
}

fn summary_prompt(content: &str, max_words: usize) -> Prompt {
    Prompt {
        system: format!(
            "You are an AI assistant specialized in summarizing PDF documents.\n\
             Create a detailed and well-structured summary of the provided text.\n\
             Focus on key points, main arguments, and important findings.\n\
             The summary should be around {} words.\n\
             Format your response in markdown with clear headings and bullet points where appropriate.",
            max_words
        ),
        user: format!(
            "Please summarize the following document content:\n\n{}",
            truncate_content(content)
        ),
        temperature: SUMMARY_TEMPERATURE,
    }
}

fn key_points_prompt(content: &str, num_points: usize) -> Prompt {
    Prompt {
        system: format!(
            "Extract exactly {} key points from the provided text.\n\
             Focus on the most important findings, arguments, or concepts.\n\
             Each key point should be concise (1-2 sentences) but informative.\n\
             Format the response as numbered points.",
            num_points
        ),
        user: format!(
            "Please extract {} key points from the following document content:\n\n{}",
            num_points,
            truncate_content(content)
        ),
        temperature: KEY_POINTS_TEMPERATURE,
    }
}

/// The remote strategy: one backend call for the summary, one for the key points.
pub struct RemoteSummarizer<B> {
    backend: B,
}

impl<B: TextBackend> RemoteSummarizer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Produce a markdown summary of roughly `max_words` words.
    pub async fn summarize_content(&self, content: &str, max_words: usize) -> Result<String, BackendError> {
        let prompt = summary_prompt(content, max_words);
        let text = self
            .backend
            .generate_text(&prompt, SUMMARY_TOKEN_BUDGET)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "summary request failed"))?;

        if text.is_empty() {
            return Ok(EMPTY_SUMMARY_FALLBACK.to_string());
        }
        Ok(text)
    }

    /// Ask for exactly `num_points` numbered key points and parse them.
    pub async fn extract_key_points(
        &self,
        content: &str,
        num_points: usize,
    ) -> Result<Vec<String>, BackendError> {
        let prompt = key_points_prompt(content, num_points);
        let text = self
            .backend
            .generate_text(&prompt, KEY_POINTS_TOKEN_BUDGET)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "key point request failed"))?;

        Ok(parse_key_points(&text, num_points))
    }
}

#[async_trait]
impl<B: TextBackend> Summarizer for RemoteSummarizer<B> {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<Summary, SummarizeError> {
        let summary = self.summarize_content(text, options.max_words).await?;
        let key_points = self.extract_key_points(text, options.num_points).await?;
        Ok(Summary::new(summary, key_points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(truncate_content("hello"), "hello");
        let exact = "a".repeat(MAX_CONTENT_CHARS);
        assert_eq!(truncate_content(&exact), exact);
    }

    #[test]
    fn long_content_is_cut_with_marker() {
        let long = "b".repeat(MAX_CONTENT_CHARS + 10);
        let cut = truncate_content(&long);
        assert_eq!(cut.len(), MAX_CONTENT_CHARS + TRUNCATION_MARKER.len());
        assert!(cut.ends_with("b..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(MAX_CONTENT_CHARS + 1);
        let cut = truncate_content(&long);
        assert_eq!(cut.chars().count(), MAX_CONTENT_CHARS + TRUNCATION_MARKER.len());
    }

    #[test]
    fn parses_numbered_list() {
        assert_eq!(
            parse_key_points("1. Point one\n2. Point two", 5),
            vec!["Point one", "Point two"]
        );
    }

    #[test]
    fn keeps_preamble_fragment() {
        assert_eq!(
            parse_key_points("Here you go:\n1. First\n2. Second", 5),
            vec!["Here you go:", "First", "Second"]
        );
    }

    #[test]
    fn unnumbered_response_is_discarded() {
        assert!(parse_key_points("Just a paragraph of prose.", 5).is_empty());
        assert!(parse_key_points("   ", 5).is_empty());
    }

    #[test]
    fn parsed_points_are_capped_and_unique() {
        let response = "1. Same\n2. Same\n3. Other\n4. Third\n5. Fourth";
        assert_eq!(parse_key_points(response, 3), vec!["Same", "Other", "Third"]);
    }

    #[test]
    fn prompts_carry_budgets() {
        let prompt = summary_prompt("text", 250);
        assert!(prompt.system.contains("around 250 words"));
        assert!(prompt.user.ends_with("\n\ntext"));

        let prompt = key_points_prompt("text", 7);
        assert!(prompt.system.starts_with("Extract exactly 7 key points"));
        assert!(prompt.user.starts_with("Please extract 7 key points"));
    }
}
