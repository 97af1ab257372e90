//! # Docsumma
//!
//! Summarise PDF documents into a markdown digest with key points.
//!
//! ## Features
//!
//! - **Two strategies**: a deterministic heuristic extractor and an LLM-backed one,
//!   both behind the [`pipeline::Summarizer`] trait
//! - **Pluggable backend**: the LLM path talks to any [`remote::TextBackend`]
//! - **Metadata aware**: title, author, page count and creation date come from the PDF itself

pub mod config;
pub mod formatter;
pub mod heuristic;
pub mod logging;
pub mod normalizer;
pub mod pdf;
pub mod pipeline;
pub mod remote;
pub mod summary;

pub use config::Config;
pub use pipeline::{Document, Mode, SummarizeError, Summarizer, SummaryOptions};
pub use summary::{DocumentInfo, Summary};
