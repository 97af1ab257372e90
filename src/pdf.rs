//! PDF reading: extracted text plus document metadata.
//!
//! Uses pdf-extract for the text layer and lopdf for the `Info` dictionary
//! and page tree.

use crate::summary::DocumentInfo;
use chrono::NaiveDate;
use lopdf::{Document, Object};
use std::path::Path;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
    #[error("file is not a PDF")]
    NotPdf,
    #[error("PDF is encrypted")]
    Encrypted,
    #[error("failed to parse PDF: {0}")]
    Unreadable(String),
}

/// Text and metadata of a parsed PDF
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    pub text: String,
    pub info: DocumentInfo,
}

/// Read and parse a PDF from disk, rejecting files over `max_file_size` bytes.
pub fn parse_pdf(path: &Path, max_file_size: u64) -> Result<ParsedPdf, PdfError> {
    let size = std::fs::metadata(path)?.len();
    if size > max_file_size {
        return Err(PdfError::TooLarge {
            size,
            limit: max_file_size,
        });
    }

    let bytes = std::fs::read(path)?;
    parse_pdf_bytes(&bytes)
}

/// Parse an in-memory PDF.
pub fn parse_pdf_bytes(bytes: &[u8]) -> Result<ParsedPdf, PdfError> {
    let info = read_metadata(bytes)?;
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Unreadable(e.to_string()))?;

    tracing::debug!(
        pages = ?info.page_count,
        chars = text.chars().count(),
        "extracted PDF text"
    );
    Ok(ParsedPdf { text, info })
}

/// Read title, author, creation date and page count without touching the text layer.
pub fn read_metadata(bytes: &[u8]) -> Result<DocumentInfo, PdfError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    let document = Document::load_mem(bytes).map_err(|e| PdfError::Unreadable(e.to_string()))?;
    if document.is_encrypted() {
        return Err(PdfError::Encrypted);
    }

    let page_count = u32::try_from(document.get_pages().len()).ok();
    let mut info = DocumentInfo {
        page_count,
        ..Default::default()
    };

    let dictionary = document
        .trailer
        .get(b"Info")
        .and_then(|object| document.dereference(object))
        .and_then(|(_, object)| object.as_dict());

    if let Ok(dictionary) = dictionary {
        let field = |key: &[u8]| {
            dictionary
                .get(key)
                .ok()
                .and_then(|object| document.dereference(object).ok())
                .and_then(|(_, object)| text_string(object))
                .filter(|value| !value.trim().is_empty())
        };
        info.title = field(b"Title");
        info.author = field(b"Author");
        info.creation_date = field(b"CreationDate").map(|raw| format_pdf_date(&raw));
    }

    Ok(info)
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8 with BOM, or byte-per-char).
fn text_string(object: &Object) -> Option<String> {
    let Object::String(bytes, _) = object else {
        return None;
    };

    let decoded = if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| char::from(b)).collect()
    };

    Some(decoded.trim_end_matches('\0').trim().to_string())
}

/// Render a `D:YYYYMMDDHHmmSS...` date as `YYYY-MM-DD HH:MM:SS`.
///
/// Anything that does not parse is returned unchanged.
pub fn format_pdf_date(raw: &str) -> String {
    parse_pdf_date(raw).unwrap_or_else(|| raw.to_string())
}

fn parse_pdf_date(raw: &str) -> Option<String> {
    let body = raw.trim().strip_prefix("D:").unwrap_or(raw.trim());
    let digits: String = body.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return None;
    }

    let part = |range: std::ops::Range<usize>, default: u32| -> Option<u32> {
        match digits.get(range) {
            Some(s) => s.parse().ok(),
            None => Some(default),
        }
    };

    let year = digits.get(0..4)?.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, part(4..6, 1)?, part(6..8, 1)?)?;
    let datetime = date.and_hms_opt(part(8..10, 0)?, part(10..12, 0)?, part(12..14, 0)?)?;
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
