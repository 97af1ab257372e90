//! Summary and document metadata types shared by both strategies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel rendered for any metadata field the PDF does not carry.
pub const UNKNOWN: &str = "Unknown";

/// The output of a summarisation strategy, before formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Summary prose
    pub text: String,
    /// Key points in the order the strategy selected them
    pub key_points: Vec<String>,
}

impl Summary {
    /// Create a new summary
    pub fn new(text: String, key_points: Vec<String>) -> Self {
        Self { text, key_points }
    }
}

/// Metadata read from the source document.
///
/// Every field is optional; absent values display as "Unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: Option<u32>,
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    pub fn title(&self) -> &str {
        display_or_unknown(self.title.as_deref())
    }

    pub fn author(&self) -> &str {
        display_or_unknown(self.author.as_deref())
    }

    pub fn creation_date(&self) -> &str {
        display_or_unknown(self.creation_date.as_deref())
    }

    pub fn page_count(&self) -> PageCount {
        PageCount(self.page_count)
    }
}

/// Display adapter for an optional page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount(Option<u32>);

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pages) => write!(f, "{}", pages),
            None => f.write_str(UNKNOWN),
        }
    }
}

fn display_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_display_unknown() {
        let info = DocumentInfo::default();
        assert_eq!(info.title(), "Unknown");
        assert_eq!(info.author(), "Unknown");
        assert_eq!(info.creation_date(), "Unknown");
        assert_eq!(info.page_count().to_string(), "Unknown");
    }

    #[test]
    fn blank_fields_display_unknown() {
        let info = DocumentInfo {
            author: Some("   ".to_string()),
            page_count: Some(12),
            ..Default::default()
        };
        assert_eq!(info.author(), "Unknown");
        assert_eq!(info.page_count().to_string(), "12");
    }
}
