//! Render a summary as a markdown document.

use crate::summary::{DocumentInfo, Summary};
use std::fmt::Write;

/// Assemble the final markdown for `file_name`.
///
/// The key points section is omitted when there are none; the document
/// information section is always present.
pub fn format_summary(file_name: &str, summary: &Summary, info: &DocumentInfo) -> String {
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = write!(out, "# Summary of \"{}\"\n\n", file_name);
    out.push_str(&summary.text);
    out.push_str("\n\n");

    if !summary.key_points.is_empty() {
        out.push_str("## Key Points:\n\n");
        for (i, point) in summary.key_points.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, point);
        }
        out.push('\n');
    }

    out.push_str("## Document Information:\n\n");
    let _ = writeln!(out, "- **Filename:** {}", file_name);
    let _ = writeln!(out, "- **Title:** {}", info.title());
    let _ = writeln!(out, "- **Pages:** {}", info.page_count());
    let _ = writeln!(out, "- **Author:** {}", info.author());
    let _ = writeln!(out, "- **Created:** {}", info.creation_date());

    out
}
