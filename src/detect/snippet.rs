//! Snippet extraction: the exact text span and line range a node occupies.

use crate::ast::{SourceText, SyntaxNode};

use super::types::{LineRange, Snippet};

/// Extract the source lines and 1-based inclusive range for a node.
///
/// When the front end supplies no end line, the range falls back to the
/// start line plus one. Extraction is best-effort: ranges are clamped to
/// the file, never an error.
pub fn extract_snippet(node: &SyntaxNode, source: &SourceText) -> Snippet {
    let start = node.start_line;
    let end = node.end_line.unwrap_or(start + 1);
    Snippet {
        lines: source.slice(start, end).to_vec(),
        range: LineRange { start, end },
    }
}
