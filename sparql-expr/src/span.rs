//! Source span utilities for precise diagnostic locations.
//!
//! Tokens arrive from the tokenizer with line/column positions, and every
//! AST node built from them carries a `SourceSpan` covering its tokens.
//! Spans hold line/column positions, not byte offsets; token queues may come
//! from tokenizers outside this crate.

use serde::{Deserialize, Serialize};

/// A line/column position in source text (1-indexed).
///
/// **Note**: Column numbers are byte-based, not character or grapheme-based.
/// For non-ASCII queries, visual alignment in diagnostic rendering may be off.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LineCol {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new line/column position.
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A span in the source text.
///
/// The start is inclusive and the end exclusive: a single-character token
/// at line 1 column 5 spans `1:5..1:6`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Start position (inclusive)
    pub start: LineCol,
    /// End position (exclusive)
    pub end: LineCol,
}

impl SourceSpan {
    /// Create a new span from start to end positions.
    pub const fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a single position.
    pub const fn point(at: LineCol) -> Self {
        Self { start: at, end: at }
    }

    /// Whether this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Create a span that covers both this span and another.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Line {} Column {} to Line {} Column {}",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

/// Mapping from byte offsets to line/column positions.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offsets of line starts (including offset 0 for line 1)
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Lines and columns are 1-indexed.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        LineCol {
            line: line as u32 + 1,
            col: (offset - line_start) as u32 + 1,
        }
    }

    /// Resolve a byte range into a `SourceSpan`.
    pub fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan::new(self.line_col(start), self.line_col(end))
    }

    /// Get the byte offset of a line start.
    pub fn line_start(&self, line: u32) -> Option<usize> {
        self.line_starts.get(line.saturating_sub(1) as usize).copied()
    }

    /// Get the byte offset of a line end (exclusive).
    pub fn line_end(&self, line: u32, source: &str) -> usize {
        self.line_starts
            .get(line as usize)
            .copied()
            .unwrap_or(source.len())
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = SourceSpan::new(LineCol::new(1, 5), LineCol::new(1, 10));
        assert!(!span.is_empty());

        let empty = SourceSpan::point(LineCol::new(1, 5));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_span_union_across_lines() {
        let a = SourceSpan::new(LineCol::new(1, 5), LineCol::new(1, 10));
        let b = SourceSpan::new(LineCol::new(2, 1), LineCol::new(2, 4));
        let union = a.union(b);
        assert_eq!(
            union,
            SourceSpan::new(LineCol::new(1, 5), LineCol::new(2, 4))
        );
        // Order of the operands does not matter
        assert_eq!(b.union(a), union);
    }

    #[test]
    fn test_span_display() {
        let span = SourceSpan::new(LineCol::new(3, 7), LineCol::new(3, 9));
        assert_eq!(span.to_string(), "Line 3 Column 7 to Line 3 Column 9");
    }

    #[test]
    fn test_line_index() {
        let source = "line1\nline2\nline3";
        let index = LineIndex::new(source);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), LineCol::new(1, 1));
        assert_eq!(index.line_col(3), LineCol::new(1, 4));
        assert_eq!(index.line_col(6), LineCol::new(2, 1));
        assert_eq!(index.line_col(14), LineCol::new(3, 3));
    }

    #[test]
    fn test_line_index_span() {
        let source = "?x +\n  ?y";
        let index = LineIndex::new(source);
        // "?y"
        let span = index.span(7, 9);
        assert_eq!(span.start, LineCol::new(2, 3));
        assert_eq!(span.end, LineCol::new(2, 5));
        assert_eq!(index.line_end(1, source), 5);
        assert_eq!(index.line_start(2), Some(5));
    }
}
