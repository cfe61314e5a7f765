//! Diagnostic rendering for human-readable output.
//!
//! Renders parse errors in a format similar to Rust compiler errors:
//!
//! ```text
//! error[S010]: Invalid cardinality {3,2}, maximum is less than minimum
//!   --> query.sparql:1:8
//!    |
//!  1 | ?s :p{3,2} ?o
//!    |      ^^^^^
//!    |
//! ```

use crate::diag::ParseError;
use crate::span::{LineIndex, SourceSpan};

/// Render a parse error to a string.
///
/// Errors without a token render the header line only.
///
/// # Arguments
///
/// * `err` - The error to render
/// * `source` - The source text the tokens were produced from
/// * `filename` - Optional filename for the source location
pub fn render_error(err: &ParseError, source: &str, filename: Option<&str>) -> String {
    let mut output = format!("error[{}]: {}\n", err.code.code(), err.message);

    let Some(span) = err.span() else {
        return output;
    };

    let file = filename.unwrap_or("<input>");
    output.push_str(&format!(
        "  --> {}:{}:{}\n",
        file, span.start.line, span.start.col
    ));

    render_source_snippet(&mut output, source, span);
    output
}

fn render_source_snippet(output: &mut String, source: &str, span: SourceSpan) {
    let index = LineIndex::new(source);
    let (start, end) = (span.start, span.end);

    // Spans from an external tokenizer may point past this source
    if start.line == 0 || start.line as usize > index.line_count() {
        return;
    }
    let last_line = end.line.clamp(start.line, index.line_count() as u32);
    let gutter_width = last_line.to_string().len();

    for line_num in start.line..=last_line {
        let line_start = index.line_start(line_num).unwrap_or(0);
        let line_end = index.line_end(line_num, source).min(source.len());
        let line_text = source
            .get(line_start..line_end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r']);

        output.push_str(&format!("{:>width$} |\n", "", width = gutter_width));
        output.push_str(&format!(
            "{:>width$} | {}\n",
            line_num,
            line_text,
            width = gutter_width
        ));

        let underline_start = if line_num == start.line {
            start.col as usize
        } else {
            1
        };
        let underline_end = if line_num == end.line {
            end.col as usize
        } else {
            line_text.len() + 1
        };
        let padding = " ".repeat(underline_start.saturating_sub(1));
        let underline = "^".repeat(underline_end.saturating_sub(underline_start).max(1));

        output.push_str(&format!(
            "{:>width$} | {}{}\n",
            "",
            padding,
            underline,
            width = gutter_width
        ));
    }

    output.push_str(&format!("{:>width$} |\n", "", width = gutter_width));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{DiagCode, ParseErrorKind, TokenSummary};
    use crate::span::LineCol;

    fn error_at(start: LineCol, end: LineCol) -> ParseError {
        ParseError::new(
            ParseErrorKind::InvalidCardinality,
            DiagCode::InvalidCardinality,
            "Invalid cardinality",
        )
        .with_token(TokenSummary {
            kind: "LEFTCURLYBRACKET".into(),
            text: "{".into(),
            span: SourceSpan::new(start, end),
        })
    }

    #[test]
    fn test_render_simple() {
        let source = "?s :p{3,2} ?o";
        let err = error_at(LineCol::new(1, 6), LineCol::new(1, 11));

        let rendered = render_error(&err, source, Some("query.sparql"));
        println!("{}", rendered);

        assert!(rendered.starts_with("error[S010]: Invalid cardinality"));
        assert!(rendered.contains("query.sparql:1:6"));
        assert!(rendered.contains("  |      ^^^^^"));
    }

    #[test]
    fn test_render_multiline() {
        let source = "?x +\n  (?y";
        let err = error_at(LineCol::new(2, 3), LineCol::new(2, 4));

        let rendered = render_error(&err, source, None);
        println!("{}", rendered);

        assert!(rendered.contains("<input>:2:3"));
        assert!(rendered.contains("2 |   (?y"));
    }

    #[test]
    fn test_render_without_token() {
        let err = ParseError::end_of_input("')'");
        let rendered = render_error(&err, "(?x", None);
        assert_eq!(
            rendered,
            "error[S005]: Unexpected end of input, expected ')'\n"
        );
    }

    #[test]
    fn test_render_span_outside_source() {
        let err = error_at(LineCol::new(9, 1), LineCol::new(9, 2));
        let rendered = render_error(&err, "?x", None);
        assert!(rendered.contains("<input>:9:1"));
        assert!(!rendered.contains('^'));
    }
}
