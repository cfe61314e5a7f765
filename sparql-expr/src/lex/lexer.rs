//! SPARQL lexer implementation using winnow.
//!
//! Tokenizes query fragments into a stream of tokens with line/column spans.
//! Fails fast on the first lexical error.

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{keyword_from_str, Token, TokenKind};
use crate::diag::{DiagCode, ParseError, ParseErrorKind, TokenSummary};
use crate::span::LineIndex;

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// A lexed token before its span is resolved.
type Lexeme = (TokenKind, String);

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Lexer for SPARQL expressions, paths and graph pattern fragments.
pub struct Lexer<'a> {
    input: &'a str,
    index: LineIndex,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: LineIndex::new(input),
        }
    }

    /// Tokenize the entire input.
    ///
    /// Returns an error on the first invalid token, pointing at the
    /// character where lexing failed.
    pub fn tokenize(self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            skip_ws_and_comments(&mut input);

            if input.is_empty() {
                break;
            }

            let start = input.current_token_start();

            match next_token(&mut input) {
                Ok((kind, text)) => {
                    let end = input.current_token_start();
                    tokens.push(Token::new(kind, text, self.index.span(start, end)));
                }
                Err(_) => return Err(self.make_error(start)),
            }
        }

        Ok(tokens)
    }

    /// Create a descriptive error for the character at `position`.
    fn make_error(&self, position: usize) -> ParseError {
        let bad_char = self.input[position..].chars().next().unwrap_or('?');
        let span = self.index.span(position, position + bad_char.len_utf8());

        let (code, message) = match bad_char {
            '"' | '\'' => (
                DiagCode::UnterminatedString,
                "unterminated string literal".to_string(),
            ),
            c if !c.is_ascii() && !is_pn_chars_base(c) => (
                DiagCode::UnexpectedCharacter,
                format!(
                    "unexpected character '{}' (U+{:04X})",
                    c.escape_unicode(),
                    c as u32
                ),
            ),
            c => (
                DiagCode::UnexpectedCharacter,
                format!("unexpected character '{}'", c),
            ),
        };

        ParseError::new(ParseErrorKind::Lex, code, message).with_token(TokenSummary {
            kind: "CHARACTER".into(),
            text: bad_char.to_string().into(),
            span,
        })
    }
}

/// Skip whitespace and comments.
fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
        } else {
            break;
        }
    }
}

/// Parse the next token.
fn next_token(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    alt((
        // Multi-char operators (must come before single-char)
        parse_double_caret,
        // IRIs (must come before `<` and `<=`)
        parse_iri_ref,
        parse_two_char_operator,
        parse_var,
        // Blank nodes (must come before prefixed names)
        parse_blank_node_label,
        parse_lang_tag,
        // Default prefix (:name or just :)
        parse_default_prefix,
        // Prefixed names, keywords and boolean plain literals
        parse_word,
        parse_string_literal,
        // Numbers (must come before `+` and `-`)
        parse_number,
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRIs and variables
// =============================================================================

/// Parse an IRI reference: `<...>`
fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    '<'.parse_next(input)?;
    let mut iri = String::new();

    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        iri.push_str(chunk);

        if input.starts_with('>') {
            '>'.parse_next(input)?;
            return Ok((TokenKind::Iri, iri));
        }
        if !input.starts_with('\\') {
            return backtrack();
        }
        '\\'.parse_next(input)?;
        iri.push(parse_unicode_escape(input)?);
    }
}

/// Parse a Unicode escape sequence (`uXXXX` or `UXXXXXXXX`, after the `\`).
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<char> {
    let width = match any.parse_next(input)? {
        'u' => 4,
        'U' => 8,
        _ => return backtrack(),
    };
    let hex: &str = take_while(width..=width, AsChar::is_hex_digit).parse_next(input)?;
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .map_or_else(backtrack, Ok)
}

/// Parse a variable: `?name` or `$name`
fn parse_var(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    preceded(
        one_of(['?', '$']),
        (take_while(1, is_varname_start), take_while(0.., is_varname_char)).take(),
    )
    .map(|name: &str| (TokenKind::Var, name.to_string()))
    .parse_next(input)
}

// =============================================================================
// Blank nodes and language tags
// =============================================================================

/// Parse a blank node label: `_:name`
fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    let label: &str = preceded(
        "_:",
        (
            take_while(1, |c: char| is_pn_chars_u(c) || c.is_ascii_digit()),
            take_while(0.., |c: char| is_pn_chars(c) || c == '.'),
        )
            .take(),
    )
    .parse_next(input)?;

    // A trailing dot terminates the enclosing triple, not the label
    if label.ends_with('.') {
        return backtrack();
    }
    Ok((TokenKind::BlankNode, label.to_string()))
}

/// Parse a language tag: `@en`, `@en-US`
fn parse_lang_tag(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    preceded(
        '@',
        (
            take_while(1.., |c: char| c.is_ascii_alphabetic()),
            repeat::<_, _, (), _, _>(
                0..,
                ('-', take_while(1.., |c: char| c.is_ascii_alphanumeric())),
            ),
        )
            .take(),
    )
    .map(|tag: &str| (TokenKind::LangTag, tag.to_string()))
    .parse_next(input)
}

// =============================================================================
// Prefixed names and keywords
// =============================================================================

/// Parse a default prefix name (`:local`) or the bare default namespace (`:`).
fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    ':'.parse_next(input)?;
    let local = opt(parse_pn_local).parse_next(input)?.unwrap_or_default();
    Ok((TokenKind::QName, format!(":{local}")))
}

/// Parse a prefixed name, a keyword, or a `true`/`false` plain literal.
fn parse_word(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    let start = input.checkpoint();

    let first_char = input.chars().next().map_or_else(backtrack, Ok)?;
    let mut word = String::new();

    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        word.push_str(chunk);

        // Dots are allowed inside a prefix but never at its end
        let rest = input.as_ref();
        if rest.starts_with('.') && rest[1..].chars().next().is_some_and(is_pn_chars) {
            '.'.parse_next(input)?;
            word.push('.');
            continue;
        }
        break;
    }

    if word.is_empty() {
        return backtrack();
    }

    if input.starts_with(':') {
        if !is_pn_prefix_start(first_char) {
            input.reset(&start);
            return backtrack();
        }
        ':'.parse_next(input)?;
        let local = opt(parse_pn_local).parse_next(input)?.unwrap_or_default();
        return Ok((TokenKind::QName, format!("{word}:{local}")));
    }

    if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") {
        return Ok((TokenKind::PlainLiteral, word.to_ascii_lowercase()));
    }

    match keyword_from_str(&word) {
        Some(kind) => Ok((kind, word)),
        None => {
            input.reset(&start);
            backtrack()
        }
    }
}

/// Parse a local name (after the colon in a prefixed name).
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let first_char = input.chars().next().map_or_else(backtrack, Ok)?;
    if !is_pn_local_start(first_char) && first_char != '%' && first_char != '\\' {
        return backtrack();
    }

    let mut local = String::new();

    loop {
        let chunk: &str =
            take_while(0.., |c: char| is_pn_chars(c) || c == ':').parse_next(input)?;
        local.push_str(chunk);

        let rest = input.as_ref();
        if rest.starts_with('.') {
            match rest[1..].chars().next() {
                Some(c) if is_pn_chars(c) || matches!(c, ':' | '%' | '\\') => {
                    '.'.parse_next(input)?;
                    local.push('.');
                    continue;
                }
                _ => break,
            }
        } else if rest.starts_with('%') {
            '%'.parse_next(input)?;
            let hex: &str = take_while(2..=2, AsChar::is_hex_digit).parse_next(input)?;
            local.push('%');
            local.push_str(hex);
        } else if rest.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = any
                .verify(|c: &char| "_~.-!$&'()*+,;=/?#@%".contains(*c))
                .parse_next(input)?;
            local.push(escaped);
        } else {
            break;
        }
    }

    if local.is_empty() {
        return backtrack();
    }
    Ok(local)
}

// =============================================================================
// String literals
// =============================================================================

/// Parse a string literal (single or double quotes, short or long).
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    let (quote, long) = alt((
        "\"\"\"".value(('"', true)),
        "'''".value(('\'', true)),
        '"'.value(('"', false)),
        '\''.value(('\'', false)),
    ))
    .parse_next(input)?;

    let body = parse_string_body(input, quote, long)?;
    Ok((TokenKind::StringLiteral, body))
}

/// Read string content up to and including the closing delimiter.
///
/// Short strings may not span lines; long strings may contain lone quotes.
fn parse_string_body(input: &mut Input<'_>, quote: char, long: bool) -> ModalResult<String> {
    let mut result = String::new();
    let closing: String = std::iter::repeat(quote).take(if long { 3 } else { 1 }).collect();

    loop {
        let chunk: &str = take_while(0.., |c: char| {
            c != quote && c != '\\' && (long || (c != '\n' && c != '\r'))
        })
        .parse_next(input)?;
        result.push_str(chunk);

        if input.starts_with(closing.as_str()) {
            closing.as_str().parse_next(input)?;
            return Ok(result);
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            result.push(parse_escape_char(input)?);
        } else if long && input.starts_with(quote) {
            result.push(any.parse_next(input)?);
        } else {
            // End of input or a newline in a short string
            return backtrack();
        }
    }
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    if input.starts_with('u') || input.starts_with('U') {
        return parse_unicode_escape(input);
    }
    any.verify_map(|c| match c {
        't' => Some('\t'),
        'b' => Some('\x08'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        'f' => Some('\x0C'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        _ => None,
    })
    .parse_next(input)
}

// =============================================================================
// Numbers
// =============================================================================

/// Parse an unquoted numeric literal, keeping its exact lexical form.
///
/// A sign is part of the literal only when a digit (or `.digit`) follows it
/// directly, so `?x -5` lexes as a variable then the literal `-5`. Runs of
/// dotted digit groups such as `5.0.0` are kept whole and rejected later
/// when the literal is classified.
fn parse_number(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    (
        opt(one_of(['+', '-'])),
        alt((
            (digit1, repeat::<_, _, (), _, _>(0.., ('.', digit1))).take(),
            ('.', digit1, repeat::<_, _, (), _, _>(0.., ('.', digit1))).take(),
        )),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .map(|lexeme: &str| (TokenKind::PlainLiteral, lexeme.to_string()))
        .parse_next(input)
}

// =============================================================================
// Operators and punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    "^^".map(|s: &str| (TokenKind::DoubleCaret, s.to_string()))
        .parse_next(input)
}

fn parse_two_char_operator(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    alt((
        "||".value(TokenKind::Or),
        "&&".value(TokenKind::And),
        "!=".value(TokenKind::Ne),
        "<=".value(TokenKind::Le),
        ">=".value(TokenKind::Ge),
    ))
    .with_taken()
    .map(|(kind, s): (TokenKind, &str)| (kind, s.to_string()))
    .parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<Lexeme> {
    any.verify_map(|c| {
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Eq,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '!' => TokenKind::Bang,
            '?' => TokenKind::Question,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,
            _ => return None,
        };
        Some((kind, c.to_string()))
    })
    .parse_next(input)
}

/// Tokenize a SPARQL fragment.
///
/// Returns an error on the first invalid token, with line/column
/// information for the offending character.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
