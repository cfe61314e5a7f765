//! Parse errors and diagnostic codes for expression and path parsing.
//!
//! Every parse failure is a [`ParseError`] carrying:
//! - a coarse [`ParseErrorKind`] for callers that branch on failure class
//! - a stable [`DiagCode`] for programmatic handling and JSON responses
//! - the offending token (kind, text and span) when one is involved
//!
//! Parsers fail fast: there is no error recovery and no partial AST.

mod render;

pub use render::render_error;

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Stable error codes for diagnostics.
///
/// Organized by category:
/// - `S0xx`: Syntax errors
/// - `M0xx`: Syntax-mode restrictions ("not allowed in this mode")
/// - `X0xx`: Failures reported by injected collaborators
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagCode {
    // =========================================================================
    // Syntax errors (S001-S099)
    // =========================================================================
    /// Expected a specific token
    #[serde(rename = "S001")]
    ExpectedToken,

    /// String literal not terminated
    #[serde(rename = "S002")]
    UnterminatedString,

    /// Invalid numeric literal
    #[serde(rename = "S003")]
    InvalidNumericLiteral,

    /// Invalid IRI syntax
    #[serde(rename = "S004")]
    InvalidIri,

    /// Unexpected end of input
    #[serde(rename = "S005")]
    UnexpectedEof,

    /// Invalid typed literal
    #[serde(rename = "S006")]
    InvalidTypedLiteral,

    /// Unrecognized character in the input
    #[serde(rename = "S007")]
    UnexpectedCharacter,

    /// Invalid prefixed name
    #[serde(rename = "S008")]
    InvalidPrefixedName,

    /// Undefined prefix
    #[serde(rename = "S009")]
    UndefinedPrefix,

    /// Malformed path cardinality
    #[serde(rename = "S010")]
    InvalidCardinality,

    /// Malformed negated property set
    #[serde(rename = "S011")]
    InvalidNegatedSet,

    /// Aggregate nested inside an aggregate, or aggregates disabled
    #[serde(rename = "S012")]
    AggregateNotAllowed,

    /// Nested `{` inside a cardinality group
    #[serde(rename = "S013")]
    NestedCardinality,

    /// Wrong number of arguments for a function or aggregate
    #[serde(rename = "S014")]
    WrongArity,

    // =========================================================================
    // Syntax-mode restrictions (M001-M099)
    // =========================================================================
    /// Construct requires SPARQL 1.1
    #[serde(rename = "M001")]
    RequiresSparql11,

    /// Construct requires the extended syntax mode
    #[serde(rename = "M002")]
    RequiresExtendedSyntax,

    // =========================================================================
    // Collaborator failures (X001-X099)
    // =========================================================================
    /// No graph pattern parser configured for EXISTS
    #[serde(rename = "X001")]
    MissingPatternParser,

    /// The graph pattern parser rejected an EXISTS body
    #[serde(rename = "X002")]
    PatternParserFailed,
}

impl DiagCode {
    /// Get the string code (e.g., "S001", "M002").
    pub fn code(&self) -> &'static str {
        match self {
            // Syntax
            Self::ExpectedToken => "S001",
            Self::UnterminatedString => "S002",
            Self::InvalidNumericLiteral => "S003",
            Self::InvalidIri => "S004",
            Self::UnexpectedEof => "S005",
            Self::InvalidTypedLiteral => "S006",
            Self::UnexpectedCharacter => "S007",
            Self::InvalidPrefixedName => "S008",
            Self::UndefinedPrefix => "S009",
            Self::InvalidCardinality => "S010",
            Self::InvalidNegatedSet => "S011",
            Self::AggregateNotAllowed => "S012",
            Self::NestedCardinality => "S013",
            Self::WrongArity => "S014",
            // Syntax mode
            Self::RequiresSparql11 => "M001",
            Self::RequiresExtendedSyntax => "M002",
            // Collaborators
            Self::MissingPatternParser => "X001",
            Self::PatternParserFailed => "X002",
        }
    }
}

impl std::fmt::Display for DiagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Coarse classification of a parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// A token appeared where the grammar does not allow it
    UnexpectedToken,
    /// The token queue ran out mid-production
    UnexpectedEndOfInput,
    /// A literal's lexical form does not fit its datatype
    InvalidLiteral,
    /// Path cardinality bounds are malformed
    InvalidCardinality,
    /// Negated property set is empty or malformed
    InvalidNegatedSet,
    /// Aggregate or cardinality-group nesting
    NestingNotAllowed,
    /// A prefixed name could not be resolved
    UnresolvedPrefix,
    /// Construct is not available in the configured syntax mode
    SemanticRestriction,
    /// Graph pattern parsing for EXISTS failed or is unavailable
    PatternParser,
    /// The tokenizer could not make sense of the input
    Lex,
}

impl ParseErrorKind {
    /// Whether this failure depends on the configured syntax mode rather
    /// than on the token stream alone.
    pub fn is_restriction(self) -> bool {
        matches!(self, Self::SemanticRestriction)
    }
}

/// The token an error points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    /// Display name of the token kind
    pub kind: Arc<str>,
    /// Token text
    pub text: Arc<str>,
    /// Where the token sits in the source
    pub span: SourceSpan,
}

/// A failed expression or path parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", self.describe())]
pub struct ParseError {
    /// Failure class
    pub kind: ParseErrorKind,
    /// Stable diagnostic code
    pub code: DiagCode,
    /// Human-readable message
    pub message: String,
    /// Offending token, if the failure is tied to one
    pub token: Option<TokenSummary>,
}

impl ParseError {
    /// Create an error not tied to any token.
    pub fn new(kind: ParseErrorKind, code: DiagCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            token: None,
        }
    }

    /// Attach the offending token.
    pub fn with_token(mut self, token: TokenSummary) -> Self {
        self.token = Some(token);
        self
    }

    /// Input ended while `expected` was still required.
    pub fn end_of_input(expected: impl std::fmt::Display) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEndOfInput,
            DiagCode::UnexpectedEof,
            format!("Unexpected end of input, expected {expected}"),
        )
    }

    /// Source span of the offending token, if any.
    pub fn span(&self) -> Option<SourceSpan> {
        self.token.as_ref().map(|t| t.span)
    }

    /// `[kind at span]` followed by the message, or just the message.
    fn describe(&self) -> String {
        match &self.token {
            Some(token) => format!("[{} at {}]\n{}", token.kind, token.span, self.message),
            None => self.message.clone(),
        }
    }
}
