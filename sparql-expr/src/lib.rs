//! # SPARQL Expressions and Property Paths
//!
//! The expression layer of a SPARQL 1.1 query parser:
//! - Expression and property path parsers producing typed ASTs with source spans
//! - SPARQL 1.0, SPARQL 1.1 and extended syntax modes
//! - Value semantics for `=`, `ORDER BY` and effective boolean value
//! - A numeric/type classifier for XSD datatypes and lexical forms
//!
//! ## Architecture
//!
//! The parsers consume a [`TokenQueue`] front to back. The enclosing query
//! parser owns tokenization and graph patterns; it reaches in through
//! [`ParserConfig`] (namespace resolution, extension function factories and
//! the `EXISTS` graph pattern parser) and gets back an [`Expression`] or
//! [`PropertyPath`]. A small bundled lexer ([`lex`]) covers the token
//! vocabulary the parsers need, so expressions can also be parsed straight
//! from text.
//!
//! ## Quick Start
//!
//! ```
//! use sparql_expr::{parse_expression_str, ParserConfig};
//! use sparql_expr::value::{equals, Literal, Term};
//!
//! let config = ParserConfig::default();
//! let expr = parse_expression_str("?price * 2 > 10", &config).unwrap();
//! assert!(!expr.contains_aggregate());
//!
//! let five = Term::Literal(Literal::typed("5", sparql_vocab::xsd::INTEGER));
//! let five_dec = Term::Literal(Literal::typed("5.0", sparql_vocab::xsd::DECIMAL));
//! assert!(equals(&five, &five_dec).unwrap());
//! ```

pub mod ast;
pub mod diag;
pub mod lex;
pub mod parse;
pub mod span;
pub mod value;

// Re-exports
pub use ast::{Expression, PropertyPath};
pub use diag::{DiagCode, ParseError, ParseErrorKind};
pub use parse::{ExpressionParser, ParserConfig, PathParser, SyntaxMode, TokenQueue};
pub use span::SourceSpan;
pub use value::{Literal, Term, ValueError};

/// Tokenize `source` and parse it as one complete expression.
pub fn parse_expression_str(source: &str, config: &ParserConfig) -> Result<Expression, ParseError> {
    let mut tokens = TokenQueue::tokenize(source)?;
    ExpressionParser::new(config).parse(&mut tokens)
}

/// Tokenize `source` and parse it as one complete property path.
///
/// Unlike [`PathParser::parse`], tokens left after the path are an error.
pub fn parse_path_str(source: &str, config: &ParserConfig) -> Result<PropertyPath, ParseError> {
    let mut tokens = TokenQueue::tokenize(source)?;
    let path = PathParser::new(config).parse(&mut tokens)?;
    match tokens.dequeue() {
        Some(extra) => Err(parse::unexpected(&extra, "expected the end of the property path")),
        None => Ok(path),
    }
}
