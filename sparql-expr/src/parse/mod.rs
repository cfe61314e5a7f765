//! SPARQL expression and property path parsers.
//!
//! Both parsers consume a [`TokenQueue`] front to back and build the typed
//! AST from [`crate::ast`]. They are configured by an immutable
//! [`ParserConfig`] and reach the enclosing query parser only through the
//! [`GraphPatternParser`] trait (for `EXISTS`).
//!
//! ## Usage
//!
//! ```
//! use sparql_expr::parse::{ExpressionParser, ParserConfig, TokenQueue};
//!
//! let config = ParserConfig::default();
//! let mut tokens = TokenQueue::tokenize("?age >= 18 && BOUND(?name)").unwrap();
//! let expr = ExpressionParser::new(&config).parse(&mut tokens).unwrap();
//! assert!(tokens.is_empty());
//! # let _ = expr;
//! ```

pub mod config;
pub mod expr;
pub mod iri;
pub mod path;
mod queue;

pub use config::{
    ExpressionFactory, ExtensionCall, GraphPatternParser, NamespaceResolver, ParserConfig,
    SyntaxMode,
};
pub use expr::{BracketedArg, ExpressionParser};
pub use iri::{resolve_reference, PrefixMap};
pub use path::{gather_path_tokens, PathParser};
pub use queue::TokenQueue;

pub(crate) use queue::unexpected;

use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{Token, TokenKind};
use sparql_vocab::rdf;

/// Resolve an IRI, prefixed name or `a` token to an absolute IRI.
pub(crate) fn resolve_iri_token(config: &ParserConfig, token: &Token) -> Result<String, ParseError> {
    let base = config.base_iri();
    match token.kind {
        TokenKind::Iri => Ok(config.resolver().resolve_iri(&token.text, base)),
        TokenKind::QName => config
            .resolver()
            .resolve_qname(&token.text, base)
            .ok_or_else(|| {
                let prefix = token.text.split(':').next().unwrap_or_default();
                ParseError::new(
                    ParseErrorKind::UnresolvedPrefix,
                    DiagCode::UndefinedPrefix,
                    format!("Unable to resolve the prefixed name '{}', prefix '{prefix}:' is not defined", token.text),
                )
                .with_token(token.summary())
            }),
        TokenKind::KwA => Ok(rdf::TYPE.to_string()),
        _ => Err(unexpected(token, "expected an IRI or prefixed name")),
    }
}

/// A construct not available in the configured syntax mode.
pub(crate) fn restriction(token: &Token, code: DiagCode, message: impl Into<String>) -> ParseError {
    ParseError::new(ParseErrorKind::SemanticRestriction, code, message).with_token(token.summary())
}

/// Wrong number of arguments for a call.
pub(crate) fn wrong_arity(token: &Token, message: impl Into<String>) -> ParseError {
    ParseError::new(ParseErrorKind::UnexpectedToken, DiagCode::WrongArity, message)
        .with_token(token.summary())
}
