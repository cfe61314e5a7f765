//! Shared helpers for sparql-expr integration tests.

// Not every test crate uses every helper.
#![allow(dead_code)]

pub mod span_capture;

use sparql_expr::ast::PatternHandle;
use sparql_expr::parse::{GraphPatternParser, PrefixMap};
use sparql_expr::{ParseError, ParserConfig, SyntaxMode, TokenQueue};
use std::sync::Arc;

pub const EX: &str = "http://example.org/";

/// `ex:` bound to [`EX`] on top of the default prefixes.
pub fn prefixes() -> Arc<PrefixMap> {
    Arc::new(PrefixMap::default().with("ex", EX))
}

/// SPARQL 1.1 with aggregates allowed and `ex:` bound.
pub fn sparql11() -> ParserConfig {
    ParserConfig::new()
        .with_resolver(prefixes())
        .with_aggregates(true)
        .with_pattern_parser(Arc::new(TokenTextPatterns))
}

/// Extended syntax with aggregates allowed and `ex:` bound.
pub fn extended() -> ParserConfig {
    sparql11().with_syntax(SyntaxMode::Extended)
}

/// Pattern handed back by [`TokenTextPatterns`].
#[derive(Debug, PartialEq)]
pub struct TokenTexts(pub Vec<String>);

/// Graph pattern parser that keeps the text of each token it is given.
pub struct TokenTextPatterns;

impl GraphPatternParser for TokenTextPatterns {
    fn parse_pattern(
        &self,
        tokens: TokenQueue,
        _allow_sub_select: bool,
    ) -> Result<PatternHandle, ParseError> {
        let texts = tokens.iter().map(|t| t.text.to_string()).collect();
        Ok(PatternHandle::new(TokenTexts(texts)))
    }
}

pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}
