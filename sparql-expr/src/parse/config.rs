//! Parser configuration and the collaborator traits it carries.
//!
//! A [`ParserConfig`] is built once with `with_*` methods and then only read.
//! Parsers that need a variation (aggregate arguments must not contain
//! aggregates) derive a new value instead of mutating the caller's.

use super::iri::PrefixMap;
use super::queue::TokenQueue;
use crate::ast::{Expression, PatternHandle};
use crate::diag::ParseError;
use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// SPARQL dialect accepted by the parsers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxMode {
    /// SPARQL 1.0: no aggregates, no EXISTS, 1.0 built-ins only
    Sparql10,
    /// SPARQL 1.1
    #[default]
    Sparql11,
    /// SPARQL 1.1 plus CALL, MEDIAN/MODE/NMIN/NMAX and scalar arguments
    Extended,
}

impl SyntaxMode {
    /// Configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxMode::Sparql10 => "sparql10",
            SyntaxMode::Sparql11 => "sparql11",
            SyntaxMode::Extended => "extended",
        }
    }
}

impl fmt::Display for SyntaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the token run of an `EXISTS { ... }` body into a graph pattern.
///
/// The expression parser gathers the balanced `{...}` run (braces included)
/// and hands it over without interpreting it.
pub trait GraphPatternParser: Send + Sync {
    /// Parse `tokens` into a pattern. `allow_sub_select` is always `true`
    /// for EXISTS bodies.
    fn parse_pattern(
        &self,
        tokens: TokenQueue,
        allow_sub_select: bool,
    ) -> Result<PatternHandle, ParseError>;
}

/// Turns prefixed names and relative IRIs into absolute IRIs.
pub trait NamespaceResolver: Send + Sync {
    /// Expand `prefix:local`; `None` if the prefix is unknown.
    fn resolve_qname(&self, qname: &str, base: Option<&str>) -> Option<String>;

    /// Resolve a possibly relative IRI against `base`.
    fn resolve_iri(&self, iri: &str, base: Option<&str>) -> String;
}

/// An IRI applied to arguments, offered to each [`ExpressionFactory`].
#[derive(Clone, Copy, Debug)]
pub struct ExtensionCall<'a> {
    /// Absolute function IRI
    pub iri: &'a str,
    /// Positional arguments
    pub args: &'a [Expression],
    /// Whether the argument list began with `DISTINCT`
    pub distinct: bool,
    /// Named arguments after `;` (extended syntax)
    pub scalar_args: &'a BTreeMap<Arc<str>, Expression>,
    /// Span of the whole call
    pub span: SourceSpan,
}

/// Builds custom expressions for extension function IRIs.
pub trait ExpressionFactory: Send + Sync {
    /// Build an expression for `call`, or `None` to let the next factory try.
    fn try_create(&self, call: &ExtensionCall<'_>) -> Option<Expression>;
}

/// Expression and path parser settings.
#[derive(Clone)]
pub struct ParserConfig {
    syntax: SyntaxMode,
    allow_aggregates: bool,
    validate_typed_literals: bool,
    base_iri: Option<Arc<str>>,
    resolver: Arc<dyn NamespaceResolver>,
    factories: Vec<Arc<dyn ExpressionFactory>>,
    pattern_parser: Option<Arc<dyn GraphPatternParser>>,
}

impl ParserConfig {
    /// SPARQL 1.1, aggregates off, typed literal validation on, and the
    /// default [`PrefixMap`].
    pub fn new() -> Self {
        Self {
            syntax: SyntaxMode::default(),
            allow_aggregates: false,
            validate_typed_literals: true,
            base_iri: None,
            resolver: Arc::new(PrefixMap::default()),
            factories: Vec::new(),
            pattern_parser: None,
        }
    }

    pub fn with_syntax(mut self, syntax: SyntaxMode) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_aggregates(mut self, allow: bool) -> Self {
        self.allow_aggregates = allow;
        self
    }

    pub fn with_typed_literal_validation(mut self, validate: bool) -> Self {
        self.validate_typed_literals = validate;
        self
    }

    pub fn with_base_iri(mut self, base: impl Into<Arc<str>>) -> Self {
        self.base_iri = Some(base.into());
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn NamespaceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Append a factory; factories are consulted in insertion order.
    pub fn with_factory(mut self, factory: Arc<dyn ExpressionFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn with_pattern_parser(mut self, parser: Arc<dyn GraphPatternParser>) -> Self {
        self.pattern_parser = Some(parser);
        self
    }

    pub fn syntax(&self) -> SyntaxMode {
        self.syntax
    }

    pub fn allow_aggregates(&self) -> bool {
        self.allow_aggregates
    }

    pub fn validate_typed_literals(&self) -> bool {
        self.validate_typed_literals
    }

    pub fn base_iri(&self) -> Option<&str> {
        self.base_iri.as_deref()
    }

    pub fn resolver(&self) -> &dyn NamespaceResolver {
        self.resolver.as_ref()
    }

    pub fn factories(&self) -> &[Arc<dyn ExpressionFactory>] {
        &self.factories
    }

    pub fn pattern_parser(&self) -> Option<&dyn GraphPatternParser> {
        self.pattern_parser.as_deref()
    }

    /// This configuration with aggregates disabled.
    pub(crate) fn without_aggregates(&self) -> Self {
        Self {
            allow_aggregates: false,
            ..self.clone()
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("syntax", &self.syntax)
            .field("allow_aggregates", &self.allow_aggregates)
            .field("validate_typed_literals", &self.validate_typed_literals)
            .field("base_iri", &self.base_iri)
            .field("factories", &self.factories.len())
            .field("pattern_parser", &self.pattern_parser.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.syntax(), SyntaxMode::Sparql11);
        assert!(!config.allow_aggregates());
        assert!(config.validate_typed_literals());
        assert!(config.base_iri().is_none());
        assert!(config.pattern_parser().is_none());
        assert!(config.factories().is_empty());
        assert!(config
            .resolver()
            .resolve_qname("rdf:type", None)
            .is_some());
    }

    #[test]
    fn test_derived_config_leaves_original_untouched() {
        let config = ParserConfig::new()
            .with_aggregates(true)
            .with_syntax(SyntaxMode::Extended);
        let inner = config.without_aggregates();
        assert!(config.allow_aggregates());
        assert!(!inner.allow_aggregates());
        assert_eq!(inner.syntax(), SyntaxMode::Extended);
    }

    #[test]
    fn test_syntax_mode_names() {
        assert_eq!(SyntaxMode::Sparql10.to_string(), "sparql10");
        assert_eq!(SyntaxMode::Extended.as_str(), "extended");
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ParserConfig>();
    }
}
