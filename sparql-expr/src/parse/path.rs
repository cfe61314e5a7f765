//! SPARQL Property Path parsing.
//!
//! Paths are parsed in two stages. [`gather_path_tokens`] walks the input
//! one token at a time and decides where the path ends, since a path sits
//! between the subject and object of a triple pattern and has no closing
//! delimiter of its own. The gathered run is then parsed by recursive
//! descent.
//!
//! ## Grammar
//!
//! ```text
//! Path          ::= PathSequence ( '|' PathSequence )*
//! PathSequence  ::= PathEltOrInverse ( '/' PathEltOrInverse | '^' PathElt )*
//! PathEltOrInverse ::= PathElt | '^' PathElt
//! PathElt       ::= PathPrimary PathMod?
//! PathMod       ::= '*' | '+' | '?' | '{' Cardinality '}'
//! Cardinality   ::= n | n ',' | ',' m | n ',' m
//! PathPrimary   ::= iri | 'a' | '!' PathNegatedPropertySet | '(' Path ')'
//! PathNegatedPropertySet ::= PathOneInPropertySet
//!                          | '(' PathOneInPropertySet ( '|' PathOneInPropertySet )* ')'
//! PathOneInPropertySet   ::= iri | 'a' | '^' ( iri | 'a' )
//! ```
//!
//! ## Precedence (lowest to highest)
//!
//! 1. Alternative `|`
//! 2. Sequence `/` (and `^` used as a sequencer)
//! 3. Inverse `^`
//! 4. Modifiers `*`, `+`, `?`, `{n,m}`
//! 5. Primary (IRI, `a`, negated set, grouped)

use crate::ast::path::{Cardinality, PropertyPath};
use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{Token, TokenKind};
use crate::parse::{
    resolve_iri_token, restriction, unexpected, ParserConfig, SyntaxMode, TokenQueue,
};
use crate::span::SourceSpan;
use std::sync::Arc;
use tracing::{debug_span, trace};

/// What the last gathered token was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PathState {
    None,
    /// An IRI, `a` or a closed group
    Predicate,
    /// `*`, `+`, `?` or a `{...}` cardinality
    Modifier,
    /// `/`, `|` or `^`
    Sequencer,
    /// `!`
    Negation,
    End,
}

/// Move the tokens of one property path from `tokens` into a new queue.
///
/// The token that ends the path (the object of the triple pattern, a `.`,
/// a collection `(`...) is left at the front of `tokens`. Running out of
/// tokens also ends the path.
pub fn gather_path_tokens(tokens: &mut TokenQueue) -> Result<TokenQueue, ParseError> {
    let first = tokens.next_or_eof("a property path")?;
    let mut depth = 0usize;
    let mut state = match first.kind {
        TokenKind::LParen => {
            depth = 1;
            PathState::Predicate
        }
        TokenKind::Iri | TokenKind::QName | TokenKind::KwA => PathState::Predicate,
        TokenKind::Caret => PathState::Sequencer,
        TokenKind::Bang => PathState::Negation,
        _ => {
            return Err(unexpected(&first, "this is not valid as the start of a property path"));
        }
    };
    trace!(from = ?PathState::None, to = ?state, kind = %first.kind, "path state");

    let mut path = TokenQueue::default();
    path.push(first);
    let mut last_sequencer = None;

    while state != PathState::End {
        let Some(kind) = tokens.peek_kind() else {
            break;
        };

        if depth > 0 {
            let token = tokens.next_or_eof("a property path")?;
            match kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    state = PathState::Predicate;
                }
                _ => {}
            }
            path.push(token);
            continue;
        }

        let next = match kind {
            TokenKind::LParen => match state {
                PathState::Predicate | PathState::Modifier => PathState::End,
                PathState::Sequencer | PathState::Negation => {
                    depth = 1;
                    path.push(tokens.next_or_eof("'('")?);
                    PathState::Predicate
                }
                _ => return Err(misplaced(tokens, "path groups can only follow a sequencing token")),
            },
            TokenKind::LBrace => {
                if state != PathState::Predicate {
                    return Err(misplaced(
                        tokens,
                        "cardinality modifiers can only follow a predicate or path group",
                    ));
                }
                gather_cardinality(tokens, &mut path)?;
                PathState::Modifier
            }
            TokenKind::Plus | TokenKind::Question | TokenKind::Star => {
                if state != PathState::Predicate {
                    return Err(misplaced(
                        tokens,
                        "cardinality modifiers can only follow a predicate or path group",
                    ));
                }
                path.push(tokens.next_or_eof("a path modifier")?);
                PathState::Modifier
            }
            TokenKind::Pipe | TokenKind::Slash | TokenKind::Caret => {
                let after_operand = matches!(state, PathState::Predicate | PathState::Modifier);
                // `/^` and `|^` chain an inverse onto a sequencer
                let inverse_after_sequencer = state == PathState::Sequencer
                    && kind == TokenKind::Caret
                    && matches!(last_sequencer, Some(TokenKind::Slash | TokenKind::Pipe));
                if !after_operand && !inverse_after_sequencer {
                    return Err(misplaced(
                        tokens,
                        "path sequencing tokens can only follow a predicate or path group",
                    ));
                }
                path.push(tokens.next_or_eof("a path sequencer")?);
                last_sequencer = Some(kind);
                PathState::Sequencer
            }
            TokenKind::Iri | TokenKind::QName | TokenKind::KwA => match state {
                PathState::None | PathState::Sequencer | PathState::Negation => {
                    path.push(tokens.next_or_eof("a predicate")?);
                    PathState::Predicate
                }
                _ => PathState::End,
            },
            TokenKind::Bang => {
                if state != PathState::Sequencer {
                    return Err(misplaced(tokens, "negated property sets can only follow a sequencing token"));
                }
                path.push(tokens.next_or_eof("'!'")?);
                PathState::Negation
            }
            _ => match state {
                PathState::None | PathState::Sequencer => {
                    return Err(misplaced(tokens, "expected a predicate in the property path"));
                }
                _ => PathState::End,
            },
        };

        if next != state {
            trace!(from = ?state, to = ?next, %kind, "path state");
        }
        state = next;
    }

    Ok(path)
}

/// Copy a `{...}` cardinality group from `tokens` into `path`.
fn gather_cardinality(tokens: &mut TokenQueue, path: &mut TokenQueue) -> Result<(), ParseError> {
    path.push(tokens.next_or_eof("'{'")?);
    loop {
        let token = tokens.next_or_eof("'}' to close the path cardinality")?;
        match token.kind {
            TokenKind::LBrace => {
                return Err(ParseError::new(
                    ParseErrorKind::NestingNotAllowed,
                    DiagCode::NestedCardinality,
                    "Nested cardinality modifiers are not permitted in property paths",
                )
                .with_token(token.summary()));
            }
            TokenKind::RBrace => {
                path.push(token);
                return Ok(());
            }
            _ => path.push(token),
        }
    }
}

/// Error pointing at the front token of `tokens`.
fn misplaced(tokens: &TokenQueue, context: &str) -> ParseError {
    match tokens.peek() {
        Some(token) => unexpected(token, context),
        None => ParseError::end_of_input(context),
    }
}

/// Parses SPARQL property paths under a [`ParserConfig`].
#[derive(Clone, Copy, Debug)]
pub struct PathParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> PathParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Parse the property path at the front of `tokens`.
    ///
    /// Only the tokens belonging to the path are consumed.
    pub fn parse(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        let _span = debug_span!(
            "sparql_path_parse",
            tokens = tokens.len(),
            syntax = %self.config.syntax()
        )
        .entered();

        let mut path_tokens = gather_path_tokens(tokens)?;
        trace!(gathered = path_tokens.len(), "gathered property path");

        let path = self.parse_alternative(&mut path_tokens)?;
        match path_tokens.dequeue() {
            Some(extra) => Err(unexpected(&extra, "expected the end of the property path")),
            None => Ok(path),
        }
    }

    /// `path1 | path2 | ...`
    fn parse_alternative(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        let mut left = self.parse_sequence(tokens)?;
        while tokens.eat(TokenKind::Pipe).is_some() {
            let right = self.parse_sequence(tokens)?;
            left = PropertyPath::alternative(left, right);
        }
        Ok(left)
    }

    /// `path1 / path2 / ...`, where `p ^ q` reads as `p / ^q`.
    fn parse_sequence(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        let mut left = self.parse_elt_or_inverse(tokens)?;
        loop {
            match tokens.peek_kind() {
                Some(TokenKind::Slash) => {
                    tokens.dequeue();
                    let right = self.parse_elt_or_inverse(tokens)?;
                    left = PropertyPath::sequence(left, right);
                }
                Some(TokenKind::Caret) => {
                    let caret = tokens.next_or_eof("'^'")?;
                    let elt = self.parse_elt(tokens)?;
                    let span = caret.span.union(elt.span());
                    left = PropertyPath::sequence(left, PropertyPath::inverse(elt, span));
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_elt_or_inverse(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        match tokens.eat(TokenKind::Caret) {
            Some(caret) => {
                let elt = self.parse_elt(tokens)?;
                let span = caret.span.union(elt.span());
                Ok(PropertyPath::inverse(elt, span))
            }
            None => self.parse_elt(tokens),
        }
    }

    /// Reject the `{n,m}` forms in SPARQL 1.1 mode.
    fn check_cardinality_allowed(&self, tokens: &TokenQueue) -> Result<(), ParseError> {
        match tokens.peek() {
            Some(open) if self.config.syntax() == SyntaxMode::Sparql11 => Err(restriction(
                open,
                DiagCode::RequiresExtendedSyntax,
                "The {} cardinality forms for property paths are not supported in SPARQL 1.1",
            )),
            _ => Ok(()),
        }
    }

    /// A primary with an optional modifier.
    fn parse_elt(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        let primary = self.parse_primary(tokens)?;
        let cardinality = match tokens.peek_kind() {
            Some(TokenKind::Star) => Cardinality::ZeroOrMore,
            Some(TokenKind::Plus) => Cardinality::OneOrMore,
            Some(TokenKind::Question) => Cardinality::ZeroOrOne,
            Some(TokenKind::LBrace) => {
                self.check_cardinality_allowed(tokens)?;
                let (cardinality, end) = parse_cardinality(tokens)?;
                let span = primary.span().union(end);
                return Ok(primary.with_cardinality(cardinality, span));
            }
            _ => return Ok(primary),
        };
        let modifier = tokens.next_or_eof("a path modifier")?;
        let span = primary.span().union(modifier.span);
        Ok(primary.with_cardinality(cardinality, span))
    }

    fn parse_primary(&self, tokens: &mut TokenQueue) -> Result<PropertyPath, ParseError> {
        let token = tokens.next_or_eof("a predicate in the property path")?;
        match token.kind {
            TokenKind::Iri | TokenKind::QName | TokenKind::KwA => {
                let iri = resolve_iri_token(self.config, &token)?;
                Ok(PropertyPath::property(iri, token.span))
            }
            TokenKind::LParen => {
                let path = self.parse_alternative(tokens)?;
                tokens.expect(TokenKind::RParen, "')' to close the path group")?;
                Ok(path)
            }
            TokenKind::Bang => self.parse_negated_set(&token, tokens),
            _ => Err(unexpected(&token, "expected a predicate, '!' or '(' in the property path")),
        }
    }

    /// The members after `!`, split into forward and inverse predicates.
    fn parse_negated_set(
        &self,
        bang: &Token,
        tokens: &mut TokenQueue,
    ) -> Result<PropertyPath, ParseError> {
        let mut forward: Vec<Arc<str>> = Vec::new();
        let mut inverse: Vec<Arc<str>> = Vec::new();
        let mut add = |(iri, is_inverse): (Arc<str>, bool)| {
            let members = if is_inverse { &mut inverse } else { &mut forward };
            if !members.contains(&iri) {
                members.push(iri);
            }
        };

        let end = match tokens.peek_kind() {
            Some(TokenKind::LParen) => {
                tokens.dequeue();
                loop {
                    if let Some(close) = tokens.eat(TokenKind::RParen) {
                        break close.span;
                    }
                    let (member, _) = self.parse_one_in_set(tokens)?;
                    add(member);
                    match tokens.peek_kind() {
                        Some(TokenKind::Pipe) => {
                            tokens.dequeue();
                            if let Some(close) = tokens.peek().filter(|t| t.is(TokenKind::RParen)) {
                                return Err(invalid_negated_set(
                                    close,
                                    "A '|' in a negated property set must be followed by another member",
                                ));
                            }
                        }
                        Some(TokenKind::RParen) => {}
                        _ => {
                            return Err(misplaced(tokens, "expected '|' or ')' in the negated property set"));
                        }
                    }
                }
            }
            _ => {
                let (member, span) = self.parse_one_in_set(tokens)?;
                add(member);
                span
            }
        };

        if forward.is_empty() && inverse.is_empty() {
            return Err(invalid_negated_set(bang, "A negated property set must not be empty"));
        }
        trace!(forward = forward.len(), inverse = inverse.len(), "negated property set");
        Ok(PropertyPath::NegatedSet {
            forward,
            inverse,
            span: bang.span.union(end),
        })
    }

    /// `iri`, `a` or `^iri`, returning the IRI and whether it is inverted.
    fn parse_one_in_set(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<((Arc<str>, bool), SourceSpan), ParseError> {
        let token = tokens.next_or_eof("a member of the negated property set")?;
        let (is_inverse, predicate) = match token.kind {
            TokenKind::Caret => (true, tokens.next_or_eof("a predicate after '^'")?),
            _ => (false, token.clone()),
        };
        if !matches!(predicate.kind, TokenKind::Iri | TokenKind::QName | TokenKind::KwA) {
            return Err(unexpected(
                &predicate,
                "expected an IRI, prefixed name or 'a' in the negated property set",
            ));
        }
        let iri = resolve_iri_token(self.config, &predicate)?;
        Ok(((Arc::from(iri), is_inverse), token.span.union(predicate.span)))
    }
}

/// `{n}`, `{n,}`, `{,m}` or `{n,m}`, returning the normalized bound and the
/// span of the group.
fn parse_cardinality(tokens: &mut TokenQueue) -> Result<(Cardinality, SourceSpan), ParseError> {
    let open = tokens.expect(TokenKind::LBrace, "'{'")?;

    let min = match tokens.peek_kind() {
        Some(TokenKind::PlainLiteral) => Some(cardinality_bound(&tokens.next_or_eof("a bound")?)?),
        _ => None,
    };
    let max = match tokens.eat(TokenKind::Comma) {
        Some(_) => match tokens.peek_kind() {
            Some(TokenKind::PlainLiteral) => {
                Some(cardinality_bound(&tokens.next_or_eof("a bound")?)?)
            }
            _ => None,
        },
        // `{n}` fixes both bounds
        None => min,
    };
    let close = tokens.expect(TokenKind::RBrace, "'}' to close the path cardinality")?;

    let cardinality = Cardinality::from_bounds(min, max).ok_or_else(|| {
        let reason = match (min, max) {
            (None, None) => "at least one bound is required".to_string(),
            (Some(n), Some(m)) if m < n => {
                format!("the maximum {m} is less than the minimum {n}")
            }
            _ => "the maximum must be greater than zero".to_string(),
        };
        ParseError::new(
            ParseErrorKind::InvalidCardinality,
            DiagCode::InvalidCardinality,
            format!("Invalid path cardinality, {reason}"),
        )
        .with_token(open.summary())
    })?;
    Ok((cardinality, open.span.union(close.span)))
}

fn cardinality_bound(token: &Token) -> Result<u32, ParseError> {
    let invalid = |reason: &str| {
        ParseError::new(
            ParseErrorKind::InvalidCardinality,
            DiagCode::InvalidCardinality,
            format!("The value '{}' is not valid as a path cardinality, {reason}", token.text),
        )
        .with_token(token.summary())
    };
    let value: i64 = token
        .text
        .parse()
        .map_err(|_| invalid("expected an integer"))?;
    if value < 0 {
        return Err(invalid("bounds must not be negative"));
    }
    u32::try_from(value).map_err(|_| invalid("the bound is too large"))
}

fn invalid_negated_set(token: &Token, message: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::InvalidNegatedSet,
        DiagCode::InvalidNegatedSet,
        message,
    )
    .with_token(token.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::PrefixMap;
    use sparql_vocab::rdf;

    const EX: &str = "http://example.org/";

    fn config() -> ParserConfig {
        ParserConfig::new()
            .with_syntax(SyntaxMode::Extended)
            .with_resolver(Arc::new(PrefixMap::default().with("ex", EX)))
    }

    fn ex(local: &str) -> Arc<str> {
        Arc::from(format!("{EX}{local}"))
    }

    /// Parse a path and return it with the tokens left behind.
    fn parse_rest(input: &str) -> Result<(PropertyPath, TokenQueue), ParseError> {
        let config = config();
        let mut tokens = TokenQueue::tokenize(input)?;
        let path = PathParser::new(&config).parse(&mut tokens)?;
        Ok((path, tokens))
    }

    fn parse(input: &str) -> PropertyPath {
        let (path, rest) = parse_rest(input).unwrap();
        assert!(rest.is_empty(), "tokens left after {input}");
        path
    }

    fn parse_err(input: &str) -> ParseError {
        parse_rest(input).unwrap_err()
    }

    fn iri(path: &PropertyPath) -> &str {
        match path {
            PropertyPath::Property { iri, .. } => iri,
            other => panic!("Expected property, got {other:?}"),
        }
    }

    fn rest_kinds(rest: &TokenQueue) -> Vec<TokenKind> {
        rest.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_predicate() {
        let path = parse("ex:knows");
        assert_eq!(iri(&path), &*ex("knows"));

        let path = parse("<http://example.org/name>");
        assert_eq!(iri(&path), &*ex("name"));
    }

    #[test]
    fn test_a_is_rdf_type() {
        assert_eq!(iri(&parse("a")), rdf::TYPE);
    }

    #[test]
    fn test_sequence_stops_before_dot() {
        let (path, rest) = parse_rest("ex:a/ex:b .").unwrap();
        match path {
            PropertyPath::Sequence { left, right, .. } => {
                assert_eq!(iri(&left), &*ex("a"));
                assert_eq!(iri(&right), &*ex("b"));
            }
            other => panic!("Expected sequence, got {other:?}"),
        }
        assert_eq!(rest_kinds(&rest), vec![TokenKind::Dot]);
    }

    #[test]
    fn test_path_stops_before_object() {
        let (path, rest) = parse_rest("ex:p* ?o").unwrap();
        assert!(matches!(path, PropertyPath::ZeroOrMore { .. }));
        assert_eq!(rest_kinds(&rest), vec![TokenKind::Var]);

        let (_, rest) = parse_rest("ex:p ex:o").unwrap();
        assert_eq!(rest_kinds(&rest), vec![TokenKind::QName]);
    }

    #[test]
    fn test_collection_object_ends_path() {
        let (path, rest) = parse_rest("ex:a (ex:b)").unwrap();
        assert!(path.is_simple());
        assert_eq!(
            rest_kinds(&rest),
            vec![TokenKind::LParen, TokenKind::QName, TokenKind::RParen]
        );
    }

    #[test]
    fn test_alternative_binds_looser_than_sequence() {
        match parse("ex:a/ex:b|ex:c") {
            PropertyPath::Alternative { left, right, .. } => {
                assert!(matches!(*left, PropertyPath::Sequence { .. }));
                assert_eq!(iri(&right), &*ex("c"));
            }
            other => panic!("Expected alternative, got {other:?}"),
        }
    }

    #[test]
    fn test_inverse_and_inverse_after_sequencer() {
        match parse("^ex:parent") {
            PropertyPath::Inverse { path, .. } => assert_eq!(iri(&path), &*ex("parent")),
            other => panic!("Expected inverse, got {other:?}"),
        }

        match parse("ex:a/^ex:b") {
            PropertyPath::Sequence { right, .. } => {
                assert!(matches!(*right, PropertyPath::Inverse { .. }));
            }
            other => panic!("Expected sequence, got {other:?}"),
        }

        match parse("ex:a|^ex:b") {
            PropertyPath::Alternative { right, .. } => {
                assert!(matches!(*right, PropertyPath::Inverse { .. }));
            }
            other => panic!("Expected alternative, got {other:?}"),
        }
    }

    #[test]
    fn test_caret_as_sequencer() {
        match parse("ex:a^ex:b") {
            PropertyPath::Sequence { left, right, .. } => {
                assert_eq!(iri(&left), &*ex("a"));
                match *right {
                    PropertyPath::Inverse { path, .. } => assert_eq!(iri(&path), &*ex("b")),
                    other => panic!("Expected inverse, got {other:?}"),
                }
            }
            other => panic!("Expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_modifiers() {
        assert!(matches!(parse("ex:p*"), PropertyPath::ZeroOrMore { .. }));
        assert!(matches!(parse("ex:p+"), PropertyPath::OneOrMore { .. }));
        assert!(matches!(parse("ex:p?"), PropertyPath::ZeroOrOne { .. }));
    }

    #[test]
    fn test_group_with_modifier() {
        match parse("(ex:a/ex:b)+") {
            PropertyPath::OneOrMore { path, .. } => {
                assert!(matches!(*path, PropertyPath::Sequence { .. }));
            }
            other => panic!("Expected one-or-more, got {other:?}"),
        }

        match parse("ex:a/(ex:b|(ex:c/ex:d))") {
            PropertyPath::Sequence { right, .. } => match *right {
                PropertyPath::Alternative { right, .. } => {
                    assert!(matches!(*right, PropertyPath::Sequence { .. }));
                }
                other => panic!("Expected alternative, got {other:?}"),
            },
            other => panic!("Expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_cardinality_forms() {
        assert!(matches!(
            parse("ex:p{2}"),
            PropertyPath::FixedCardinality { n: 2, .. }
        ));
        assert!(matches!(
            parse("ex:p{2,2}"),
            PropertyPath::FixedCardinality { n: 2, .. }
        ));
        assert!(matches!(parse("ex:p{0,}"), PropertyPath::ZeroOrMore { .. }));
        assert!(matches!(parse("ex:p{1,}"), PropertyPath::OneOrMore { .. }));
        assert!(matches!(parse("ex:p{3,}"), PropertyPath::NOrMore { n: 3, .. }));
        assert!(matches!(parse("ex:p{,1}"), PropertyPath::ZeroOrOne { .. }));
        assert!(matches!(parse("ex:p{,3}"), PropertyPath::ZeroToN { n: 3, .. }));
        assert!(matches!(
            parse("ex:p{1,3}"),
            PropertyPath::NToM { n: 1, m: 3, .. }
        ));
    }

    #[test]
    fn test_cardinality_rejected_in_sparql11() {
        let config = config().with_syntax(SyntaxMode::Sparql11);
        for input in ["ex:p{2}", "ex:p{1,3}", "(ex:p|ex:q){,2}", "^ex:p{3,}"] {
            let mut tokens = TokenQueue::tokenize(input).unwrap();
            let err = PathParser::new(&config).parse(&mut tokens).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::SemanticRestriction, "{input}");
            assert_eq!(err.code, DiagCode::RequiresExtendedSyntax, "{input}");
            assert_eq!(err.token.map(|t| t.text), Some(Arc::from("{")), "{input}");
        }

        // Other modifiers are plain SPARQL 1.1
        let mut tokens = TokenQueue::tokenize("ex:p+/ex:q?").unwrap();
        assert!(PathParser::new(&config).parse(&mut tokens).is_ok());
    }

    #[test]
    fn test_cardinality_allowed_in_sparql10() {
        let config = config().with_syntax(SyntaxMode::Sparql10);
        let mut tokens = TokenQueue::tokenize("ex:p{2}").unwrap();
        let path = PathParser::new(&config).parse(&mut tokens).unwrap();
        assert!(matches!(path, PropertyPath::FixedCardinality { n: 2, .. }));
    }

    #[test]
    fn test_cardinality_span_covers_braces() {
        let path = parse("ex:p{1,3}");
        let span = path.span();
        assert_eq!((span.start.col, span.end.col), (1, 10));
    }

    #[test]
    fn test_invalid_cardinality() {
        for input in ["ex:p{3,1}", "ex:p{,0}", "ex:p{}", "ex:p{-1}", "ex:p{1.5}"] {
            let err = parse_err(input);
            assert_eq!(err.kind, ParseErrorKind::InvalidCardinality, "{input}");
            assert_eq!(err.code, DiagCode::InvalidCardinality, "{input}");
        }
    }

    #[test]
    fn test_nested_cardinality() {
        let err = parse_err("ex:p{1,{2}}");
        assert_eq!(err.kind, ParseErrorKind::NestingNotAllowed);
        assert_eq!(err.code, DiagCode::NestedCardinality);
    }

    #[test]
    fn test_cardinality_must_follow_predicate() {
        let err = parse_err("ex:p*{2}");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

        let err = parse_err("ex:p+?");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_negated_single() {
        match parse("!ex:p") {
            PropertyPath::NegatedSet {
                forward, inverse, ..
            } => {
                assert_eq!(forward, vec![ex("p")]);
                assert!(inverse.is_empty());
            }
            other => panic!("Expected negated set, got {other:?}"),
        }
    }

    #[test]
    fn test_negated_set_partitions_and_dedups() {
        match parse("!(ex:a|^ex:b|a|ex:a|^ex:b|^ex:c)") {
            PropertyPath::NegatedSet {
                forward, inverse, ..
            } => {
                assert_eq!(forward, vec![ex("a"), Arc::from(rdf::TYPE)]);
                assert_eq!(inverse, vec![ex("b"), ex("c")]);
            }
            other => panic!("Expected negated set, got {other:?}"),
        }
    }

    #[test]
    fn test_negated_set_after_sequencer() {
        match parse("ex:a/!(^ex:b)") {
            PropertyPath::Sequence { right, .. } => match *right {
                PropertyPath::NegatedSet {
                    forward, inverse, ..
                } => {
                    assert!(forward.is_empty());
                    assert_eq!(inverse, vec![ex("b")]);
                }
                other => panic!("Expected negated set, got {other:?}"),
            },
            other => panic!("Expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_negated_sets() {
        let err = parse_err("!()");
        assert_eq!(err.kind, ParseErrorKind::InvalidNegatedSet);
        assert_eq!(err.code, DiagCode::InvalidNegatedSet);

        let err = parse_err("!(ex:a|)");
        assert_eq!(err.kind, ParseErrorKind::InvalidNegatedSet);

        let err = parse_err("!(ex:a ex:b)");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_invalid_start() {
        for input in ["?x", "/ex:p", "*", "\"p\""] {
            let err = parse_err(input);
            assert_eq!(err.kind, ParseErrorKind::UnexpectedToken, "{input}");
        }
        let err = parse_err("");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_misplaced_sequencers() {
        assert_eq!(parse_err("ex:a//ex:b").kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_err("ex:a/ ?o").kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(parse_err("ex:a !ex:b").kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_dangling_sequencer_at_end_of_input() {
        let err = parse_err("ex:a/");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse_err("(ex:a/ex:b");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_undefined_prefix() {
        let err = parse_err("nope:p");
        assert_eq!(err.kind, ParseErrorKind::UnresolvedPrefix);
        assert_eq!(err.code, DiagCode::UndefinedPrefix);
    }

    #[test]
    fn test_gather_leaves_terminator() {
        let mut tokens = TokenQueue::tokenize("ex:a/ex:b* ; ex:c ?o").unwrap();
        let gathered = gather_path_tokens(&mut tokens).unwrap();
        assert_eq!(gathered.len(), 4);
        assert_eq!(tokens.peek_kind(), Some(TokenKind::Semicolon));
    }
}
