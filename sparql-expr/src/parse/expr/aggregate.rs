//! Aggregates, scalar arguments and IRI-named function calls.
//!
//! Keyword aggregates (`COUNT`, `GROUP_CONCAT`, ...) and IRI-named calls share
//! the scalar argument syntax `; name = expr, ...` that follows the
//! positional arguments. `SEPARATOR` is the only keyword name; other names
//! are IRIs and need the extended syntax mode.

use super::ExpressionParser;
use crate::ast::{AggregateKind, Expression, Function};
use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{Token, TokenKind};
use crate::parse::config::ExtensionCall;
use crate::parse::queue::TokenQueue;
use crate::parse::{resolve_iri_token, unexpected, wrong_arity};
use crate::span::SourceSpan;
use crate::value::Term;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Scalar argument key for `GROUP_CONCAT(...; SEPARATOR = "...")`.
pub const SEPARATOR: &str = "SEPARATOR";

type ScalarArgs = BTreeMap<Arc<str>, Expression>;

/// Aggregate called by a keyword token.
pub(super) fn aggregate_for(kind: TokenKind) -> Option<AggregateKind> {
    Some(match kind {
        TokenKind::KwCount => AggregateKind::Count,
        TokenKind::KwSum => AggregateKind::Sum,
        TokenKind::KwAvg => AggregateKind::Avg,
        TokenKind::KwMin => AggregateKind::Min,
        TokenKind::KwMax => AggregateKind::Max,
        TokenKind::KwGroupConcat => AggregateKind::GroupConcat,
        TokenKind::KwSample => AggregateKind::Sample,
        TokenKind::KwMedian => AggregateKind::Median,
        TokenKind::KwMode => AggregateKind::Mode,
        TokenKind::KwNMin => AggregateKind::NMin,
        TokenKind::KwNMax => AggregateKind::NMax,
        _ => return None,
    })
}

pub(super) fn nested_aggregate(token: &Token, name: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::NestingNotAllowed,
        DiagCode::AggregateNotAllowed,
        format!("Aggregates are not permitted in this expression, or {name} is nested inside another aggregate"),
    )
    .with_token(token.summary())
}

impl ExpressionParser<'_> {
    /// Parse a keyword aggregate starting at its keyword.
    pub(super) fn parse_aggregate(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let keyword = tokens.next_or_eof("an aggregate")?;
        let Some(kind) = aggregate_for(keyword.kind) else {
            return Err(unexpected(&keyword, "expected an aggregate"));
        };
        self.require_sparql11(&keyword, "Aggregates")?;
        if kind.is_extension() {
            self.require_extended(&keyword, &format!("The {kind} aggregate"))?;
        }

        // Aggregate arguments never contain aggregates
        let inner_config = self.config.without_aggregates();
        let inner = ExpressionParser::new(&inner_config);

        tokens.expect(TokenKind::LParen, &format!("'(' after {kind}"))?;
        let distinct = match tokens.eat(TokenKind::KwDistinct) {
            Some(token) if kind == AggregateKind::Sample => {
                return Err(unexpected(&token, "DISTINCT is not valid for SAMPLE"));
            }
            Some(_) => true,
            None => false,
        };

        if matches!(tokens.peek_kind(), Some(TokenKind::KwAll | TokenKind::Star)) {
            let all = tokens.next_or_eof("'*'")?;
            if kind != AggregateKind::Count {
                return Err(unexpected(
                    &all,
                    format!("'*' and ALL are only valid for COUNT, not {kind}"),
                ));
            }
            let close = tokens.expect(TokenKind::RParen, "')' after '*' in COUNT")?;
            debug!(aggregate = %kind, distinct, "parsed COUNT(*)");
            return Ok(Expression::Aggregate {
                kind,
                arg: None,
                distinct,
                all: true,
                scalar_args: BTreeMap::new(),
                span: keyword.span.union(close.span),
            });
        }

        let mut args = Vec::new();
        let last = loop {
            let mut arg = inner.parse_bracketed(tokens, false)?;
            if arg.distinct {
                return Err(unexpected(
                    &arg.terminator,
                    format!("DISTINCT may only appear once, directly after {kind}("),
                ));
            }
            let Some(expr) = arg.expr.take() else {
                return Err(wrong_arity(
                    &arg.terminator,
                    format!("The {kind} aggregate requires an argument expression"),
                ));
            };
            args.push(expr);
            if arg.saw_semicolon || !arg.saw_comma {
                break arg;
            }
        };

        if args.len() > 1 {
            return Err(wrong_arity(
                &keyword,
                format!("The {kind} aggregate takes one argument expression, {} given", args.len()),
            ));
        }
        let arg = args.pop().map(Box::new);

        let (scalar_args, end) = if last.saw_semicolon {
            inner.parse_scalar_args(kind == AggregateKind::GroupConcat, tokens)?
        } else {
            (BTreeMap::new(), last.terminator.span)
        };

        if kind == AggregateKind::GroupConcat
            && !scalar_args.is_empty()
            && !scalar_args.contains_key(SEPARATOR)
        {
            return Err(unexpected(
                &last.terminator,
                "GROUP_CONCAT scalar arguments must include SEPARATOR",
            ));
        }

        debug!(aggregate = %kind, distinct, scalar_args = scalar_args.len(), "parsed aggregate");
        Ok(Expression::Aggregate {
            kind,
            arg,
            distinct,
            all: false,
            scalar_args,
            span: keyword.span.union(end),
        })
    }

    /// Parse `name = expr, ...` up to the closing `)`.
    ///
    /// A repeated name keeps the last value.
    fn parse_scalar_args(
        &self,
        allow_separator: bool,
        tokens: &mut TokenQueue,
    ) -> Result<(ScalarArgs, SourceSpan), ParseError> {
        let mut scalar_args = BTreeMap::new();
        loop {
            let name_token = tokens.next_or_eof("a scalar argument name")?;
            let name: Arc<str> = match name_token.kind {
                TokenKind::KwSeparator if allow_separator => Arc::from(SEPARATOR),
                TokenKind::KwSeparator => {
                    return Err(unexpected(
                        &name_token,
                        "SEPARATOR is only valid for GROUP_CONCAT",
                    ));
                }
                TokenKind::Iri | TokenKind::QName => {
                    self.require_extended(&name_token, "IRI-named scalar arguments")?;
                    Arc::from(resolve_iri_token(self.config, &name_token)?)
                }
                _ => {
                    return Err(unexpected(&name_token, "expected a scalar argument name"));
                }
            };

            tokens.expect(TokenKind::Eq, "'=' after a scalar argument name")?;
            let arg = self.parse_bracketed(tokens, false)?;
            if arg.distinct || arg.saw_semicolon {
                return Err(unexpected(&arg.terminator, "in scalar arguments"));
            }
            let Some(value) = arg.expr else {
                return Err(unexpected(
                    &arg.terminator,
                    format!("expected a value for the scalar argument {name}"),
                ));
            };
            scalar_args.insert(name, value);

            if !arg.saw_comma {
                return Ok((scalar_args, arg.terminator.span));
            }
        }
    }

    /// An IRI or prefixed name, applied to arguments if a `(` follows.
    ///
    /// Calls are offered to the configured factories in order, then checked
    /// against the extension aggregate IRIs, and otherwise become plain
    /// extension function calls.
    pub(super) fn parse_iri_or_function(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let name = tokens.next_or_eof("an IRI")?;
        let iri = resolve_iri_token(self.config, &name)?;

        if !tokens.check(TokenKind::LParen) {
            return Ok(Expression::constant(Term::iri(iri), name.span));
        }

        let mut args = Vec::new();
        let mut distinct = false;
        let mut require_open = true;
        let last = loop {
            let mut arg = self.parse_bracketed(tokens, require_open)?;
            require_open = false;
            if arg.distinct {
                if distinct || !args.is_empty() {
                    return Err(unexpected(
                        &arg.terminator,
                        "DISTINCT may only appear before the first argument",
                    ));
                }
                distinct = true;
                continue;
            }
            args.push(arg.expr.take());
            if arg.saw_semicolon || !arg.saw_comma {
                break arg;
            }
        };

        // `f()` gathers a single empty argument
        let args: Vec<Expression> = if matches!(args.as_slice(), [None]) {
            Vec::new()
        } else {
            args.into_iter()
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| unexpected(&last.terminator, "expected a function argument"))?
        };

        let (scalar_args, end) = if last.saw_semicolon {
            self.require_extended(&last.terminator, "Scalar arguments")?;
            self.parse_scalar_args(false, tokens)?
        } else {
            (BTreeMap::new(), last.terminator.span)
        };
        let span = name.span.union(end);

        let call = ExtensionCall {
            iri: &iri,
            args: &args,
            distinct,
            scalar_args: &scalar_args,
            span,
        };
        if let Some(expr) = self
            .config
            .factories()
            .iter()
            .find_map(|factory| factory.try_create(&call))
        {
            debug!(iri = %iri, "extension function built by factory");
            return Ok(expr);
        }

        if let Some(kind) = AggregateKind::from_iri(&iri) {
            if !self.config.allow_aggregates() {
                return Err(nested_aggregate(&name, &iri));
            }
            if args.len() > 1 {
                return Err(wrong_arity(
                    &name,
                    format!("The {kind} aggregate takes one argument expression, {} given", args.len()),
                ));
            }
            if args.iter().any(Expression::contains_aggregate) {
                return Err(nested_aggregate(&name, &iri));
            }
            debug!(aggregate = %kind, distinct, "parsed extension aggregate");
            return Ok(Expression::Aggregate {
                kind,
                arg: args.into_iter().next().map(Box::new),
                distinct,
                all: false,
                scalar_args,
                span,
            });
        }

        Ok(Expression::Call {
            function: Function::Extension {
                iri: Arc::from(iri),
                distinct,
                scalar_args,
            },
            args,
            span,
        })
    }
}
