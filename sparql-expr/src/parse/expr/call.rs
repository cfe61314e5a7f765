//! Built-in function calls and `EXISTS` / `NOT EXISTS`.

use super::ExpressionParser;
use crate::ast::{BuiltinFunction, Expression};
use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{Token, TokenKind};
use crate::parse::queue::TokenQueue;
use crate::parse::{unexpected, wrong_arity, SyntaxMode};
use crate::span::SourceSpan;
use tracing::debug;

/// Built-in function called by a keyword token.
pub(super) fn builtin_for(kind: TokenKind) -> Option<BuiltinFunction> {
    use BuiltinFunction as F;
    Some(match kind {
        TokenKind::KwStr => F::Str,
        TokenKind::KwLang => F::Lang,
        TokenKind::KwLangMatches => F::LangMatches,
        TokenKind::KwDatatype => F::Datatype,
        TokenKind::KwBound => F::Bound,
        TokenKind::KwSameTerm => F::SameTerm,
        TokenKind::KwIsIri => F::IsIri,
        TokenKind::KwIsUri => F::IsUri,
        TokenKind::KwIsBlank => F::IsBlank,
        TokenKind::KwIsLiteral => F::IsLiteral,
        TokenKind::KwIsNumeric => F::IsNumeric,
        TokenKind::KwIri => F::Iri,
        TokenKind::KwUri => F::Uri,
        TokenKind::KwBNode => F::BNode,
        TokenKind::KwStrDt => F::StrDt,
        TokenKind::KwStrLang => F::StrLang,
        TokenKind::KwUuid => F::Uuid,
        TokenKind::KwStrUuid => F::StrUuid,
        TokenKind::KwStrlen => F::Strlen,
        TokenKind::KwSubstr => F::Substr,
        TokenKind::KwUcase => F::Ucase,
        TokenKind::KwLcase => F::Lcase,
        TokenKind::KwStrStarts => F::StrStarts,
        TokenKind::KwStrEnds => F::StrEnds,
        TokenKind::KwContains => F::Contains,
        TokenKind::KwStrBefore => F::StrBefore,
        TokenKind::KwStrAfter => F::StrAfter,
        TokenKind::KwEncodeForUri => F::EncodeForUri,
        TokenKind::KwConcat => F::Concat,
        TokenKind::KwRegex => F::Regex,
        TokenKind::KwReplace => F::Replace,
        TokenKind::KwAbs => F::Abs,
        TokenKind::KwRound => F::Round,
        TokenKind::KwCeil => F::Ceil,
        TokenKind::KwFloor => F::Floor,
        TokenKind::KwRand => F::Rand,
        TokenKind::KwNow => F::Now,
        TokenKind::KwYear => F::Year,
        TokenKind::KwMonth => F::Month,
        TokenKind::KwDay => F::Day,
        TokenKind::KwHours => F::Hours,
        TokenKind::KwMinutes => F::Minutes,
        TokenKind::KwSeconds => F::Seconds,
        TokenKind::KwTimezone => F::Timezone,
        TokenKind::KwTz => F::Tz,
        TokenKind::KwMd5 => F::Md5,
        TokenKind::KwSha1 => F::Sha1,
        TokenKind::KwSha224 => F::Sha224,
        TokenKind::KwSha256 => F::Sha256,
        TokenKind::KwSha384 => F::Sha384,
        TokenKind::KwSha512 => F::Sha512,
        TokenKind::KwIf => F::If,
        TokenKind::KwCoalesce => F::Coalesce,
        TokenKind::KwCall => F::Call,
        _ => return None,
    })
}

/// How many arguments a built-in takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arity {
    /// Exactly `()`
    Nil,
    /// `( ?var )`
    Variable,
    /// Between `min` and `max` bracketed arguments
    Range(usize, usize),
}

fn arity(function: BuiltinFunction) -> Arity {
    use BuiltinFunction as F;
    match function {
        F::Now | F::Rand | F::Uuid | F::StrUuid => Arity::Nil,
        F::Bound => Arity::Variable,
        F::BNode => Arity::Range(0, 1),
        F::Coalesce | F::Concat => Arity::Range(0, usize::MAX),
        F::Call => Arity::Range(1, usize::MAX),
        F::Substr | F::Regex => Arity::Range(2, 3),
        F::Replace => Arity::Range(3, 4),
        F::If => Arity::Range(3, 3),
        F::LangMatches
        | F::SameTerm
        | F::StrDt
        | F::StrLang
        | F::StrStarts
        | F::StrEnds
        | F::Contains
        | F::StrBefore
        | F::StrAfter => Arity::Range(2, 2),
        _ => Arity::Range(1, 1),
    }
}

impl ExpressionParser<'_> {
    /// Parse a built-in call starting at its keyword.
    pub(super) fn parse_builtin_call(
        &self,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let keyword = tokens.next_or_eof("a function name")?;
        let Some(function) = builtin_for(keyword.kind) else {
            return Err(unexpected(&keyword, "expected a built-in function"));
        };

        let syntax = self.config.syntax();
        if syntax == SyntaxMode::Sparql10 && !function.is_sparql10() {
            self.require_sparql11(&keyword, &format!("The {function} function"))?;
        }
        if function == BuiltinFunction::Call {
            self.require_extended(&keyword, "CALL")?;
        }
        let function = match function {
            BuiltinFunction::Datatype if syntax == SyntaxMode::Sparql10 => {
                BuiltinFunction::DatatypeSparql10
            }
            f => f,
        };

        let (args, end) = match arity(function) {
            Arity::Nil => {
                tokens.expect(TokenKind::LParen, &format!("'(' after {function}"))?;
                let close = tokens.expect(
                    TokenKind::RParen,
                    &format!("')' after '(', {function} takes no arguments"),
                )?;
                (Vec::new(), close.span)
            }
            Arity::Variable => {
                tokens.expect(TokenKind::LParen, &format!("'(' after {function}"))?;
                let var = tokens.expect(TokenKind::Var, &format!("a variable in {function}"))?;
                let close = tokens.expect(TokenKind::RParen, &format!("')' to close {function}"))?;
                (vec![Expression::variable(var.text, var.span)], close.span)
            }
            Arity::Range(min, max) => self.parse_arguments(&keyword, function, min, max, tokens)?,
        };

        Ok(Expression::builtin(function, args, keyword.span.union(end)))
    }

    /// Parse `min..=max` comma-separated bracketed arguments.
    fn parse_arguments(
        &self,
        keyword: &Token,
        function: BuiltinFunction,
        min: usize,
        max: usize,
        tokens: &mut TokenQueue,
    ) -> Result<(Vec<Expression>, SourceSpan), ParseError> {
        let mut args = Vec::new();
        let mut require_open = true;
        let end = loop {
            let arg = self.parse_bracketed(tokens, require_open)?;
            require_open = false;
            if arg.distinct || arg.saw_semicolon {
                return Err(unexpected(
                    &arg.terminator,
                    format!("in the arguments of {function}"),
                ));
            }

            match arg.expr {
                Some(expr) => args.push(expr),
                // `F()` is an empty argument list, `F(a,)` is an error
                None if args.is_empty() && !arg.saw_comma => break arg.terminator.span,
                None => {
                    return Err(unexpected(&arg.terminator, "expected a function argument"));
                }
            }

            if !arg.saw_comma {
                break arg.terminator.span;
            }
            if args.len() == max {
                return Err(wrong_arity(
                    &arg.terminator,
                    format!("Too many arguments, {function} takes at most {max}"),
                ));
            }
        };

        if args.len() < min {
            return Err(wrong_arity(
                keyword,
                format!(
                    "{function} takes at least {min} argument{} but {} given",
                    if min == 1 { "" } else { "s" },
                    args.len()
                ),
            ));
        }
        Ok((args, end))
    }

    /// `EXISTS { ... }` or `NOT EXISTS { ... }`.
    ///
    /// The body is gathered as a balanced run of braces (braces included)
    /// and handed to the configured graph pattern parser.
    pub(super) fn parse_exists(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let keyword = tokens.next_or_eof("EXISTS")?;
        let must_match = keyword.kind == TokenKind::KwExists;
        if !must_match {
            tokens.expect(TokenKind::KwExists, "EXISTS after NOT")?;
        }
        self.require_sparql11(&keyword, "EXISTS/NOT EXISTS")?;

        let Some(pattern_parser) = self.config.pattern_parser() else {
            return Err(ParseError::new(
                ParseErrorKind::PatternParser,
                DiagCode::MissingPatternParser,
                "EXISTS/NOT EXISTS requires a graph pattern parser, none is configured",
            )
            .with_token(keyword.summary()));
        };

        let open = tokens.expect(TokenKind::LBrace, "'{' to open the EXISTS pattern")?;
        let mut body = TokenQueue::default();
        let mut depth = 1usize;
        body.push(open);
        let end = loop {
            let token = tokens.next_or_eof("'}' to close the EXISTS pattern")?;
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            let span = token.span;
            body.push(token);
            if depth == 0 {
                break span;
            }
        };

        debug!(
            tokens = body.len(),
            must_match, "handing EXISTS body to the graph pattern parser"
        );
        let pattern = pattern_parser.parse_pattern(body, true)?;

        Ok(Expression::Exists {
            pattern,
            must_match,
            span: keyword.span.union(end),
        })
    }
}
