//! SPARQL expression parsing.
//!
//! Recursive descent over a [`TokenQueue`], one method per precedence level.
//!
//! ## SPARQL Expression Precedence (lowest to highest)
//!
//! 1. `||` (right-associative)
//! 2. `&&` (right-associative)
//! 3. `=`, `!=`, `<`, `<=`, `>`, `>=`, `IN`, `NOT IN` (non-associative)
//! 4. `+`, `-` (left-associative)
//! 5. `*`, `/` (left-associative)
//! 6. `!`, `+`, `-` (unary, applied to a primary)
//! 7. Primary expressions (literals, variables, calls, bracketed expressions)
//!
//! Argument lists are not parsed in place. Every call site gathers the
//! tokens of one argument with [`ExpressionParser::parse_bracketed`] and
//! parses that run as a complete expression.

mod aggregate;
mod call;
mod literal;

use super::config::ParserConfig;
use super::queue::TokenQueue;
use super::{restriction, unexpected};
use crate::ast::{BinaryOp, Expression, UnaryOp};
use crate::diag::{DiagCode, ParseError};
use crate::lex::{Token, TokenKind};
use tracing::{debug_span, trace};

/// One argument gathered by [`ExpressionParser::parse_bracketed`].
#[derive(Clone, Debug, PartialEq)]
pub struct BracketedArg {
    /// The parsed argument; `None` if the run was empty
    pub expr: Option<Expression>,
    /// The run was a leading `DISTINCT`
    pub distinct: bool,
    /// The run ended at a `,` (more arguments follow)
    pub saw_comma: bool,
    /// The run ended at a `;` (scalar arguments follow)
    pub saw_semicolon: bool,
    /// The token that ended the run
    pub terminator: Token,
}

/// Parses SPARQL expressions under a [`ParserConfig`].
#[derive(Clone, Copy, Debug)]
pub struct ExpressionParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> ExpressionParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'c ParserConfig {
        self.config
    }

    /// Parse one complete expression.
    ///
    /// Every token in the queue must belong to the expression; the first
    /// token left over is reported as unexpected.
    pub fn parse(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let _span = debug_span!(
            "sparql_expr_parse",
            tokens = tokens.len(),
            syntax = %self.config.syntax()
        )
        .entered();
        self.parse_complete(tokens)
    }

    fn parse_complete(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::end_of_input("an expression"));
        }
        let expr = self.parse_or(tokens)?;
        match tokens.dequeue() {
            Some(extra) => Err(unexpected(&extra, "expected the end of the expression")),
            None => Ok(expr),
        }
    }

    /// Gather and parse one bracketed argument.
    ///
    /// Consumes tokens up to the `)` that closes the bracket, or up to a `,`
    /// or `;` at the outermost depth, and parses the gathered run as a
    /// complete expression. With `require_open` the opening `(` is consumed
    /// first; otherwise the caller has already consumed it (or a previous
    /// argument's `,`).
    ///
    /// A `DISTINCT` as the first token of the run ends it immediately with
    /// `distinct` and `saw_comma` set, so callers looping on `saw_comma`
    /// carry on to the real first argument.
    pub fn parse_bracketed(
        &self,
        tokens: &mut TokenQueue,
        require_open: bool,
    ) -> Result<BracketedArg, ParseError> {
        if require_open {
            tokens.expect(TokenKind::LParen, "'(' to open an argument list")?;
        }

        let mut depth = 1usize;
        let mut run = TokenQueue::default();
        let (terminator, saw_comma, saw_semicolon) = loop {
            let token = tokens.next_or_eof("')' to close the bracketed expression")?;
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break (token, false, false);
                    }
                }
                TokenKind::Comma if depth == 1 => break (token, true, false),
                TokenKind::Semicolon if depth == 1 => break (token, false, true),
                TokenKind::KwDistinct if depth == 1 => {
                    if !run.is_empty() {
                        return Err(unexpected(
                            &token,
                            "DISTINCT may only appear before the first argument",
                        ));
                    }
                    trace!("leading DISTINCT in argument list");
                    return Ok(BracketedArg {
                        expr: None,
                        distinct: true,
                        saw_comma: true,
                        saw_semicolon: false,
                        terminator: token,
                    });
                }
                _ => {}
            }
            run.push(token);
        };

        trace!(
            tokens = run.len(),
            terminator = %terminator.kind,
            "gathered bracketed argument"
        );
        let expr = if run.is_empty() {
            None
        } else {
            Some(self.parse_complete(&mut run)?)
        };

        Ok(BracketedArg {
            expr,
            distinct: false,
            saw_comma,
            saw_semicolon,
            terminator,
        })
    }

    fn parse_or(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let left = self.parse_and(tokens)?;
        if tokens.eat(TokenKind::Or).is_some() {
            let right = self.parse_or(tokens)?;
            return Ok(Expression::binary(BinaryOp::Or, left, right));
        }
        Ok(left)
    }

    fn parse_and(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let left = self.parse_relational(tokens)?;
        if tokens.eat(TokenKind::And).is_some() {
            let right = self.parse_and(tokens)?;
            return Ok(Expression::binary(BinaryOp::And, left, right));
        }
        Ok(left)
    }

    fn parse_relational(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let left = self.parse_additive(tokens)?;

        let op = match tokens.peek_kind() {
            Some(TokenKind::Eq) => BinaryOp::Eq,
            Some(TokenKind::Ne) => BinaryOp::Ne,
            Some(TokenKind::Lt) => BinaryOp::Lt,
            Some(TokenKind::Gt) => BinaryOp::Gt,
            Some(TokenKind::Le) => BinaryOp::Le,
            Some(TokenKind::Ge) => BinaryOp::Ge,
            Some(TokenKind::KwIn) => {
                tokens.dequeue();
                return self.parse_set(BinaryOp::In, left, tokens);
            }
            Some(TokenKind::KwNot)
                if tokens.peek_nth(1).is_some_and(|t| t.is(TokenKind::KwIn)) =>
            {
                tokens.dequeue(); // NOT
                tokens.dequeue(); // IN
                return self.parse_set(BinaryOp::NotIn, left, tokens);
            }
            _ => return Ok(left),
        };

        tokens.dequeue();
        let right = self.parse_additive(tokens)?;
        Ok(Expression::binary(op, left, right))
    }

    /// Right-hand side of IN / NOT IN: `()` or a parenthesized list.
    fn parse_set(
        &self,
        op: BinaryOp,
        left: Expression,
        tokens: &mut TokenQueue,
    ) -> Result<Expression, ParseError> {
        let open = tokens.expect(TokenKind::LParen, &format!("'(' after {}", op.as_str()))?;

        let mut members = Vec::new();
        let end = if let Some(close) = tokens.eat(TokenKind::RParen) {
            close.span
        } else {
            loop {
                let arg = self.parse_bracketed(tokens, false)?;
                if arg.distinct || arg.saw_semicolon {
                    return Err(unexpected(&arg.terminator, "in a set of values"));
                }
                match arg.expr {
                    Some(expr) => members.push(expr),
                    None => {
                        return Err(unexpected(&arg.terminator, "expected a set member"));
                    }
                }
                if !arg.saw_comma {
                    break arg.terminator.span;
                }
            }
        };

        let right = Expression::Set {
            members,
            span: open.span.union(end),
        };
        Ok(Expression::binary(op, left, right))
    }

    fn parse_additive(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative(tokens)?;

        loop {
            let op = match tokens.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                // `?x -1` lexes the sign into the literal, so a numeric
                // literal directly after a term is an implicit addition
                Some(TokenKind::PlainLiteral)
                    if tokens
                        .peek()
                        .is_some_and(|t| !matches!(&*t.text, "true" | "false")) =>
                {
                    let Some(token) = tokens.dequeue() else { break };
                    let right = self.numeric_literal(&token)?;
                    left = Expression::binary(BinaryOp::Add, left, right);
                    continue;
                }
                _ => break,
            };
            tokens.dequeue();
            let right = self.parse_multiplicative(tokens)?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary(tokens)?;

        loop {
            let op = match tokens.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            tokens.dequeue();
            let right = self.parse_unary(tokens)?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let op = match tokens.peek_kind() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Minus) => UnaryOp::Negate,
            Some(TokenKind::Plus) => {
                tokens.dequeue();
                return self.parse_primary(tokens);
            }
            _ => return self.parse_primary(tokens),
        };

        let Some(op_token) = tokens.dequeue() else {
            return Err(ParseError::end_of_input("an expression"));
        };
        let operand = self.parse_primary(tokens)?;
        let span = op_token.span.union(operand.span());
        Ok(Expression::unary(op, operand, span))
    }

    fn parse_primary(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let Some(kind) = tokens.peek_kind() else {
            return Err(ParseError::end_of_input("an expression"));
        };

        match kind {
            TokenKind::LParen => self.parse_parenthesized(tokens),
            TokenKind::Var => {
                let token = tokens.next_or_eof("a variable")?;
                Ok(Expression::variable(token.text, token.span))
            }
            TokenKind::Iri | TokenKind::QName => self.parse_iri_or_function(tokens),
            TokenKind::StringLiteral => self.parse_rdf_literal(tokens),
            TokenKind::PlainLiteral => self.parse_plain_literal(tokens),
            TokenKind::KwExists => self.parse_exists(tokens),
            TokenKind::KwNot if tokens.peek_nth(1).is_some_and(|t| t.is(TokenKind::KwExists)) => {
                self.parse_exists(tokens)
            }
            k if aggregate::aggregate_for(k).is_some() => {
                if !self.config.allow_aggregates() {
                    let token = tokens.next_or_eof("an aggregate")?;
                    return Err(aggregate::nested_aggregate(&token, &token.text));
                }
                self.parse_aggregate(tokens)
            }
            k if call::builtin_for(k).is_some() => self.parse_builtin_call(tokens),
            _ => {
                let token = tokens.next_or_eof("an expression")?;
                Err(unexpected(&token, "expected the start of an expression"))
            }
        }
    }

    /// `( expr )`
    fn parse_parenthesized(&self, tokens: &mut TokenQueue) -> Result<Expression, ParseError> {
        let arg = self.parse_bracketed(tokens, true)?;
        if arg.distinct || arg.saw_comma || arg.saw_semicolon {
            return Err(unexpected(
                &arg.terminator,
                "expected ')' to close the bracketed expression",
            ));
        }
        arg.expr
            .ok_or_else(|| unexpected(&arg.terminator, "empty brackets are not an expression"))
    }

    /// Fail with a syntax-mode restriction unless extended syntax is on.
    fn require_extended(&self, token: &Token, what: &str) -> Result<(), ParseError> {
        if self.config.syntax() == super::SyntaxMode::Extended {
            Ok(())
        } else {
            Err(restriction(
                token,
                DiagCode::RequiresExtendedSyntax,
                format!("{what} is only supported in the extended syntax mode"),
            ))
        }
    }

    /// Fail with a syntax-mode restriction in SPARQL 1.0 mode.
    fn require_sparql11(&self, token: &Token, what: &str) -> Result<(), ParseError> {
        if self.config.syntax() == super::SyntaxMode::Sparql10 {
            Err(restriction(
                token,
                DiagCode::RequiresSparql11,
                format!("{what} is not supported in SPARQL 1.0"),
            ))
        } else {
            Ok(())
        }
    }
}
