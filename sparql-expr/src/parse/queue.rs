//! FIFO token queue consumed by the parsers.
//!
//! The queue is consumed destructively front-to-back. Running out of tokens
//! is an ordinary `None` from [`TokenQueue::peek`] or [`TokenQueue::dequeue`];
//! callers turn it into an end-of-input error only where a token is
//! required.

use crate::diag::{DiagCode, ParseError, ParseErrorKind};
use crate::lex::{tokenize, Token, TokenKind};
use std::collections::VecDeque;

/// An ordered queue of tokens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenQueue {
    tokens: VecDeque<Token>,
}

impl TokenQueue {
    /// Create a queue holding `tokens` in order.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Tokenize `source` with the bundled lexer.
    pub fn tokenize(source: &str) -> Result<Self, ParseError> {
        tokenize(source).map(Self::new)
    }

    /// Front token, if any.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Token `n` places from the front (`0` is the front).
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(n)
    }

    /// Kind of the front token, if any.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Whether the front token is of `kind`.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Remove and return the front token.
    pub fn dequeue(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Append a token at the back.
    pub fn push(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    /// Number of tokens left.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are left.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the remaining tokens front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Remove the front token, failing at end of input.
    pub(crate) fn next_or_eof(&mut self, expected: &str) -> Result<Token, ParseError> {
        self.dequeue()
            .ok_or_else(|| ParseError::end_of_input(expected))
    }

    /// Remove the front token if it is `kind`, otherwise fail.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        let token = self.next_or_eof(expected)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(&token, format!("expected {expected}")))
        }
    }

    /// Remove the front token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.dequeue()
        } else {
            None
        }
    }
}

impl FromIterator<Token> for TokenQueue {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for TokenQueue {
    type Item = Token;
    type IntoIter = std::collections::vec_deque::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl Extend<Token> for TokenQueue {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

/// Error for a token that does not fit the grammar here.
pub(crate) fn unexpected(token: &Token, context: impl std::fmt::Display) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnexpectedToken,
        DiagCode::ExpectedToken,
        format!("Unexpected token '{}' ({}), {context}", token.text, token.kind),
    )
    .with_token(token.summary())
}
