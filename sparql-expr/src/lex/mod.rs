//! SPARQL Lexical Analysis.
//!
//! The parsers consume an already-tokenized [`TokenQueue`](crate::parse::TokenQueue)
//! and never look at source text. This module defines the token vocabulary
//! they understand and ships a tokenizer for callers that start from a
//! query string.
//!
//! ## Design
//!
//! SPARQL lexing is non-trivial due to:
//! - Comments (single-line `#` style)
//! - String escaping (single/double quotes, long strings)
//! - IRIs versus the `<` and `<=` operators
//! - Keyword vs. prefix ambiguity (`a` is both keyword and valid prefix)
//! - Signed numbers versus binary `+`/`-`
//!
//! ## Usage
//!
//! ```
//! use sparql_expr::lex::{tokenize, TokenKind};
//!
//! let tokens = tokenize("?x + 1").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Var);
//! assert_eq!(&*tokens[0].text, "x");
//! ```

mod chars;
mod lexer;
mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{keyword_from_str, Token, TokenKind};
