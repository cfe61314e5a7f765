//! RDF terms and SPARQL value semantics.
//!
//! This module holds the term model shared by the parsers and the value
//! comparer:
//!
//! - [`Term`] / [`Literal`]: IRIs, blank nodes and literals
//! - [`classify`]: numeric ranks, lexical grammars and value categories
//! - [`compare`]: SPARQL equality, ORDER BY ordering and effective boolean value
//! - [`temporal`]: timezone-aware date/dateTime and duration values
//!
//! Everything here is stateless; every call is independent.

pub mod classify;
pub mod compare;
pub mod temporal;

pub use classify::{
    is_decimal_lexical, is_double_lexical, is_integer_lexical, numeric_rank, sniff_numeric,
    value_category, NumericRank, ValueCategory,
};
pub use compare::{
    compare, effective_boolean_value, equals, not_equals, term_order, try_compare,
};

use sparql_vocab::xsd;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by value comparison and effective boolean value.
///
/// `compare` never produces one of these; only `equals`, `not_equals`,
/// `try_compare` and `effective_boolean_value` do.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The operation is not defined for this value
    #[error("type error: {0}")]
    TypeError(String),

    /// The two values have no common value space
    #[error("cannot compare values: {0}")]
    IncomparableType(String),

    /// One date/dateTime has a timezone and the other does not
    #[error("cannot compare a date/time with a timezone to one without")]
    IncomparableTimezone,
}

/// An RDF literal.
///
/// A literal has a datatype, a language tag, or neither; never both.
/// Language tags are stored lower-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Option<Arc<str>>,
    language: Option<Arc<str>>,
}

impl Literal {
    /// A simple literal with neither datatype nor language.
    pub fn plain(lexical: impl Into<Arc<str>>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// A literal with an explicit datatype IRI.
    pub fn typed(lexical: impl Into<Arc<str>>, datatype: impl Into<Arc<str>>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// A language-tagged literal.
    pub fn lang(lexical: impl Into<Arc<str>>, language: &str) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            language: Some(Arc::from(language.to_ascii_lowercase())),
        }
    }

    /// An `xsd:boolean` literal in canonical form.
    pub fn boolean(value: bool) -> Self {
        Self::typed(if value { "true" } else { "false" }, xsd::BOOLEAN)
    }

    /// An `xsd:integer` literal.
    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), xsd::INTEGER)
    }

    /// An `xsd:string` literal.
    pub fn string(lexical: impl Into<Arc<str>>) -> Self {
        Self::typed(lexical, xsd::STRING)
    }

    /// Lexical form.
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Datatype IRI, if any.
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    /// Language tag (lower-cased), if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical.escape_default())?;
        if let Some(lang) = &self.language {
            write!(f, "@{lang}")
        } else if let Some(dt) = &self.datatype {
            write!(f, "^^<{dt}>")
        } else {
            Ok(())
        }
    }
}

/// An RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// Absolute IRI
    Iri(Arc<str>),
    /// Blank node label
    BlankNode(Arc<str>),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// An IRI term.
    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Term::Iri(iri.into())
    }

    /// The literal inside this term, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Position of this term's kind in the fixed kind order
    /// `BlankNode < Iri < Literal`.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Term::BlankNode(_) => 0,
            Term::Iri(_) => 1,
            Term::Literal(_) => 2,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal(lit) => lit.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags_are_lowercased() {
        let lit = Literal::lang("chat", "en-GB");
        assert_eq!(lit.language(), Some("en-gb"));
        assert_eq!(lit.datatype(), None);
        assert_eq!(lit, Literal::lang("chat", "EN-gb"));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::plain("a\"b").to_string(), "\"a\\\"b\"");
        assert_eq!(Literal::lang("x", "fr").to_string(), "\"x\"@fr");
        assert_eq!(
            Literal::integer(5).to_string(),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(Term::iri("http://ex.org/").to_string(), "<http://ex.org/>");
        assert_eq!(Term::BlankNode("b0".into()).to_string(), "_:b0");
    }

    #[test]
    fn test_kind_rank() {
        assert!(Term::BlankNode("b".into()).kind_rank() < Term::iri("x").kind_rank());
        assert!(Term::iri("x").kind_rank() < Term::from(Literal::plain("")).kind_rank());
    }
}
