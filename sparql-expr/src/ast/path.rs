//! SPARQL Property Path types.
//!
//! This module defines the AST for SPARQL 1.1 property paths, plus the
//! legacy `{n,m}` cardinality forms.
//!
//! ## Property Path Operators
//!
//! | Syntax | Variant | Description |
//! |--------|---------|-------------|
//! | `iri`, `a` | `Property` | Direct predicate |
//! | `^p` | `Inverse` | Reverse direction |
//! | `p/q` | `Sequence` | Path then path |
//! | `p\|q` | `Alternative` | Either path |
//! | `p?` / `{,1}` | `ZeroOrOne` | Optional step |
//! | `p*` / `{0,}` | `ZeroOrMore` | Transitive closure |
//! | `p+` / `{1,}` | `OneOrMore` | Positive transitive closure |
//! | `p{n,}` | `NOrMore` | At least `n` steps |
//! | `p{,m}` | `ZeroToN` | At most `m` steps |
//! | `p{n}` | `FixedCardinality` | Exactly `n` steps |
//! | `p{n,m}` | `NToM` | Between `n` and `m` steps |
//! | `!iri`, `!(iri\|^iri)` | `NegatedSet` | Any predicate except |

use crate::span::SourceSpan;
use std::sync::Arc;

/// A property path expression.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyPath {
    /// Simple predicate (absolute IRI; `a` is resolved to `rdf:type`)
    Property { iri: Arc<str>, span: SourceSpan },

    /// Inverse path: `^path`
    Inverse {
        path: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// Sequence path: `path1/path2`
    Sequence {
        left: Box<PropertyPath>,
        right: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// Alternative path: `path1|path2`
    Alternative {
        left: Box<PropertyPath>,
        right: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// Negated property set, partitioned by direction.
    ///
    /// Members keep first-seen order and contain no duplicates.
    NegatedSet {
        forward: Vec<Arc<str>>,
        inverse: Vec<Arc<str>>,
        span: SourceSpan,
    },

    /// `path?`
    ZeroOrOne {
        path: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// `path*`
    ZeroOrMore {
        path: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// `path+`
    OneOrMore {
        path: Box<PropertyPath>,
        span: SourceSpan,
    },

    /// `path{n,}`
    NOrMore {
        path: Box<PropertyPath>,
        n: u32,
        span: SourceSpan,
    },

    /// `path{,n}`
    ZeroToN {
        path: Box<PropertyPath>,
        n: u32,
        span: SourceSpan,
    },

    /// `path{n}`
    FixedCardinality {
        path: Box<PropertyPath>,
        n: u32,
        span: SourceSpan,
    },

    /// `path{n,m}` with `m >= n`
    NToM {
        path: Box<PropertyPath>,
        n: u32,
        m: u32,
        span: SourceSpan,
    },
}

impl PropertyPath {
    /// Get the source span of this path.
    pub fn span(&self) -> SourceSpan {
        match self {
            PropertyPath::Property { span, .. }
            | PropertyPath::Inverse { span, .. }
            | PropertyPath::Sequence { span, .. }
            | PropertyPath::Alternative { span, .. }
            | PropertyPath::NegatedSet { span, .. }
            | PropertyPath::ZeroOrOne { span, .. }
            | PropertyPath::ZeroOrMore { span, .. }
            | PropertyPath::OneOrMore { span, .. }
            | PropertyPath::NOrMore { span, .. }
            | PropertyPath::ZeroToN { span, .. }
            | PropertyPath::FixedCardinality { span, .. }
            | PropertyPath::NToM { span, .. } => *span,
        }
    }

    /// Check if this is a simple path (a single predicate).
    pub fn is_simple(&self) -> bool {
        matches!(self, PropertyPath::Property { .. })
    }

    /// Create a simple predicate path.
    pub fn property(iri: impl Into<Arc<str>>, span: SourceSpan) -> Self {
        PropertyPath::Property {
            iri: iri.into(),
            span,
        }
    }

    /// Create an inverse path.
    pub fn inverse(path: PropertyPath, span: SourceSpan) -> Self {
        PropertyPath::Inverse {
            path: Box::new(path),
            span,
        }
    }

    /// Create a sequence path spanning both operands.
    pub fn sequence(left: PropertyPath, right: PropertyPath) -> Self {
        let span = left.span().union(right.span());
        PropertyPath::Sequence {
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    /// Create an alternative path spanning both operands.
    pub fn alternative(left: PropertyPath, right: PropertyPath) -> Self {
        let span = left.span().union(right.span());
        PropertyPath::Alternative {
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    /// Wrap this path in the tightest variant for a cardinality.
    pub fn with_cardinality(self, cardinality: Cardinality, span: SourceSpan) -> Self {
        let path = Box::new(self);
        match cardinality {
            Cardinality::ZeroOrOne => PropertyPath::ZeroOrOne { path, span },
            Cardinality::ZeroOrMore => PropertyPath::ZeroOrMore { path, span },
            Cardinality::OneOrMore => PropertyPath::OneOrMore { path, span },
            Cardinality::NOrMore(n) => PropertyPath::NOrMore { path, n, span },
            Cardinality::ZeroToN(n) => PropertyPath::ZeroToN { path, n, span },
            Cardinality::Fixed(n) => PropertyPath::FixedCardinality { path, n, span },
            Cardinality::Range(n, m) => PropertyPath::NToM { path, n, m, span },
        }
    }
}

/// A normalized repetition bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
    NOrMore(u32),
    ZeroToN(u32),
    Fixed(u32),
    Range(u32, u32),
}

impl Cardinality {
    /// Normalize `{min,max}` bounds, where `None` is an omitted bound.
    ///
    /// Returns `None` for an empty or inverted range: `{}`, `{,0}` or
    /// `max < min`.
    pub fn from_bounds(min: Option<u32>, max: Option<u32>) -> Option<Self> {
        Some(match (min, max) {
            (None, None) => return None,
            (Some(0), None) => Cardinality::ZeroOrMore,
            (Some(1), None) => Cardinality::OneOrMore,
            (Some(n), None) => Cardinality::NOrMore(n),
            (None, Some(0)) => return None,
            (None, Some(1)) => Cardinality::ZeroOrOne,
            (None, Some(m)) => Cardinality::ZeroToN(m),
            (Some(n), Some(m)) if m < n => return None,
            (Some(n), Some(m)) if n == m => Cardinality::Fixed(n),
            (Some(n), Some(m)) => Cardinality::Range(n, m),
        })
    }
}
