//! SPARQL expression types.
//!
//! This module defines the AST for SPARQL scalar expressions as they appear
//! in FILTER, BIND, SELECT projections, ORDER BY and HAVING. All nodes carry
//! source spans for diagnostics.

use crate::span::SourceSpan;
use crate::value::Term;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A SPARQL expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A value bound at parse time (boolean, number, string or IRI)
    Constant { value: Term, span: SourceSpan },

    /// A variable reference (name without `?`/`$`)
    Variable { name: Arc<str>, span: SourceSpan },

    /// Unary operation. Unary `+` never appears; it is elided by the parser.
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
        span: SourceSpan,
    },

    /// Binary operation. For `In`/`NotIn` the right operand is a [`Expression::Set`].
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: SourceSpan,
    },

    /// Right-hand side of `IN` / `NOT IN`
    Set {
        members: Vec<Expression>,
        span: SourceSpan,
    },

    /// Built-in or extension function call
    Call {
        function: Function,
        args: Vec<Expression>,
        span: SourceSpan,
    },

    /// Aggregate. `arg` is `None` only for `COUNT(*)`.
    Aggregate {
        kind: AggregateKind,
        arg: Option<Box<Expression>>,
        distinct: bool,
        all: bool,
        scalar_args: BTreeMap<Arc<str>, Expression>,
        span: SourceSpan,
    },

    /// `EXISTS { ... }` (`must_match = true`) or `NOT EXISTS { ... }`
    Exists {
        pattern: PatternHandle,
        must_match: bool,
        span: SourceSpan,
    },
}

impl Expression {
    /// Get the source span of this expression.
    pub fn span(&self) -> SourceSpan {
        match self {
            Expression::Constant { span, .. }
            | Expression::Variable { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Binary { span, .. }
            | Expression::Set { span, .. }
            | Expression::Call { span, .. }
            | Expression::Aggregate { span, .. }
            | Expression::Exists { span, .. } => *span,
        }
    }

    /// Create a constant expression.
    pub fn constant(value: impl Into<Term>, span: SourceSpan) -> Self {
        Expression::Constant {
            value: value.into(),
            span,
        }
    }

    /// Create a variable expression.
    pub fn variable(name: impl Into<Arc<str>>, span: SourceSpan) -> Self {
        Expression::Variable {
            name: name.into(),
            span,
        }
    }

    /// Create a unary expression.
    pub fn unary(op: UnaryOp, operand: Expression, span: SourceSpan) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
            span,
        }
    }

    /// Create a binary expression spanning both operands.
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        let span = left.span().union(right.span());
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }

    /// Create a built-in call.
    pub fn builtin(function: BuiltinFunction, args: Vec<Expression>, span: SourceSpan) -> Self {
        Expression::Call {
            function: Function::Builtin(function),
            args,
            span,
        }
    }

    /// The constant value, if this is a constant.
    pub fn as_constant(&self) -> Option<&Term> {
        match self {
            Expression::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether this expression or any sub-expression is an aggregate.
    pub fn contains_aggregate(&self) -> bool {
        match self {
            Expression::Aggregate { .. } => true,
            Expression::Constant { .. }
            | Expression::Variable { .. }
            | Expression::Exists { .. } => false,
            Expression::Unary { operand, .. } => operand.contains_aggregate(),
            Expression::Binary { left, right, .. } => {
                left.contains_aggregate() || right.contains_aggregate()
            }
            Expression::Set { members, .. } => members.iter().any(Expression::contains_aggregate),
            Expression::Call { function, args, .. } => {
                args.iter().any(Expression::contains_aggregate)
                    || matches!(function, Function::Extension { scalar_args, .. }
                        if scalar_args.values().any(Expression::contains_aggregate))
            }
        }
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,  // ||
    And, // &&

    // Relational
    Eq, // =
    Ne, // !=
    Lt, // <
    Gt, // >
    Le, // <=
    Ge, // >=

    // Arithmetic
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /

    // Set membership
    In,
    NotIn,
}

impl BinaryOp {
    /// Get the operator symbol as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
        }
    }

    /// Get the precedence level (higher binds tighter).
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::Le
            | BinaryOp::Ge
            | BinaryOp::In
            | BinaryOp::NotIn => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div => 5,
        }
    }
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical NOT (`!`)
    Not,
    /// Arithmetic negation (`-`)
    Negate,
}

impl UnaryOp {
    /// Get the operator symbol as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
        }
    }
}

/// Target of an [`Expression::Call`].
#[derive(Clone, Debug, PartialEq)]
pub enum Function {
    /// A SPARQL built-in
    Builtin(BuiltinFunction),
    /// An IRI-named extension function
    Extension {
        iri: Arc<str>,
        distinct: bool,
        scalar_args: BTreeMap<Arc<str>, Expression>,
    },
}

/// Built-in function names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    // Term accessors and tests
    Str,
    Lang,
    LangMatches,
    /// `DATATYPE` with SPARQL 1.1 semantics (`rdf:langString` for tagged literals)
    Datatype,
    /// `DATATYPE` with SPARQL 1.0 semantics
    DatatypeSparql10,
    Bound,
    SameTerm,
    IsIri,
    IsUri,
    IsBlank,
    IsLiteral,
    IsNumeric,

    // Constructors
    Iri,
    Uri,
    BNode,
    StrDt,
    StrLang,
    Uuid,
    StrUuid,

    // Strings
    Strlen,
    Substr,
    Ucase,
    Lcase,
    StrStarts,
    StrEnds,
    Contains,
    StrBefore,
    StrAfter,
    EncodeForUri,
    Concat,
    Regex,
    Replace,

    // Numerics
    Abs,
    Round,
    Ceil,
    Floor,
    Rand,

    // Dates and times
    Now,
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Timezone,
    Tz,

    // Hashes
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,

    // Conditionals
    If,
    Coalesce,

    /// Dynamic call through the first argument (extended syntax)
    Call,
}

impl BuiltinFunction {
    /// The keyword used to call this function.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinFunction::Str => "STR",
            BuiltinFunction::Lang => "LANG",
            BuiltinFunction::LangMatches => "LANGMATCHES",
            BuiltinFunction::Datatype | BuiltinFunction::DatatypeSparql10 => "DATATYPE",
            BuiltinFunction::Bound => "BOUND",
            BuiltinFunction::SameTerm => "SAMETERM",
            BuiltinFunction::IsIri => "ISIRI",
            BuiltinFunction::IsUri => "ISURI",
            BuiltinFunction::IsBlank => "ISBLANK",
            BuiltinFunction::IsLiteral => "ISLITERAL",
            BuiltinFunction::IsNumeric => "ISNUMERIC",
            BuiltinFunction::Iri => "IRI",
            BuiltinFunction::Uri => "URI",
            BuiltinFunction::BNode => "BNODE",
            BuiltinFunction::StrDt => "STRDT",
            BuiltinFunction::StrLang => "STRLANG",
            BuiltinFunction::Uuid => "UUID",
            BuiltinFunction::StrUuid => "STRUUID",
            BuiltinFunction::Strlen => "STRLEN",
            BuiltinFunction::Substr => "SUBSTR",
            BuiltinFunction::Ucase => "UCASE",
            BuiltinFunction::Lcase => "LCASE",
            BuiltinFunction::StrStarts => "STRSTARTS",
            BuiltinFunction::StrEnds => "STRENDS",
            BuiltinFunction::Contains => "CONTAINS",
            BuiltinFunction::StrBefore => "STRBEFORE",
            BuiltinFunction::StrAfter => "STRAFTER",
            BuiltinFunction::EncodeForUri => "ENCODE_FOR_URI",
            BuiltinFunction::Concat => "CONCAT",
            BuiltinFunction::Regex => "REGEX",
            BuiltinFunction::Replace => "REPLACE",
            BuiltinFunction::Abs => "ABS",
            BuiltinFunction::Round => "ROUND",
            BuiltinFunction::Ceil => "CEIL",
            BuiltinFunction::Floor => "FLOOR",
            BuiltinFunction::Rand => "RAND",
            BuiltinFunction::Now => "NOW",
            BuiltinFunction::Year => "YEAR",
            BuiltinFunction::Month => "MONTH",
            BuiltinFunction::Day => "DAY",
            BuiltinFunction::Hours => "HOURS",
            BuiltinFunction::Minutes => "MINUTES",
            BuiltinFunction::Seconds => "SECONDS",
            BuiltinFunction::Timezone => "TIMEZONE",
            BuiltinFunction::Tz => "TZ",
            BuiltinFunction::Md5 => "MD5",
            BuiltinFunction::Sha1 => "SHA1",
            BuiltinFunction::Sha224 => "SHA224",
            BuiltinFunction::Sha256 => "SHA256",
            BuiltinFunction::Sha384 => "SHA384",
            BuiltinFunction::Sha512 => "SHA512",
            BuiltinFunction::If => "IF",
            BuiltinFunction::Coalesce => "COALESCE",
            BuiltinFunction::Call => "CALL",
        }
    }

    /// Whether the function exists in SPARQL 1.0.
    pub fn is_sparql10(&self) -> bool {
        matches!(
            self,
            BuiltinFunction::Str
                | BuiltinFunction::Lang
                | BuiltinFunction::LangMatches
                | BuiltinFunction::Datatype
                | BuiltinFunction::DatatypeSparql10
                | BuiltinFunction::Bound
                | BuiltinFunction::SameTerm
                | BuiltinFunction::IsIri
                | BuiltinFunction::IsUri
                | BuiltinFunction::IsBlank
                | BuiltinFunction::IsLiteral
                | BuiltinFunction::Regex
        )
    }
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    GroupConcat,
    Sample,
    // Extended syntax only
    Median,
    Mode,
    NMin,
    NMax,
}

impl AggregateKind {
    /// Get the function name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Count => "COUNT",
            AggregateKind::Sum => "SUM",
            AggregateKind::Avg => "AVG",
            AggregateKind::Min => "MIN",
            AggregateKind::Max => "MAX",
            AggregateKind::GroupConcat => "GROUP_CONCAT",
            AggregateKind::Sample => "SAMPLE",
            AggregateKind::Median => "MEDIAN",
            AggregateKind::Mode => "MODE",
            AggregateKind::NMin => "NMIN",
            AggregateKind::NMax => "NMAX",
        }
    }

    /// Whether the aggregate is only available in extended syntax.
    pub fn is_extension(&self) -> bool {
        matches!(
            self,
            AggregateKind::Median | AggregateKind::Mode | AggregateKind::NMin | AggregateKind::NMax
        )
    }

    /// Aggregate named by an extension IRI.
    pub fn from_iri(iri: &str) -> Option<Self> {
        use sparql_vocab::agg;
        match iri {
            agg::MEDIAN => Some(AggregateKind::Median),
            agg::MODE => Some(AggregateKind::Mode),
            agg::NMIN => Some(AggregateKind::NMin),
            agg::NMAX => Some(AggregateKind::NMax),
            _ => None,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to a graph pattern built by a
/// [`GraphPatternParser`](crate::parse::GraphPatternParser).
///
/// Cheap to clone. Two handles are equal only if they share the same
/// underlying pattern.
#[derive(Clone)]
pub struct PatternHandle(Arc<dyn Any + Send + Sync>);

impl PatternHandle {
    /// Wrap a pattern value.
    pub fn new<T: Any + Send + Sync>(pattern: T) -> Self {
        Self(Arc::new(pattern))
    }

    /// Borrow the pattern as its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for PatternHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PatternHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PatternHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::LineCol;
    use crate::value::Literal;

    fn span(col: u32, end: u32) -> SourceSpan {
        SourceSpan::new(LineCol::new(1, col), LineCol::new(1, end))
    }

    #[test]
    fn test_binary_op_precedence() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Eq.precedence());
        assert_eq!(BinaryOp::In.precedence(), BinaryOp::Lt.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let left = Expression::constant(Literal::integer(1), span(1, 2));
        let right = Expression::constant(Literal::integer(2), span(5, 6));
        let expr = Expression::binary(BinaryOp::Add, left, right);
        assert_eq!(expr.span(), span(1, 6));
    }

    #[test]
    fn test_contains_aggregate() {
        let agg = Expression::Aggregate {
            kind: AggregateKind::Count,
            arg: None,
            distinct: false,
            all: true,
            scalar_args: BTreeMap::new(),
            span: span(1, 9),
        };
        let call = Expression::builtin(BuiltinFunction::Str, vec![agg], span(1, 14));
        assert!(call.contains_aggregate());
        assert!(!Expression::variable("x", span(1, 2)).contains_aggregate());
    }

    #[test]
    fn test_sparql10_builtins() {
        assert!(BuiltinFunction::Regex.is_sparql10());
        assert!(BuiltinFunction::DatatypeSparql10.is_sparql10());
        assert!(!BuiltinFunction::Concat.is_sparql10());
        assert!(!BuiltinFunction::IsNumeric.is_sparql10());
    }

    #[test]
    fn test_aggregate_from_iri() {
        assert_eq!(
            AggregateKind::from_iri(sparql_vocab::agg::MEDIAN),
            Some(AggregateKind::Median)
        );
        assert_eq!(AggregateKind::from_iri("http://example.org/f"), None);
        assert!(AggregateKind::NMax.is_extension());
        assert!(!AggregateKind::Count.is_extension());
    }

    #[test]
    fn test_pattern_handle_identity() {
        let a = PatternHandle::new(vec![1u8, 2, 3]);
        let b = a.clone();
        let c = PatternHandle::new(vec![1u8, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2, 3]));
        assert!(a.downcast_ref::<String>().is_none());
    }
}
