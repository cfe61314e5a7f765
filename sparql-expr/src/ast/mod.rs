//! Typed syntax trees produced by the parsers.
//!
//! Both trees are closed enums, exclusively owned by their parent node and
//! immutable once built. Every node carries the [`SourceSpan`] of the tokens
//! it was parsed from.
//!
//! ## Module Structure
//!
//! - [`expr`]: scalar expressions (operators, built-in calls, aggregates, EXISTS)
//! - [`path`]: property paths (sequence, alternative, inverse, cardinality)
//!
//! [`SourceSpan`]: crate::span::SourceSpan

pub mod expr;
pub mod path;

pub use expr::{
    AggregateKind, BinaryOp, BuiltinFunction, Expression, Function, PatternHandle, UnaryOp,
};
pub use path::{Cardinality, PropertyPath};
