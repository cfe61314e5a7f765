//! Numeric ranks, XSD lexical grammars and literal value categories.
//!
//! The numeric rank forms a total order `NaN < Integer < Decimal < Float <
//! Double`; combining two numeric operands promotes to the greater rank.
//!
//! The lexical grammars nest (every integer is a valid decimal, every decimal
//! a valid double), so an untyped numeric form must be sniffed in the order
//! integer, decimal, double.

use super::Literal;
use regex::Regex;
use sparql_vocab::xsd;
use std::sync::OnceLock;

/// Position of a datatype in the SPARQL numeric type hierarchy.
///
/// Declaration order is the promotion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericRank {
    /// Not a numeric datatype
    NaN,
    /// `xsd:integer` and its derived types
    Integer,
    /// `xsd:decimal`
    Decimal,
    /// `xsd:float`
    Float,
    /// `xsd:double`
    Double,
}

impl NumericRank {
    /// Whether this rank is a numeric type at all.
    pub fn is_numeric(self) -> bool {
        self != NumericRank::NaN
    }

    /// Result rank of combining two operands.
    pub fn promote(self, other: Self) -> Self {
        self.max(other)
    }

    /// Canonical datatype IRI for this rank.
    pub fn datatype(self) -> Option<&'static str> {
        match self {
            NumericRank::NaN => None,
            NumericRank::Integer => Some(xsd::INTEGER),
            NumericRank::Decimal => Some(xsd::DECIMAL),
            NumericRank::Float => Some(xsd::FLOAT),
            NumericRank::Double => Some(xsd::DOUBLE),
        }
    }
}

/// Numeric rank of a datatype IRI; `NaN` for anything non-numeric.
pub fn numeric_rank(datatype: &str) -> NumericRank {
    match datatype {
        xsd::DOUBLE => NumericRank::Double,
        xsd::FLOAT => NumericRank::Float,
        xsd::DECIMAL => NumericRank::Decimal,
        dt if xsd::is_integer_family(dt) => NumericRank::Integer,
        _ => NumericRank::NaN,
    }
}

struct Grammars {
    integer: Regex,
    decimal: Regex,
    double: Regex,
}

fn grammars() -> &'static Grammars {
    static GRAMMARS: OnceLock<Grammars> = OnceLock::new();
    GRAMMARS.get_or_init(|| Grammars {
        integer: Regex::new(r"^[+-]?[0-9]+$").expect("valid regex"),
        decimal: Regex::new(r"^[+-]?([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)$").expect("valid regex"),
        double: Regex::new(
            r"^[+-]?([0-9]+\.[0-9]*[eE][+-]?[0-9]+|\.[0-9]+[eE][+-]?[0-9]+|[0-9]+[eE][+-]?[0-9]+)$",
        )
        .expect("valid regex"),
    })
}

/// `s` is in the `xsd:integer` lexical space.
pub fn is_integer_lexical(s: &str) -> bool {
    grammars().integer.is_match(s)
}

/// `s` is in the `xsd:decimal` lexical space (integers included).
pub fn is_decimal_lexical(s: &str) -> bool {
    grammars().decimal.is_match(s)
}

/// `s` is in the `xsd:double` lexical space (decimals and integers included).
pub fn is_double_lexical(s: &str) -> bool {
    let g = grammars();
    g.double.is_match(s) || g.decimal.is_match(s)
}

/// Classify an untyped numeric lexical form by the first grammar it fits.
pub fn sniff_numeric(s: &str) -> Option<NumericRank> {
    if is_integer_lexical(s) {
        Some(NumericRank::Integer)
    } else if is_decimal_lexical(s) {
        Some(NumericRank::Decimal)
    } else if is_double_lexical(s) {
        Some(NumericRank::Double)
    } else {
        None
    }
}

/// Whether a lexical form is valid for the given numeric rank.
pub fn is_valid_for_rank(s: &str, rank: NumericRank) -> bool {
    match rank {
        NumericRank::Integer => is_integer_lexical(s),
        NumericRank::Decimal => is_decimal_lexical(s),
        NumericRank::Float | NumericRank::Double => {
            is_double_lexical(s) || matches!(s, "INF" | "-INF" | "+INF" | "NaN")
        }
        NumericRank::NaN => false,
    }
}

/// Value space a literal's datatype maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    /// Datatype not recognized
    Unknown,
    /// Simple literal or `xsd:string`
    String,
    /// `xsd:boolean`
    Boolean,
    /// `xsd:date`
    Date,
    /// `xsd:dateTime`
    DateTime,
    /// `xsd:duration`
    Duration,
    /// `xsd:integer` family
    Integer,
    /// `xsd:decimal`
    Decimal,
    /// `xsd:float`
    Float,
    /// `xsd:double`
    Double,
    /// Recognized datatype compared by lexical form only
    /// (`xsd:anyURI`, `xsd:base64Binary`, `xsd:hexBinary`)
    Opaque,
}

impl ValueCategory {
    /// Numeric rank of this category.
    pub fn numeric_rank(self) -> NumericRank {
        match self {
            ValueCategory::Integer => NumericRank::Integer,
            ValueCategory::Decimal => NumericRank::Decimal,
            ValueCategory::Float => NumericRank::Float,
            ValueCategory::Double => NumericRank::Double,
            _ => NumericRank::NaN,
        }
    }

    /// Whether this is a date or dateTime category.
    pub fn is_temporal(self) -> bool {
        matches!(self, ValueCategory::Date | ValueCategory::DateTime)
    }
}

/// Category of a datatype IRI.
pub fn datatype_category(datatype: &str) -> ValueCategory {
    match datatype {
        xsd::STRING => ValueCategory::String,
        xsd::BOOLEAN => ValueCategory::Boolean,
        xsd::DATE => ValueCategory::Date,
        xsd::DATE_TIME => ValueCategory::DateTime,
        xsd::DURATION => ValueCategory::Duration,
        xsd::ANY_URI | xsd::BASE64_BINARY | xsd::HEX_BINARY => ValueCategory::Opaque,
        dt => match numeric_rank(dt) {
            NumericRank::Integer => ValueCategory::Integer,
            NumericRank::Decimal => ValueCategory::Decimal,
            NumericRank::Float => ValueCategory::Float,
            NumericRank::Double => ValueCategory::Double,
            NumericRank::NaN => ValueCategory::Unknown,
        },
    }
}

/// Category of a literal.
///
/// A literal without datatype or language is a `String`. A language-tagged
/// literal has no supported category and yields `None`.
pub fn value_category(literal: &Literal) -> Option<ValueCategory> {
    if literal.language().is_some() {
        return None;
    }
    Some(
        literal
            .datatype()
            .map_or(ValueCategory::String, datatype_category),
    )
}
