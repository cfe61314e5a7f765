//! SPARQL value comparison: equality, ordering and effective boolean value.
//!
//! ## Equality vs. ordering
//!
//! `equals` follows the `=` operator: values with no common value space
//! raise [`ValueError::IncomparableType`], and a zoned date/time against an
//! unzoned one raises [`ValueError::IncomparableTimezone`].
//!
//! `compare` follows ORDER BY and never fails. Wherever `equals` would raise
//! it falls back to a fixed order:
//!
//! - node kinds sort `BlankNode < Iri < Literal`
//! - literals from different value spaces sort by value space (numerics
//!   first), then by lexical form, datatype and language
//! - unzoned date/times sort before zoned ones
//! - inside a value space, values that parse sort before malformed lexical
//!   forms, and numeric NaN sorts after every number
//! - terms with equal values are ordered by [`term_order`]
//!
//! so `compare` is a total order consistent with term identity, and sorting
//! any set of terms gives the same result whatever the input order.
//! `try_compare` exposes the strict variant for `<`, `>` and friends, where
//! `1` and `1.0` compare `Equal`.

use super::classify::{is_valid_for_rank, value_category, NumericRank, ValueCategory};
use super::temporal::{Duration, Temporal};
use chrono::{DateTime, NaiveDateTime, Utc};
use super::{Literal, Term, ValueError};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::trace;

/// SPARQL `=` semantics.
pub fn equals(x: &Term, y: &Term) -> Result<bool, ValueError> {
    let (a, b) = match (x, y) {
        (Term::Literal(a), Term::Literal(b)) => (a, b),
        // Different kinds are never equal; same-kind non-literals by identity
        _ => return Ok(x == y),
    };

    let Some((ca, cb)) = categories(a, b) else {
        return Ok(a == b);
    };

    if ca == ValueCategory::Unknown || cb == ValueCategory::Unknown {
        return if a == b {
            Ok(true)
        } else {
            trace!(left = %a, right = %b, "equality over unknown datatype");
            Err(incomparable(a, b))
        };
    }

    let (ra, rb) = (ca.numeric_rank(), cb.numeric_rank());
    if ra.is_numeric() || rb.is_numeric() {
        if !(ra.is_numeric() && rb.is_numeric()) {
            return Err(incomparable(a, b));
        }
        return Ok(match numeric_cmp(a, b, ra.promote(rb)) {
            NumericOutcome::Ordered(ord) => ord == Ordering::Equal,
            // NaN is not equal to anything, itself included
            NumericOutcome::Unordered => false,
            NumericOutcome::Unparsable => a == b,
        });
    }

    if ca.is_temporal() && cb.is_temporal() {
        return match (parse_temporal(a, ca), parse_temporal(b, cb)) {
            (Some(ta), Some(tb)) => match ta.try_cmp(&tb) {
                Some(ord) => Ok(ord == Ordering::Equal),
                None => {
                    trace!(left = %a, right = %b, "timezone presence differs");
                    Err(ValueError::IncomparableTimezone)
                }
            },
            _ => Ok(a == b),
        };
    }

    if ca != cb {
        return Ok(false);
    }

    Ok(match ca {
        ValueCategory::String => a.lexical() == b.lexical(),
        ValueCategory::Boolean => match (parse_boolean(a.lexical()), parse_boolean(b.lexical())) {
            (Some(va), Some(vb)) => va == vb,
            _ => a == b,
        },
        ValueCategory::Duration => match (Duration::parse(a.lexical()), Duration::parse(b.lexical()))
        {
            (Some(da), Some(db)) => da == db,
            _ => a == b,
        },
        _ => a == b,
    })
}

/// SPARQL `!=` semantics.
///
/// The negation of [`equals`], except that a timezone mismatch means the
/// values are known to differ.
pub fn not_equals(x: &Term, y: &Term) -> Result<bool, ValueError> {
    match equals(x, y) {
        Ok(eq) => Ok(!eq),
        Err(ValueError::IncomparableTimezone) => Ok(true),
        Err(e) => Err(e),
    }
}

/// ORDER BY comparison. Never fails.
pub fn compare(x: &Term, y: &Term) -> Ordering {
    match order(x, y, true) {
        Ok(ord) => ord,
        Err(_) => term_order(x, y),
    }
}

/// Strict value comparison for the relational operators.
///
/// Fails where no value ordering exists: unknown datatypes, a numeric
/// against a non-numeric literal, or mixed timezone presence.
pub fn try_compare(x: &Term, y: &Term) -> Result<Ordering, ValueError> {
    order(x, y, false)
}

fn order(x: &Term, y: &Term, lenient: bool) -> Result<Ordering, ValueError> {
    let (a, b) = match (x, y) {
        (Term::Literal(a), Term::Literal(b)) => (a, b),
        _ => return Ok(term_order(x, y)),
    };

    let Some((ca, cb)) = categories(a, b) else {
        return Ok(grouped_order(a, b));
    };

    if ca == ValueCategory::Unknown || cb == ValueCategory::Unknown {
        if a == b || lenient {
            return Ok(grouped_order(a, b));
        }
        return Err(incomparable(a, b));
    }

    let (ra, rb) = (ca.numeric_rank(), cb.numeric_rank());
    match (ra.is_numeric(), rb.is_numeric()) {
        (true, true) => {
            if !lenient {
                if let NumericOutcome::Ordered(ord) = numeric_cmp(a, b, ra.promote(rb)) {
                    return Ok(ord);
                }
                trace!(left = %a, right = %b, "numeric fallback to sort order");
            }
            return Ok(NumericKey::of(a, ra)
                .cmp(&NumericKey::of(b, rb))
                .then_with(|| literal_order(a, b)));
        }
        (true, false) if lenient => return Ok(Ordering::Less),
        (false, true) if lenient => return Ok(Ordering::Greater),
        (true, false) | (false, true) => return Err(incomparable(a, b)),
        (false, false) => {}
    }

    if ca.is_temporal() && cb.is_temporal() {
        let (ta, tb) = (parse_temporal(a, ca), parse_temporal(b, cb));
        if let (false, Some(ta), Some(tb)) = (lenient, &ta, &tb) {
            return ta.try_cmp(tb).ok_or(ValueError::IncomparableTimezone);
        }
        return Ok(TemporalKey::of(ta.as_ref())
            .cmp(&TemporalKey::of(tb.as_ref()))
            .then_with(|| literal_order(a, b)));
    }

    if ca != cb {
        return Ok(grouped_order(a, b));
    }

    Ok(match ca {
        ValueCategory::String => a
            .lexical()
            .cmp(b.lexical())
            .then_with(|| literal_order(a, b)),
        ValueCategory::Boolean => {
            // Malformed forms after both values
            let key = |lit: &Literal| {
                let value = parse_boolean(lit.lexical());
                (value.is_none(), value)
            };
            key(a).cmp(&key(b)).then_with(|| literal_order(a, b))
        }
        _ => literal_order(a, b),
    })
}

/// Fixed syntactic order over terms.
///
/// Kind first (`BlankNode < Iri < Literal`), then the IRI or label, and for
/// literals the lexical form, then datatype, then language (absent first).
/// This is a total order consistent with term identity.
pub fn term_order(x: &Term, y: &Term) -> Ordering {
    match (x, y) {
        (Term::Iri(a), Term::Iri(b)) | (Term::BlankNode(a), Term::BlankNode(b)) => a.cmp(b),
        (Term::Literal(a), Term::Literal(b)) => literal_order(a, b),
        _ => x.kind_rank().cmp(&y.kind_rank()),
    }
}

fn literal_order(a: &Literal, b: &Literal) -> Ordering {
    a.lexical()
        .cmp(b.lexical())
        .then_with(|| a.datatype().cmp(&b.datatype()))
        .then_with(|| a.language().cmp(&b.language()))
}

/// Literals from different value spaces: by value space, then [`literal_order`].
///
/// Keeping each value space contiguous is what makes the value orders inside
/// them compose into one total order.
fn grouped_order(a: &Literal, b: &Literal) -> Ordering {
    group_rank(value_category(a))
        .cmp(&group_rank(value_category(b)))
        .then_with(|| literal_order(a, b))
}

fn group_rank(category: Option<ValueCategory>) -> u8 {
    match category {
        Some(c) if c.numeric_rank().is_numeric() => 0,
        Some(ValueCategory::String) => 1,
        // Language-tagged
        None => 2,
        Some(ValueCategory::Boolean) => 3,
        Some(ValueCategory::Date | ValueCategory::DateTime) => 4,
        Some(ValueCategory::Duration) => 5,
        Some(ValueCategory::Opaque) => 6,
        Some(_) => 7,
    }
}

/// Effective boolean value of a term.
///
/// - simple or language-tagged literal: non-empty
/// - `xsd:boolean`: its value; an invalid lexical form is `false`
/// - `xsd:string`: non-empty
/// - numeric: non-zero and not NaN; an invalid lexical form is a type error
/// - anything else is a type error
pub fn effective_boolean_value(term: &Term) -> Result<bool, ValueError> {
    let Term::Literal(lit) = term else {
        return Err(ValueError::TypeError(format!(
            "{term} has no effective boolean value"
        )));
    };

    // Simple and language-tagged literals
    let Some(datatype) = lit.datatype() else {
        return Ok(!lit.lexical().is_empty());
    };

    let category = value_category(lit).unwrap_or(ValueCategory::Unknown);
    match category {
        ValueCategory::Boolean => Ok(parse_boolean(lit.lexical()).unwrap_or(false)),
        ValueCategory::String => Ok(!lit.lexical().is_empty()),
        c if c.numeric_rank().is_numeric() => {
            numeric_truth(lit.lexical(), c.numeric_rank()).ok_or_else(|| {
                ValueError::TypeError(format!(
                    "\"{}\" is not a valid lexical form for <{datatype}>",
                    lit.lexical()
                ))
            })
        }
        _ => Err(ValueError::TypeError(format!(
            "literals of type <{datatype}> have no effective boolean value"
        ))),
    }
}

fn numeric_truth(lexical: &str, rank: NumericRank) -> Option<bool> {
    Some(match rank {
        NumericRank::Integer => !BigInt::from_str(lexical).ok()?.is_zero(),
        NumericRank::Decimal => !BigDecimal::from_str(lexical).ok()?.is_zero(),
        NumericRank::Float | NumericRank::Double => {
            let v = parse_double(lexical)?;
            v != 0.0 && !v.is_nan()
        }
        NumericRank::NaN => return None,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Categories of two literals, or `None` if either is language-tagged.
fn categories(a: &Literal, b: &Literal) -> Option<(ValueCategory, ValueCategory)> {
    Some((value_category(a)?, value_category(b)?))
}

fn incomparable(a: &Literal, b: &Literal) -> ValueError {
    ValueError::IncomparableType(format!("{a} and {b} have no common value space"))
}

fn parse_boolean(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_temporal(lit: &Literal, category: ValueCategory) -> Option<Temporal> {
    match category {
        ValueCategory::Date => Temporal::parse_date(lit.lexical()),
        ValueCategory::DateTime => Temporal::parse_date_time(lit.lexical()),
        _ => None,
    }
}

/// XSD float/double lexical forms, including `INF`, `-INF` and `NaN`.
fn parse_double(s: &str) -> Option<f64> {
    if !is_valid_for_rank(s, NumericRank::Double) {
        return None;
    }
    match s {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => f64::from_str(s).ok(),
    }
}

/// Sort position of a numeric literal within the numeric value space.
///
/// Each literal maps to its exact value independently of the other operand,
/// so the key order is transitive across mixed numeric types.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NumericKey {
    NegInfinity,
    Finite(BigDecimal),
    PosInfinity,
    NaN,
    Malformed,
}

impl NumericKey {
    fn of(lit: &Literal, rank: NumericRank) -> Self {
        let s = lit.lexical();
        if !is_valid_for_rank(s, rank) {
            return NumericKey::Malformed;
        }
        let float = match rank {
            NumericRank::Integer | NumericRank::Decimal => {
                return BigDecimal::from_str(s).map_or(NumericKey::Malformed, NumericKey::Finite);
            }
            NumericRank::Float => parse_double(s).map(|v| f64::from(v as f32)),
            NumericRank::Double => parse_double(s),
            NumericRank::NaN => None,
        };
        match float {
            None => NumericKey::Malformed,
            Some(v) if v.is_nan() => NumericKey::NaN,
            Some(v) if v == f64::INFINITY => NumericKey::PosInfinity,
            Some(v) if v == f64::NEG_INFINITY => NumericKey::NegInfinity,
            // Shortest round-trip text is unique per value and keeps its order
            Some(v) => BigDecimal::from_str(&format!("{v:e}"))
                .map_or(NumericKey::Malformed, NumericKey::Finite),
        }
    }
}

/// Sort position of a date or dateTime: unzoned wall-clock readings, then
/// zoned instants, then malformed forms.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum TemporalKey {
    Local(NaiveDateTime),
    Instant(DateTime<Utc>),
    Malformed,
}

impl TemporalKey {
    fn of(value: Option<&Temporal>) -> Self {
        match value {
            Some(t) if !t.is_zoned() => TemporalKey::Local(t.local()),
            Some(t) => t.instant().map_or(TemporalKey::Malformed, TemporalKey::Instant),
            None => TemporalKey::Malformed,
        }
    }
}

enum NumericOutcome {
    Ordered(Ordering),
    /// Both parsed but at least one is NaN
    Unordered,
    /// A lexical form does not parse at the promoted rank
    Unparsable,
}

/// Compare two numeric literals at the promoted rank.
fn numeric_cmp(a: &Literal, b: &Literal, rank: NumericRank) -> NumericOutcome {
    let (la, lb) = (a.lexical(), b.lexical());
    let ordering = match rank {
        NumericRank::Integer => match (BigInt::from_str(la), BigInt::from_str(lb)) {
            (Ok(x), Ok(y)) => Some(x.cmp(&y)),
            _ => return NumericOutcome::Unparsable,
        },
        NumericRank::Decimal => match (BigDecimal::from_str(la), BigDecimal::from_str(lb)) {
            (Ok(x), Ok(y)) => Some(x.cmp(&y)),
            _ => return NumericOutcome::Unparsable,
        },
        NumericRank::Float => match (parse_double(la), parse_double(lb)) {
            (Some(x), Some(y)) => (x as f32).partial_cmp(&(y as f32)),
            _ => return NumericOutcome::Unparsable,
        },
        NumericRank::Double => match (parse_double(la), parse_double(lb)) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => return NumericOutcome::Unparsable,
        },
        NumericRank::NaN => return NumericOutcome::Unparsable,
    };
    ordering.map_or(NumericOutcome::Unordered, NumericOutcome::Ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparql_vocab::xsd;

    fn lit(lexical: &str, datatype: &str) -> Term {
        Term::Literal(Literal::typed(lexical, datatype))
    }

    fn plain(lexical: &str) -> Term {
        Term::Literal(Literal::plain(lexical))
    }

    #[test]
    fn test_numeric_promotion() {
        let one = lit("1", xsd::INTEGER);
        let one_dbl = lit("1.0e0", xsd::DOUBLE);
        assert_eq!(try_compare(&one, &one_dbl), Ok(Ordering::Equal));
        assert_eq!(try_compare(&one_dbl, &one), Ok(Ordering::Equal));
        assert!(equals(&one, &one_dbl).unwrap());

        let half = lit("0.5", xsd::DECIMAL);
        assert_eq!(compare(&half, &one), Ordering::Less);
        assert_eq!(compare(&one, &half), Ordering::Greater);
        assert_eq!(
            try_compare(&lit("1", xsd::BYTE), &lit("1.00", xsd::DECIMAL)),
            Ok(Ordering::Equal)
        );
    }

    #[test]
    fn test_equal_values_sort_by_term() {
        let one = lit("1", xsd::INTEGER);
        let one_dbl = lit("1.0e0", xsd::DOUBLE);
        assert_eq!(compare(&one, &one_dbl), Ordering::Less);
        assert_eq!(compare(&one_dbl, &one), Ordering::Greater);
        assert_eq!(compare(&one, &one.clone()), Ordering::Equal);

        let zoned = lit("2024-01-01T05:00:00Z", xsd::DATE_TIME);
        let shifted = lit("2024-01-01T00:00:00-05:00", xsd::DATE_TIME);
        assert_eq!(try_compare(&zoned, &shifted), Ok(Ordering::Equal));
        assert_ne!(compare(&zoned, &shifted), Ordering::Equal);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let a = lit("123456789012345678901234567890", xsd::INTEGER);
        let b = lit("123456789012345678901234567891", xsd::INTEGER);
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert!(!equals(&a, &b).unwrap());
    }

    #[test]
    fn test_integer_vs_string_same_lexical() {
        let int = lit("1", xsd::INTEGER);
        let string = lit("1", xsd::STRING);
        assert!(matches!(
            equals(&int, &string),
            Err(ValueError::IncomparableType(_))
        ));
        assert!(try_compare(&int, &string).is_err());
        // Numerics sort first, whichever side they are on
        assert_eq!(compare(&int, &string), Ordering::Less);
        assert_eq!(compare(&string, &int), Ordering::Greater);
    }

    #[test]
    fn test_unknown_datatype() {
        let a = lit("x", "http://example.org/dt");
        let b = lit("y", "http://example.org/dt");
        assert!(equals(&a, &a.clone()).unwrap());
        assert!(matches!(
            equals(&a, &b),
            Err(ValueError::IncomparableType(_))
        ));
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_unparsable_numeric_falls_back_to_term_equality() {
        let bad = lit("abc", xsd::INTEGER);
        assert!(equals(&bad, &bad.clone()).unwrap());
        assert!(!equals(&bad, &lit("1", xsd::INTEGER)).unwrap());
        assert_eq!(compare(&bad, &lit("1", xsd::INTEGER)), Ordering::Greater);
    }

    #[test]
    fn test_malformed_numerics_sort_after_numbers() {
        let seven = lit("7", xsd::INTEGER);
        let ten = lit("10", xsd::INTEGER);
        let bad = lit("5x", xsd::INTEGER);
        assert_eq!(compare(&seven, &ten), Ordering::Less);
        assert_eq!(compare(&ten, &bad), Ordering::Less);
        assert_eq!(compare(&seven, &bad), Ordering::Less);
        assert_eq!(compare(&bad, &seven), Ordering::Greater);

        // NaN sits between the numbers and the malformed forms
        let nan = lit("NaN", xsd::DOUBLE);
        let inf = lit("INF", xsd::DOUBLE);
        assert_eq!(compare(&inf, &nan), Ordering::Less);
        assert_eq!(compare(&nan, &bad), Ordering::Less);
        assert_eq!(compare(&lit("-INF", xsd::FLOAT), &seven), Ordering::Less);
    }

    #[test]
    fn test_malformed_dates_sort_after_dates() {
        let jan2 = lit("2020-01-02", xsd::DATE);
        let jan1_zoned = lit("2020-01-01Z", xsd::DATE);
        let bad = lit("2020-01-01x", xsd::DATE);
        assert_eq!(compare(&jan2, &jan1_zoned), Ordering::Less);
        assert_eq!(compare(&jan1_zoned, &bad), Ordering::Less);
        assert_eq!(compare(&jan2, &bad), Ordering::Less);
        assert_eq!(
            compare(&lit("2020-01-01T00:00:00x", xsd::DATE_TIME), &jan2),
            Ordering::Greater
        );
    }

    #[test]
    fn test_double_accepts_only_xsd_forms() {
        assert_eq!(parse_double("INF"), Some(f64::INFINITY));
        assert_eq!(parse_double("-INF"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_double("1.5e3"), Some(1500.0));
        assert_eq!(parse_double(".5"), Some(0.5));
        assert!(parse_double("NaN").is_some_and(f64::is_nan));
        for form in ["inf", "+inf", "infinity", "Infinity", "-nan", "nan", "1_000", "0x10"] {
            assert_eq!(parse_double(form), None, "{form}");
        }

        // Rust-only spellings are malformed literals, not infinities
        let odd = lit("infinity", xsd::DOUBLE);
        assert!(equals(&odd, &odd.clone()).unwrap());
        assert!(!equals(&odd, &lit("INF", xsd::DOUBLE)).unwrap());
        assert!(matches!(
            effective_boolean_value(&odd),
            Err(ValueError::TypeError(_))
        ));
        assert_eq!(compare(&lit("INF", xsd::DOUBLE), &odd), Ordering::Less);
    }

    #[test]
    fn test_overlong_duration_uses_term_equality() {
        let huge = lit("P99999999999999999999999999999999999999Y", xsd::DURATION);
        let year = lit("P1Y", xsd::DURATION);
        assert!(!equals(&huge, &year).unwrap());
        assert!(equals(&huge, &huge.clone()).unwrap());
        assert_eq!(compare(&year, &huge), Ordering::Less);
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        let nan = lit("NaN", xsd::DOUBLE);
        assert!(!equals(&nan, &nan.clone()).unwrap());
        assert_eq!(compare(&nan, &nan.clone()), Ordering::Equal);
    }

    #[test]
    fn test_date_timezone_mismatch() {
        let plain_date = lit("2020-01-01", xsd::DATE);
        let zoned_date = lit("2020-01-01Z", xsd::DATE);
        assert_eq!(
            equals(&plain_date, &zoned_date),
            Err(ValueError::IncomparableTimezone)
        );
        assert_eq!(
            try_compare(&plain_date, &zoned_date),
            Err(ValueError::IncomparableTimezone)
        );
        assert_eq!(compare(&plain_date, &zoned_date), Ordering::Less);
        assert_eq!(compare(&zoned_date, &plain_date), Ordering::Greater);
        assert!(not_equals(&plain_date, &zoned_date).unwrap());
    }

    #[test]
    fn test_datetime_instants() {
        let a = lit("2024-01-01T05:00:00Z", xsd::DATE_TIME);
        let b = lit("2024-01-01T00:00:00-05:00", xsd::DATE_TIME);
        assert!(equals(&a, &b).unwrap());
        let later = lit("2024-01-01T06:00:00Z", xsd::DATE_TIME);
        assert_eq!(compare(&a, &later), Ordering::Less);
    }

    #[test]
    fn test_date_widens_to_datetime() {
        let date = lit("2020-01-01Z", xsd::DATE);
        let dt = lit("2020-01-01T00:00:00Z", xsd::DATE_TIME);
        assert!(equals(&date, &dt).unwrap());
        let noon = lit("2020-01-01T12:00:00Z", xsd::DATE_TIME);
        assert_eq!(compare(&date, &noon), Ordering::Less);
    }

    #[test]
    fn test_strings_and_booleans() {
        assert!(equals(&plain("abc"), &lit("abc", xsd::STRING)).unwrap());
        assert!(!equals(&plain("abc"), &plain("abd")).unwrap());
        assert_eq!(compare(&plain("abc"), &plain("abd")), Ordering::Less);

        assert!(equals(&lit("1", xsd::BOOLEAN), &lit("true", xsd::BOOLEAN)).unwrap());
        assert_eq!(
            compare(&lit("false", xsd::BOOLEAN), &lit("true", xsd::BOOLEAN)),
            Ordering::Less
        );
    }

    #[test]
    fn test_durations() {
        assert!(equals(&lit("P1Y", xsd::DURATION), &lit("P12M", xsd::DURATION)).unwrap());
        assert!(!equals(&lit("P1M", xsd::DURATION), &lit("P30D", xsd::DURATION)).unwrap());
    }

    #[test]
    fn test_language_tagged_use_term_semantics() {
        let en = Term::Literal(Literal::lang("chat", "en"));
        let fr = Term::Literal(Literal::lang("chat", "fr"));
        assert!(!equals(&en, &fr).unwrap());
        assert!(equals(&en, &Term::Literal(Literal::lang("chat", "EN"))).unwrap());
        assert_eq!(compare(&en, &fr), Ordering::Less);
        assert!(!equals(&en, &plain("chat")).unwrap());
    }

    #[test]
    fn test_mismatched_categories() {
        let b = lit("true", xsd::BOOLEAN);
        let s = plain("true");
        assert!(!equals(&b, &s).unwrap());
        assert_ne!(compare(&b, &s), Ordering::Equal);
    }

    #[test]
    fn test_node_kinds() {
        let iri = Term::iri("http://example.org/a");
        let bnode = Term::BlankNode("b0".into());
        let literal = plain("a");
        assert!(!equals(&iri, &literal).unwrap());
        assert!(equals(&iri, &iri.clone()).unwrap());
        assert_eq!(compare(&bnode, &iri), Ordering::Less);
        assert_eq!(compare(&iri, &literal), Ordering::Less);
        assert_eq!(
            compare(&Term::iri("http://a"), &Term::iri("http://b")),
            Ordering::Less
        );
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let mut terms = vec![
            lit("2020-01-01Z", xsd::DATE),
            plain("b"),
            lit("3", xsd::INTEGER),
            Term::iri("http://example.org/z"),
            lit("x", "http://example.org/dt"),
            lit("2020-01-01", xsd::DATE),
            lit("1.5", xsd::DECIMAL),
            Term::BlankNode("b1".into()),
            Term::Literal(Literal::lang("a", "en")),
            lit("true", xsd::BOOLEAN),
            plain("a"),
            lit("NaN", xsd::DOUBLE),
        ];
        terms.sort_by(compare);
        let once = terms.clone();
        terms.sort_by(compare);
        assert_eq!(terms, once);
        assert!(matches!(terms[0], Term::BlankNode(_)));
    }

    /// Terms that mix value spaces, equal values, NaN and malformed forms.
    fn awkward_terms() -> Vec<Term> {
        vec![
            lit("10", xsd::INTEGER),
            lit("5x", xsd::INTEGER),
            lit("7", xsd::INTEGER),
            lit("7.0", xsd::DECIMAL),
            lit("7e0", xsd::DOUBLE),
            lit("NaN", xsd::DOUBLE),
            lit("0.1", xsd::FLOAT),
            lit("0.1", xsd::DECIMAL),
            lit("INF", xsd::FLOAT),
            lit("2020-01-02", xsd::DATE),
            lit("2020-01-01Z", xsd::DATE),
            lit("2020-01-01x", xsd::DATE),
            lit("2020-01-01T00:00:00Z", xsd::DATE_TIME),
            lit("maybe", xsd::BOOLEAN),
            lit("true", xsd::BOOLEAN),
            lit("1", xsd::BOOLEAN),
            plain("7"),
            lit("x", "http://example.org/dt"),
            Term::Literal(Literal::lang("7", "en")),
            Term::iri("http://example.org/7"),
        ]
    }

    #[test]
    fn test_compare_is_transitive() {
        let terms = awkward_terms();
        for a in &terms {
            for b in &terms {
                assert_eq!(compare(a, b), compare(b, a).reverse(), "{a} vs {b}");
                for c in &terms {
                    if compare(a, b) != Ordering::Greater && compare(b, c) != Ordering::Greater {
                        assert_ne!(compare(a, c), Ordering::Greater, "{a} <= {b} <= {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_ignores_input_order() {
        let mut terms = awkward_terms();
        let mut expected = terms.clone();
        expected.sort_by(compare);

        for _ in 0..terms.len() {
            terms.rotate_left(1);
            let mut sorted = terms.clone();
            sorted.sort_by(compare);
            assert_eq!(sorted, expected);

            sorted.reverse();
            sorted.sort_by(compare);
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_effective_boolean_value() {
        assert!(!effective_boolean_value(&plain("")).unwrap());
        assert!(effective_boolean_value(&plain("abc")).unwrap());
        assert!(effective_boolean_value(&Term::Literal(Literal::lang("x", "en"))).unwrap());
        assert!(!effective_boolean_value(&lit("0", xsd::INTEGER)).unwrap());
        assert!(effective_boolean_value(&lit("0.1", xsd::DECIMAL)).unwrap());
        assert!(!effective_boolean_value(&lit("NaN", xsd::DOUBLE)).unwrap());
        assert!(!effective_boolean_value(&lit("0.0e0", xsd::FLOAT)).unwrap());
        assert!(effective_boolean_value(&lit("true", xsd::BOOLEAN)).unwrap());
        assert!(!effective_boolean_value(&lit("yes", xsd::BOOLEAN)).unwrap());
        assert!(!effective_boolean_value(&lit("", xsd::STRING)).unwrap());
    }

    #[test]
    fn test_effective_boolean_value_errors() {
        assert!(matches!(
            effective_boolean_value(&lit("1", xsd::DATE)),
            Err(ValueError::TypeError(_))
        ));
        assert!(matches!(
            effective_boolean_value(&lit("one", xsd::INTEGER)),
            Err(ValueError::TypeError(_))
        ));
        assert!(matches!(
            effective_boolean_value(&Term::iri("http://example.org/")),
            Err(ValueError::TypeError(_))
        ));
    }
}
