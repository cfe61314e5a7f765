//! Temporal values for xsd:dateTime, xsd:date and xsd:duration comparison.
//!
//! ## Timezone Handling
//!
//! A date or dateTime either carries an explicit offset (`Z`, `+05:00`) or
//! none at all. Zoned values compare by their normalized UTC instant, so
//! `"2024-01-01T05:00:00Z"` equals `"2024-01-01T00:00:00-05:00"`. Unzoned
//! values compare by their wall-clock reading. A zoned value and an unzoned
//! value have no determinate order: [`Temporal::try_cmp`] returns `None`
//! and the caller decides what that means.
//!
//! Dates are widened to dateTimes at midnight in their own offset.

use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// A parsed date or dateTime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temporal {
    /// Wall-clock reading as written
    local: NaiveDateTime,
    /// Explicit offset, if the lexical form had one
    offset: Option<FixedOffset>,
}

impl Temporal {
    /// Parse an xsd:dateTime lexical form.
    ///
    /// Accepts RFC 3339 with an offset, `+hhmm` offsets, and forms without
    /// any timezone. Fractional seconds are optional.
    pub fn parse_date_time(s: &str) -> Option<Self> {
        if let Ok(dt) = ChronoDateTime::parse_from_rfc3339(s) {
            return Some(Self {
                local: dt.naive_local(),
                offset: Some(*dt.offset()),
            });
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%z"] {
            if let Ok(dt) = ChronoDateTime::parse_from_str(s, fmt) {
                return Some(Self {
                    local: dt.naive_local(),
                    offset: Some(*dt.offset()),
                });
            }
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(local) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self {
                    local,
                    offset: None,
                });
            }
        }

        None
    }

    /// Parse an xsd:date lexical form (`YYYY-MM-DD` with optional `Z` or
    /// `±hh:mm`), placing it at midnight.
    pub fn parse_date(s: &str) -> Option<Self> {
        let (date_part, offset) = split_date_offset(s)?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
        Some(Self {
            local: date.and_hms_opt(0, 0, 0)?,
            offset,
        })
    }

    /// Wall-clock reading as written.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Whether the lexical form carried a timezone.
    pub fn is_zoned(&self) -> bool {
        self.offset.is_some()
    }

    /// Normalized UTC instant, for zoned values.
    pub fn instant(&self) -> Option<ChronoDateTime<Utc>> {
        let offset = self.offset?;
        self.local
            .and_local_timezone(offset)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Order two values, or `None` when exactly one of them is zoned.
    pub fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.instant(), other.instant()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) if !self.is_zoned() && !other.is_zoned() => {
                Some(self.local.cmp(&other.local))
            }
            _ => None,
        }
    }
}

/// Split a date lexical form into its date part and optional offset.
fn split_date_offset(s: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(date_part) = s.strip_suffix('Z') {
        return Some((date_part, FixedOffset::east_opt(0)));
    }
    // Offsets follow the ten-character date; a leading '-' is a negative year
    if s.len() == 16 && s.is_char_boundary(10) {
        let (date_part, tz) = s.split_at(10);
        let sign = match tz.as_bytes().first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return None,
        };
        let (hours, mins) = tz[1..].split_once(':')?;
        let secs = sign * (hours.parse::<i32>().ok()? * 3600 + mins.parse::<i32>().ok()? * 60);
        return Some((date_part, Some(FixedOffset::east_opt(secs)?)));
    }
    Some((s, None))
}

/// A parsed xsd:duration, normalized to months and microseconds.
///
/// Years fold into months and days, hours and minutes fold into seconds;
/// the two components are never mixed since a month has no fixed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Duration {
    months: i64,
    micros: i128,
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:\.(\d{1,6})\d*)?S)?)?$",
        )
        .expect("valid regex")
    })
}

impl Duration {
    /// Parse an xsd:duration lexical form such as `P1Y2M3DT4H5M6.5S`.
    pub fn parse(s: &str) -> Option<Self> {
        // "P" and "PT" alone are not valid durations
        if s.ends_with('P') || s.ends_with('T') {
            return None;
        }
        let caps = duration_regex().captures(s)?;
        let num = |i: usize| -> Option<i128> {
            caps.get(i).map_or(Some(0), |m| m.as_str().parse::<i128>().ok())
        };

        // Components are unbounded digit runs; overflow means no value
        let months = num(2)?.checked_mul(12)?.checked_add(num(3)?)?;
        let whole_secs = [(5, 24), (6, 60), (7, 60)]
            .into_iter()
            .try_fold(num(4)?, |acc, (i, unit)| {
                acc.checked_mul(unit)?.checked_add(num(i)?)
            })?;
        let frac_micros = caps.get(8).map_or(Some(0), |m| {
            let digits = m.as_str();
            let scale = 10_i128.pow(6 - digits.len() as u32);
            digits.parse::<i128>().ok().map(|v| v * scale)
        })?;
        let micros = whole_secs.checked_mul(1_000_000)?.checked_add(frac_micros)?;

        let sign = if caps.get(1).is_some() { -1 } else { 1 };
        Some(Self {
            months: i64::try_from(sign * months).ok()?,
            micros: sign * micros,
        })
    }

    /// Total months component.
    pub fn months(&self) -> i64 {
        self.months
    }

    /// Total day-time component in microseconds.
    pub fn micros(&self) -> i128 {
        self.micros
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_parse_zoned_and_local() {
        let zoned = Temporal::parse_date_time("2024-01-15T10:30:00Z").unwrap();
        assert!(zoned.is_zoned());
        let offset = Temporal::parse_date_time("2024-01-15T10:30:00+0500").unwrap();
        assert!(offset.is_zoned());
        let local = Temporal::parse_date_time("2024-01-15T10:30:00.25").unwrap();
        assert!(!local.is_zoned());
        assert!(local.instant().is_none());
        assert!(Temporal::parse_date_time("not a date").is_none());
    }

    #[test]
    fn test_datetime_same_instant() {
        let a = Temporal::parse_date_time("2024-01-01T05:00:00Z").unwrap();
        let b = Temporal::parse_date_time("2024-01-01T00:00:00-05:00").unwrap();
        assert_eq!(a.try_cmp(&b), Some(Ordering::Equal));
    }

    #[test]
    fn test_date_parse() {
        let plain = Temporal::parse_date("2020-01-01").unwrap();
        assert!(!plain.is_zoned());
        let utc = Temporal::parse_date("2020-01-01Z").unwrap();
        assert!(utc.is_zoned());
        let east = Temporal::parse_date("2020-01-01+02:00").unwrap();
        assert!(east.is_zoned());
        // Midnight at +02:00 is earlier than midnight UTC
        assert_eq!(east.try_cmp(&utc), Some(Ordering::Less));
        assert!(Temporal::parse_date("2020-13-01").is_none());
        assert!(Temporal::parse_date("2020-01-01+0200").is_none());
    }

    #[test]
    fn test_mixed_zone_is_indeterminate() {
        let plain = Temporal::parse_date("2020-01-01").unwrap();
        let zoned = Temporal::parse_date("2020-01-01Z").unwrap();
        assert_eq!(plain.try_cmp(&zoned), None);
        assert_eq!(zoned.try_cmp(&plain), None);
        assert_eq!(plain.try_cmp(&plain), Some(Ordering::Equal));
    }

    #[test]
    fn test_date_widens_to_midnight() {
        let date = Temporal::parse_date("2020-01-01Z").unwrap();
        let dt = Temporal::parse_date_time("2020-01-01T00:00:00Z").unwrap();
        assert_eq!(date.try_cmp(&dt), Some(Ordering::Equal));
    }

    #[test]
    fn test_duration_normalization() {
        let a = Duration::parse("P1Y").unwrap();
        let b = Duration::parse("P12M").unwrap();
        assert_eq!(a, b);

        let c = Duration::parse("PT36H").unwrap();
        let d = Duration::parse("P1DT12H").unwrap();
        assert_eq!(c, d);

        let e = Duration::parse("-PT1.5S").unwrap();
        assert_eq!(e.micros(), -1_500_000);
        assert_eq!(e.months(), 0);

        // A month is not a fixed number of days
        assert_ne!(Duration::parse("P1M"), Duration::parse("P30D"));
    }

    #[test]
    fn test_duration_rejects_malformed() {
        assert!(Duration::parse("P").is_none());
        assert!(Duration::parse("PT").is_none());
        assert!(Duration::parse("1Y").is_none());
        assert!(Duration::parse("P1H").is_none());
    }

    #[test]
    fn test_duration_overflow_has_no_value() {
        assert!(Duration::parse("P99999999999999999999999999999999999999Y").is_none());
        assert!(Duration::parse("PT99999999999999999999999999999999999H").is_none());
        assert!(Duration::parse("P9999999999999999999999999999999999D").is_none());
        // Months beyond i64 but within i128
        assert!(Duration::parse("P99999999999999999999M").is_none());
        assert!(Duration::parse("P768614336404564650Y").is_some());
    }
}
