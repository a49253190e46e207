//! Inclusive date-in-range tests for client-side filtering.
//!
//! A range covers every instant from 00:00 on its start date up to the end of
//! its end date, with day boundaries taken in the evaluation timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::error::{DateRangeError, Result};
use crate::parse::parse_date_input;
use crate::preset::{DatePreset, DateRangeValue};

/// Whether `date_value` falls inside `range`, with day boundaries in UTC.
///
/// `range` is expected to be normalized. An `all` range contains every valid
/// date; a missing bound leaves that side open. The end bound runs up to, but
/// excludes, midnight after the end date. An unparseable `date_value`
/// is never in range.
///
/// # Examples
///
/// ```
/// use date_range_engine::{is_date_in_range, DateRangeValue};
///
/// let january = DateRangeValue::custom(Some("2025-01-01"), Some("2025-01-31"));
/// assert!(is_date_in_range("2025-01-15T10:00:00Z", &january));
/// assert!(is_date_in_range("2025-01-31T23:59:59Z", &january));
/// assert!(!is_date_in_range("2025-02-01T00:00:00Z", &january));
/// ```
pub fn is_date_in_range(date_value: &str, range: &DateRangeValue) -> bool {
    is_date_in_range_tz(date_value, range, &Tz::UTC)
}

/// Like [`is_date_in_range`], with day boundaries in the given timezone.
pub fn is_date_in_range_tz(date_value: &str, range: &DateRangeValue, tz: &Tz) -> bool {
    if range.preset == DatePreset::All {
        return true;
    }
    let Some(local) = parse_instant_local(date_value, tz) else {
        return false;
    };

    let (start, end) = range.bounds();
    let after_start = start.is_none_or(|s| local >= start_of_day(s));
    let before_end = end.is_none_or(|e| local < start_of_day(e + Duration::days(1)));
    after_start && before_end
}

/// Keep the items whose date (as returned by `date_of`) falls inside `range`.
pub fn filter_in_range<'a, T, F>(items: &'a [T], range: &DateRangeValue, date_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .filter(|item| is_date_in_range(date_of(*item), range))
        .collect()
}

/// Parse an IANA timezone name.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidTimezone`] if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DateRangeError::InvalidTimezone(format!("'{name}'")))
}

/// Resolve `s` to a wall-clock datetime in `tz`.
///
/// RFC 3339 instants are converted; naive datetimes and bare dates are taken
/// as already local to `tz`.
fn parse_instant_local(s: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    let naive = s.replacen(' ', "T", 1);
    let parsed = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&naive, fmt).ok());
    if parsed.is_some() {
        return parsed;
    }

    if s.len() == 10 {
        return parse_date_input(s).map(start_of_day);
    }
    None
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// ── Tests ───────────────────────────────────────────────────────────────────
