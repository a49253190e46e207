//! Calendar-date parsing for form inputs and URL parameters.
//!
//! Parsing is strict about the shape (`YYYY-MM-DD`) and about the calendar:
//! `2025-02-30` is rejected instead of rolling over into March.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DateRangeError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date input, returning `None` for anything that is not a real
/// calendar date.
///
/// Accepts `YYYY-MM-DD`, or an ISO datetime whose calendar date part is kept
/// (`2025-01-15T10:00:00Z` → 2025-01-15). Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use date_range_engine::parse_date_input;
///
/// assert!(parse_date_input("2025-02-28").is_some());
/// assert!(parse_date_input("2025-02-30").is_none());
/// assert!(parse_date_input("yesterday").is_none());
/// ```
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    try_parse_date_input(input).ok()
}

/// Strict variant of [`parse_date_input`] that says why the input was rejected.
///
/// # Errors
///
/// Returns [`DateRangeError::InvalidDate`] for empty input, a malformed shape,
/// an out-of-range month/day, or a datetime suffix that does not parse.
pub fn try_parse_date_input(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DateRangeError::InvalidDate("empty date".to_string()));
    }

    let (date_part, rest) = if s.len() > 10 && s.is_char_boundary(10) {
        s.split_at(10)
    } else {
        (s, "")
    };

    let (year, month, day) = split_ymd(date_part)
        .ok_or_else(|| DateRangeError::InvalidDate(format!("'{s}': expected YYYY-MM-DD")))?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DateRangeError::InvalidDate(format!("'{s}': not a calendar date"))
    })?;

    if !rest.is_empty() && !is_valid_datetime(s) {
        return Err(DateRangeError::InvalidDate(format!(
            "'{s}': unrecognized time component"
        )));
    }

    Ok(date)
}

/// Format a date the way the pickers and query params expect (`YYYY-MM-DD`).
pub fn format_date_input(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether `date` formats as a four-digit-year date that parses back.
pub fn is_representable(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Split `YYYY-MM-DD` into numeric parts. Every digit position is required.
fn split_ymd(s: &str) -> Option<(i32, u32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let year = s[0..4].parse().ok()?;
    let month = s[5..7].parse().ok()?;
    let day = s[8..10].parse().ok()?;
    Some((year, month, day))
}

/// Whether `s` is a complete ISO datetime, with or without an offset.
fn is_valid_datetime(s: &str) -> bool {
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }
    let naive = s.replacen(' ', "T", 1);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(&naive, fmt).is_ok())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date_input("2025-01-31"), Some(ymd(2025, 1, 31)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_date_input("  2025-01-31\n"), Some(ymd(2025, 1, 31)));
    }

    #[test]
    fn test_parse_rejects_rolled_over_day() {
        assert_eq!(parse_date_input("2025-02-30"), None);
        assert_eq!(parse_date_input("2025-04-31"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range_month() {
        assert_eq!(parse_date_input("2025-13-01"), None);
        assert_eq!(parse_date_input("2025-00-10"), None);
    }

    #[test]
    fn test_parse_leap_day() {
        assert_eq!(parse_date_input("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date_input("2025-02-29"), None);
    }

    #[test]
    fn test_parse_rejects_short_fields() {
        assert_eq!(parse_date_input("2025-1-5"), None);
        assert_eq!(parse_date_input("25-01-05"), None);
        assert_eq!(parse_date_input("2025/01/05"), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("   "), None);
        assert_eq!(parse_date_input("not-a-date"), None);
        assert_eq!(parse_date_input("2025-01-0x"), None);
    }

    #[test]
    fn test_parse_keeps_date_of_datetime() {
        assert_eq!(
            parse_date_input("2025-01-15T10:00:00Z"),
            Some(ymd(2025, 1, 15))
        );
        assert_eq!(
            parse_date_input("2025-01-15T23:30:00-05:00"),
            Some(ymd(2025, 1, 15))
        );
        assert_eq!(parse_date_input("2025-01-15 08:15"), Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn test_parse_rejects_bad_time_suffix() {
        assert_eq!(parse_date_input("2025-01-15Tnoon"), None);
        assert_eq!(parse_date_input("2025-01-15T25:00:00Z"), None);
    }

    #[test]
    fn test_strict_parse_reports_reason() {
        let err = try_parse_date_input("2025-02-30").unwrap_err();
        assert!(err.to_string().contains("not a calendar date"), "got: {err}");

        let err = try_parse_date_input("tomorrow").unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"), "got: {err}");

        let err = try_parse_date_input("").unwrap_err();
        assert!(err.to_string().contains("empty"), "got: {err}");
    }

    #[test]
    fn test_representable_years_round_trip() {
        for date in [ymd(0, 1, 1), ymd(9999, 12, 31)] {
            assert!(is_representable(date));
            assert_eq!(parse_date_input(&format_date_input(date)), Some(date));
        }
        assert!(!is_representable(ymd(-1, 12, 31)));
        assert!(!is_representable(ymd(10000, 1, 1)));
    }

    #[test]
    fn test_format_is_zero_padded() {
        assert_eq!(format_date_input(ymd(2025, 3, 4)), "2025-03-04");
    }
}
