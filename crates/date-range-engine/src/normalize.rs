//! Canonicalization of [`DateRangeValue`]s.
//!
//! Every read of a date-range filter goes through
//! [`normalize_date_range_value`], so pages can hand it whatever the form or
//! the URL produced and get back a value that satisfies:
//!
//! - relative presets carry the bounds implied by `today`;
//! - `all` carries no bounds;
//! - `custom` carries only parseable bounds, in ascending order, formatted as
//!   `YYYY-MM-DD`.

use chrono::NaiveDate;
use tracing::debug;

use crate::parse::{format_date_input, parse_date_input};
use crate::preset::{get_preset_range, DatePreset, DateRangeValue};

/// Normalize a date-range value against `today`. Never fails: unparseable
/// custom bounds are dropped.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_range_engine::{normalize_date_range_value, DateRangeValue};
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let swapped = DateRangeValue::custom(Some("2025-02-10"), Some("2025-01-01"));
/// let normalized = normalize_date_range_value(&swapped, today);
/// assert_eq!(normalized.start_date.as_deref(), Some("2025-01-01"));
/// assert_eq!(normalized.end_date.as_deref(), Some("2025-02-10"));
/// ```
pub fn normalize_date_range_value(value: &DateRangeValue, today: NaiveDate) -> DateRangeValue {
    match value.preset {
        DatePreset::All => DateRangeValue::preset(DatePreset::All),
        DatePreset::Custom => normalize_custom(value),
        preset => get_preset_range(preset, today),
    }
}

fn normalize_custom(value: &DateRangeValue) -> DateRangeValue {
    let start = parse_bound("startDate", value.start_date.as_deref());
    let end = parse_bound("endDate", value.end_date.as_deref());

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s > e => {
            debug!(start = %s, end = %e, "swapping reversed custom range");
            (Some(e), Some(s))
        }
        bounds => bounds,
    };

    DateRangeValue {
        preset: DatePreset::Custom,
        start_date: start.map(format_date_input),
        end_date: end.map(format_date_input),
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let parsed = parse_date_input(raw);
    if parsed.is_none() {
        debug!(field, raw, "dropping unparseable date bound");
    }
    parsed
}

// ── Tests ───────────────────────────────────────────────────────────────────
