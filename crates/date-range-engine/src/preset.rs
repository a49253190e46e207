//! Named date-range presets and the [`DateRangeValue`] they produce.
//!
//! A preset is resolved against an explicit `today` anchor supplied by the
//! caller. Nothing in this module reads the system clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateRangeError;
use crate::parse::{format_date_input, is_representable, parse_date_input};

// ── DatePreset ──────────────────────────────────────────────────────────────

/// A named date range as shown in the admin date pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePreset {
    /// The current day.
    Today,
    /// The day before today.
    Yesterday,
    /// The trailing seven days, today included.
    Last7,
    /// The trailing thirty days, today included.
    #[default]
    Last30,
    /// A user-chosen start/end pair.
    Custom,
    /// No bounds at all.
    All,
}

impl DatePreset {
    /// Every preset, in picker order.
    pub const PRESETS: [DatePreset; 6] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::Last7,
        DatePreset::Last30,
        DatePreset::Custom,
        DatePreset::All,
    ];

    /// The wire spelling used in JSON and in the `datePreset` query param.
    pub const fn as_str(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::Last7 => "last7",
            DatePreset::Last30 => "last30",
            DatePreset::Custom => "custom",
            DatePreset::All => "all",
        }
    }

    /// Human-readable label for pickers and summaries.
    pub const fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::Last7 => "Last 7 days",
            DatePreset::Last30 => "Last 30 days",
            DatePreset::Custom => "Custom range",
            DatePreset::All => "All time",
        }
    }

    /// Whether the bounds of this preset are derived from `today`.
    pub fn is_relative(self) -> bool {
        !matches!(self, DatePreset::Custom | DatePreset::All)
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = DateRangeError;

    /// Parse the wire spelling. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DatePreset::PRESETS
            .into_iter()
            .find(|preset| preset.as_str() == normalized)
            .ok_or_else(|| DateRangeError::InvalidPreset(format!("'{}'", s.trim())))
    }
}

/// A preset together with its display label, as rendered by a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetOption {
    pub value: DatePreset,
    pub label: &'static str,
}

impl PresetOption {
    const fn of(value: DatePreset) -> Self {
        Self {
            value,
            label: value.label(),
        }
    }
}

/// The options offered by the admin date pickers, in display order.
pub const DATE_PRESET_OPTIONS: [PresetOption; 6] = [
    PresetOption::of(DatePreset::Today),
    PresetOption::of(DatePreset::Yesterday),
    PresetOption::of(DatePreset::Last7),
    PresetOption::of(DatePreset::Last30),
    PresetOption::of(DatePreset::Custom),
    PresetOption::of(DatePreset::All),
];

// ── DateRangeValue ──────────────────────────────────────────────────────────

/// A date-range filter as held by an admin page.
///
/// Bounds are kept as strings because values arrive from form inputs and URL
/// parameters; they only become trustworthy after
/// [`normalize_date_range_value`](crate::normalize::normalize_date_range_value).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeValue {
    pub preset: DatePreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl DateRangeValue {
    /// A value with a preset and no bounds.
    pub fn preset(preset: DatePreset) -> Self {
        Self {
            preset,
            start_date: None,
            end_date: None,
        }
    }

    /// A custom range from raw (possibly invalid) inputs.
    pub fn custom(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            preset: DatePreset::Custom,
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    /// A custom range from concrete dates.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            preset: DatePreset::Custom,
            start_date: Some(format_date_input(start)),
            end_date: Some(format_date_input(end)),
        }
    }

    /// The bounds parsed as calendar dates. Unparseable bounds read as `None`.
    pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (
            self.start_date.as_deref().and_then(parse_date_input),
            self.end_date.as_deref().and_then(parse_date_input),
        )
    }

    /// Number of calendar days covered, both ends included.
    ///
    /// `None` unless both bounds parse. A reversed pair still reports its span.
    pub fn day_count(&self) -> Option<i64> {
        match self.bounds() {
            (Some(start), Some(end)) => Some((end - start).num_days().abs() + 1),
            _ => None,
        }
    }
}

// ── get_preset_range ────────────────────────────────────────────────────────

/// Resolve a preset to concrete bounds anchored at `today`.
///
/// | preset      | start        | end         |
/// |-------------|--------------|-------------|
/// | `today`     | today        | today       |
/// | `yesterday` | today − 1    | today − 1   |
/// | `last7`     | today − 6    | today       |
/// | `last30`    | today − 29   | today       |
/// | `all`       | none         | none        |
/// | `custom`    | none         | none        |
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_range_engine::{get_preset_range, DatePreset};
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let range = get_preset_range(DatePreset::Last7, today);
/// assert_eq!(range.start_date.as_deref(), Some("2025-03-04"));
/// assert_eq!(range.end_date.as_deref(), Some("2025-03-10"));
/// ```
pub fn get_preset_range(preset: DatePreset, today: NaiveDate) -> DateRangeValue {
    let span = match preset {
        DatePreset::Today => Some((today, today)),
        DatePreset::Yesterday => {
            let day = today - Duration::days(1);
            Some((day, day))
        }
        DatePreset::Last7 => Some((today - Duration::days(6), today)),
        DatePreset::Last30 => Some((today - Duration::days(29), today)),
        DatePreset::Custom | DatePreset::All => None,
    };

    match span {
        Some((start, end)) => DateRangeValue {
            preset,
            start_date: Some(format_date_input(start)),
            end_date: Some(format_date_input(end)),
        },
        None => DateRangeValue::preset(preset),
    }
}

/// A trailing window of `days` calendar days ending on `today`, as a custom range.
///
/// `days` of zero is treated as one day.
/// Returns `None` when the window reaches outside the years `0000`..=`9999`
/// that [`parse_date_input`] accepts.
pub fn trailing_days_range(days: u32, today: NaiveDate) -> Option<DateRangeValue> {
    let back = u64::from(days.max(1)) - 1;
    let start = today.checked_sub_days(Days::new(back))?;
    if !is_representable(start) || !is_representable(today) {
        return None;
    }
    Some(DateRangeValue::from_dates(start, today))
}

/// Summarize a range for display next to a filter control.
pub fn describe_date_range(value: &DateRangeValue) -> String {
    if value.preset != DatePreset::Custom {
        return value.preset.label().to_string();
    }
    match value.bounds() {
        (Some(start), Some(end)) if start == end => format_date_input(start),
        (Some(start), Some(end)) => {
            format!("{} – {}", format_date_input(start), format_date_input(end))
        }
        (Some(start), None) => format!("From {}", format_date_input(start)),
        (None, Some(end)) => format!("Until {}", format_date_input(end)),
        (None, None) => DatePreset::Custom.label().to_string(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
