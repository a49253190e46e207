//! Synchronization between [`DateRangeValue`]s and URL query parameters.
//!
//! Admin pages read their filter from the URL with
//! [`resolve_date_range_value`] and write it back with
//! [`merge_date_range_query`], so a reload or a shared link restores the
//! same range.
//!
//! # Keys
//!
//! - `datePreset` - the preset name
//! - `startDate` / `endDate` - custom bounds (`YYYY-MM-DD`)
//! - `dateRange` - legacy numeric window (`7`, `30`, `90`, `all`), read only;
//!   windows reaching before year `0000` are ignored

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;
use url::form_urlencoded;

use crate::normalize::normalize_date_range_value;
use crate::preset::{trailing_days_range, DatePreset, DateRangeValue};

pub const DATE_PRESET_PARAM: &str = "datePreset";
pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";
pub const LEGACY_RANGE_PARAM: &str = "dateRange";

/// Every key owned by the date-range filter.
pub const DATE_RANGE_PARAMS: [&str; 4] = [
    DATE_PRESET_PARAM,
    START_DATE_PARAM,
    END_DATE_PARAM,
    LEGACY_RANGE_PARAM,
];

/// Flat query parameters, ordered by key so serialization is stable.
pub type QueryParams = BTreeMap<String, String>;

// ── resolve_date_range_value ────────────────────────────────────────────────

/// Read a date-range filter from query parameters.
///
/// Sources are tried in priority order, and an invalid value at one level
/// falls through to the next:
///
/// 1. a recognized `datePreset` (for `custom`, the bounds come from
///    `startDate` / `endDate`);
/// 2. a `startDate` / `endDate` pair where at least one bound parses;
/// 3. the legacy `dateRange` window;
/// 4. `default_preset`.
///
/// The result is always normalized against `today`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_range_engine::{resolve_date_range_value, DatePreset, QueryParams};
///
/// let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let mut params = QueryParams::new();
/// params.insert("dateRange".into(), "90".into());
///
/// let value = resolve_date_range_value(&params, DatePreset::Last30, today);
/// assert_eq!(value.preset, DatePreset::Custom);
/// assert_eq!(value.start_date.as_deref(), Some("2024-12-11"));
/// assert_eq!(value.end_date.as_deref(), Some("2025-03-10"));
/// ```
pub fn resolve_date_range_value(
    params: &QueryParams,
    default_preset: DatePreset,
    today: NaiveDate,
) -> DateRangeValue {
    let value = from_explicit_preset(params)
        .or_else(|| from_explicit_bounds(params))
        .or_else(|| from_legacy_range(params, today))
        .unwrap_or_else(|| DateRangeValue::preset(default_preset));

    normalize_date_range_value(&value, today)
}

fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn from_explicit_preset(params: &QueryParams) -> Option<DateRangeValue> {
    let raw = param(params, DATE_PRESET_PARAM)?;
    let preset = match raw.parse::<DatePreset>() {
        Ok(preset) => preset,
        Err(err) => {
            debug!(%err, "ignoring datePreset param");
            return None;
        }
    };

    if preset == DatePreset::Custom {
        Some(DateRangeValue::custom(
            param(params, START_DATE_PARAM),
            param(params, END_DATE_PARAM),
        ))
    } else {
        Some(DateRangeValue::preset(preset))
    }
}

fn from_explicit_bounds(params: &QueryParams) -> Option<DateRangeValue> {
    let value = DateRangeValue::custom(
        param(params, START_DATE_PARAM),
        param(params, END_DATE_PARAM),
    );
    match value.bounds() {
        (None, None) => None,
        _ => Some(value),
    }
}

fn from_legacy_range(params: &QueryParams, today: NaiveDate) -> Option<DateRangeValue> {
    let raw = param(params, LEGACY_RANGE_PARAM)?;
    let value = match raw {
        "all" => DateRangeValue::preset(DatePreset::All),
        "7" => DateRangeValue::preset(DatePreset::Last7),
        "30" => DateRangeValue::preset(DatePreset::Last30),
        other => match other
            .parse::<u32>()
            .ok()
            .filter(|days| *days > 0)
            .and_then(|days| trailing_days_range(days, today))
        {
            Some(value) => value,
            None => {
                debug!(raw, "ignoring legacy dateRange param");
                return None;
            }
        },
    };
    debug!(raw, preset = %value.preset, "resolved legacy dateRange param");
    Some(value)
}

// ── to_date_range_query_params ──────────────────────────────────────────────

/// Convert a value to query parameters. `datePreset` is always present;
/// bounds appear only when set.
pub fn to_date_range_query_params(value: &DateRangeValue) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(DATE_PRESET_PARAM.to_string(), value.preset.to_string());
    if let Some(start) = &value.start_date {
        params.insert(START_DATE_PARAM.to_string(), start.clone());
    }
    if let Some(end) = &value.end_date {
        params.insert(END_DATE_PARAM.to_string(), end.clone());
    }
    params
}

/// Replace the date-range keys of `existing` with those of `value`.
///
/// Unrelated keys (search text, status filters, pagination) are kept; the
/// legacy `dateRange` key is dropped so it cannot shadow the new value.
pub fn merge_date_range_query(existing: &QueryParams, value: &DateRangeValue) -> QueryParams {
    let mut merged: QueryParams = existing
        .iter()
        .filter(|(key, _)| !DATE_RANGE_PARAMS.contains(&key.as_str()))
        .map(|(key, val)| (key.clone(), val.clone()))
        .collect();
    merged.extend(to_date_range_query_params(value));
    merged
}

// ── Query strings ───────────────────────────────────────────────────────────

/// Parse a URL query string (`?a=1&b=2`, leading `?` optional).
///
/// Percent escapes and `+` are decoded. When a key repeats, the last value
/// wins, matching `URLSearchParams`-to-object conversion.
pub fn parse_query_string(query: &str) -> QueryParams {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Serialize parameters as a query string without the leading `?`.
pub fn to_query_string(params: &QueryParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

// ── Tests ───────────────────────────────────────────────────────────────────
