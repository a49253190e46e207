//! WASM bindings for the admin date-range engine.
//!
//! Values cross the boundary as JSON strings shaped like the engine's
//! `DateRangeValue` (`{"preset": "...", "startDate"?: "...", "endDate"?: "..."}`).
//! `today` is an optional `YYYY-MM-DD` string; when omitted the browser's local
//! date is used.

use chrono::NaiveDate;
use date_range_engine::{
    get_preset_range, is_date_in_range, normalize_date_range_value, parse_date_input,
    resolve_date_range_value, to_date_range_query_params, try_parse_date_input, DatePreset,
    DateRangeError, DateRangeValue, QueryParams,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = "getPresetRange")]
pub fn get_preset_range_js(preset: &str, today: Option<String>) -> Result<String, JsValue> {
    preset_range(preset, today.as_deref()).map_err(to_js)
}

#[wasm_bindgen(js_name = "normalizeDateRangeValue")]
pub fn normalize_js(value_json: &str, today: Option<String>) -> Result<String, JsValue> {
    normalize(value_json, today.as_deref()).map_err(to_js)
}

/// `params_json` is a flat object of query parameters, e.g. the result of
/// `Object.fromEntries(new URLSearchParams(location.search))`.
#[wasm_bindgen(js_name = "resolveDateRangeValue")]
pub fn resolve_js(
    params_json: &str,
    default_preset: &str,
    today: Option<String>,
) -> Result<String, JsValue> {
    resolve(params_json, default_preset, today.as_deref()).map_err(to_js)
}

#[wasm_bindgen(js_name = "toDateRangeQueryParams")]
pub fn to_query_params_js(value_json: &str) -> Result<String, JsValue> {
    to_query_params(value_json).map_err(to_js)
}

#[wasm_bindgen(js_name = "isDateInRange")]
pub fn is_date_in_range_js(date_value: &str, range_json: &str) -> Result<bool, JsValue> {
    contains(date_value, range_json).map_err(to_js)
}

/// Returns the canonical `YYYY-MM-DD` form, or `undefined` for invalid input.
#[wasm_bindgen(js_name = "parseDateInput")]
pub fn parse_date_input_js(input: &str) -> Option<String> {
    parse_date_input(input).map(date_range_engine::format_date_input)
}

// ── Pure helpers (testable off-wasm) ────────────────────────────────────────

fn preset_range(preset: &str, today: Option<&str>) -> Result<String, String> {
    let preset: DatePreset = preset.parse().map_err(|e| format!("{e}"))?;
    to_json(&get_preset_range(preset, resolve_today(today)?))
}

fn normalize(value_json: &str, today: Option<&str>) -> Result<String, String> {
    let value = parse_value(value_json)?;
    to_json(&normalize_date_range_value(&value, resolve_today(today)?))
}

fn resolve(params_json: &str, default_preset: &str, today: Option<&str>) -> Result<String, String> {
    let params: QueryParams = serde_json::from_str(params_json).map_err(|e| {
        DateRangeError::InvalidQuery(format!("params must be a string map: {e}")).to_string()
    })?;
    let default_preset: DatePreset = default_preset.parse().map_err(|e| format!("{e}"))?;
    to_json(&resolve_date_range_value(
        &params,
        default_preset,
        resolve_today(today)?,
    ))
}

fn to_query_params(value_json: &str) -> Result<String, String> {
    to_json(&to_date_range_query_params(&parse_value(value_json)?))
}

fn contains(date_value: &str, range_json: &str) -> Result<bool, String> {
    Ok(is_date_in_range(date_value, &parse_value(range_json)?))
}

fn parse_value(json: &str) -> Result<DateRangeValue, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid date range value: {e}"))
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, String> {
    match today {
        Some(s) => try_parse_date_input(s).map_err(|e| format!("{e}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {e}"))
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: Option<&str> = Some("2025-03-10");

    #[test]
    fn test_preset_range_json() {
        let out = preset_range("last7", TODAY).unwrap();
        assert_eq!(
            out,
            r#"{"preset":"last7","startDate":"2025-03-04","endDate":"2025-03-10"}"#
        );
    }

    #[test]
    fn test_preset_range_rejects_unknown_preset() {
        let err = preset_range("fortnight", TODAY).unwrap_err();
        assert!(err.contains("Invalid preset"), "got: {err}");
    }

    #[test]
    fn test_normalize_json() {
        let out = normalize(
            r#"{"preset":"custom","startDate":"2025-02-10","endDate":"2025-01-01"}"#,
            TODAY,
        )
        .unwrap();
        assert_eq!(
            out,
            r#"{"preset":"custom","startDate":"2025-01-01","endDate":"2025-02-10"}"#
        );
    }

    #[test]
    fn test_normalize_rejects_malformed_json() {
        assert!(normalize("{not json", TODAY).is_err());
        assert!(normalize(r#"{"preset":"weekly"}"#, TODAY).is_err());
    }

    #[test]
    fn test_resolve_legacy_params() {
        let out = resolve(r#"{"dateRange":"90","status":"open"}"#, "last30", TODAY).unwrap();
        assert_eq!(
            out,
            r#"{"preset":"custom","startDate":"2024-12-11","endDate":"2025-03-10"}"#
        );
    }

    #[test]
    fn test_resolve_rejects_malformed_params() {
        for params in ["{not json", r#"{"dateRange":90}"#, "[]"] {
            let err = resolve(params, "last30", TODAY).unwrap_err();
            assert!(err.starts_with("Invalid query: "), "got: {err}");
        }
    }

    #[test]
    fn test_resolve_oversized_legacy_window_uses_default() {
        let out = resolve(r#"{"dateRange":"4294967295"}"#, "all", TODAY).unwrap();
        assert_eq!(out, r#"{"preset":"all"}"#);
    }

    #[test]
    fn test_to_query_params_json() {
        let out = to_query_params(r#"{"preset":"all"}"#).unwrap();
        assert_eq!(out, r#"{"datePreset":"all"}"#);
    }

    #[test]
    fn test_contains() {
        let range = r#"{"preset":"custom","startDate":"2025-01-01","endDate":"2025-01-31"}"#;
        assert!(contains("2025-01-15T10:00:00Z", range).unwrap());
        assert!(!contains("2025-02-01T10:00:00Z", range).unwrap());
    }

    #[test]
    fn test_resolve_today_rejects_invalid_anchor() {
        assert!(resolve_today(Some("2025-02-30")).is_err());
    }
}
