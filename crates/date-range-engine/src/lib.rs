//! # date-range-engine
//!
//! Deterministic date-range filtering for the marketplace admin console.
//!
//! The reports, listings and verification admin pages all filter by a date
//! range that can come from a preset picker, a custom start/end form, or the
//! URL (including the legacy numeric `dateRange` parameter). This crate turns
//! any of those into one canonical value, keeps it in sync with query
//! parameters, and answers inclusive membership tests.
//!
//! All functions take "today" explicitly; nothing here reads the clock.
//!
//! ## Modules
//!
//! - [`preset`] - named presets and the [`DateRangeValue`] they resolve to
//! - [`parse`] - strict `YYYY-MM-DD` parsing and formatting
//! - [`normalize`] - canonicalization of preset and custom values
//! - [`query`] - URL query parameter resolution and write-back
//! - [`membership`] - inclusive date-in-range predicate
//! - [`error`] - Error types

pub mod error;
pub mod membership;
pub mod normalize;
pub mod parse;
pub mod preset;
pub mod query;

pub use error::DateRangeError;
pub use membership::{filter_in_range, is_date_in_range, is_date_in_range_tz, parse_timezone};
pub use normalize::normalize_date_range_value;
pub use parse::{format_date_input, is_representable, parse_date_input, try_parse_date_input};
pub use preset::{
    describe_date_range, get_preset_range, trailing_days_range, DatePreset, DateRangeValue,
    PresetOption, DATE_PRESET_OPTIONS,
};
pub use query::{
    merge_date_range_query, parse_query_string, resolve_date_range_value,
    to_date_range_query_params, to_query_string, QueryParams,
};
