//! Error types for date-range-engine operations.
//!
//! The lenient operations (normalization, query resolution, membership) never
//! surface these; they are returned by the strict parsing helpers only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, DateRangeError>;
