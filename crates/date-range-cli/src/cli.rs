//! Command-line interface definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use date_range_engine::{try_parse_date_input, DatePreset, DateRangeError};

/// Inspect, normalize and resolve admin date-range filters.
#[derive(Parser, Debug)]
#[command(name = "daterange")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Anchor date used as "today" (defaults to the local clock)
    #[arg(long, global = true, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Log level filter (overrides the config file)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format (overrides the config file)
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every preset with its label and resolved bounds
    Presets,

    /// Resolve one preset against today
    Preset {
        /// Preset name (today, yesterday, last7, last30, custom, all)
        preset: DatePreset,
    },

    /// Normalize a preset or custom range
    Normalize(RangeArgs),

    /// Resolve a date range from a URL query string
    Resolve {
        /// Query string, e.g. "?datePreset=custom&startDate=2025-01-01"
        query: String,

        /// Preset used when the query names no range (overrides the config file)
        #[arg(long)]
        default_preset: Option<DatePreset>,
    },

    /// Test whether a date or timestamp falls inside a range
    Contains(ContainsArgs),
}

/// A range given as flags.
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Preset name
    #[arg(long, default_value = "custom")]
    pub preset: DatePreset,

    /// Custom range start (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Custom range end (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args, Debug)]
pub struct ContainsArgs {
    /// Date or RFC 3339 timestamp to test
    pub date_value: String,

    /// Take the range from a URL query string instead of flags
    #[arg(long, conflicts_with_all = ["preset", "start", "end"])]
    pub query: Option<String>,

    #[command(flatten)]
    pub range: RangeArgs,

    /// IANA timezone for day boundaries (overrides the config file)
    #[arg(long)]
    pub timezone: Option<String>,
}

fn parse_today(s: &str) -> Result<NaiveDate, DateRangeError> {
    try_parse_date_input(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_today_after_subcommand() {
        let cli = Cli::try_parse_from(["daterange", "preset", "last7", "--today", "2025-03-10"])
            .unwrap();
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert!(matches!(
            cli.command,
            Command::Preset {
                preset: DatePreset::Last7
            }
        ));
    }

    #[test]
    fn test_rejects_invalid_today() {
        assert!(Cli::try_parse_from(["daterange", "presets", "--today", "2025-02-30"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["daterange", "preset", "fortnight"]).is_err());
    }

    #[test]
    fn test_contains_query_conflicts_with_range_flags() {
        let result = Cli::try_parse_from([
            "daterange",
            "contains",
            "2025-01-15",
            "--query",
            "datePreset=all",
            "--start",
            "2025-01-01",
        ]);
        assert!(result.is_err());
    }
}
