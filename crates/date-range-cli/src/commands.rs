//! Subcommand execution. Every command writes its result to stdout.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use date_range_engine::{
    describe_date_range, get_preset_range, is_date_in_range_tz, normalize_date_range_value,
    parse_query_string, parse_timezone, resolve_date_range_value, to_date_range_query_params,
    to_query_string, DatePreset, DateRangeValue, DATE_PRESET_OPTIONS,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Command, ContainsArgs, RangeArgs};
use crate::config::Config;

/// What a command produced: text for stdout and whether it succeeded.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: String) -> Self {
        Self {
            output,
            success: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetRow {
    value: DatePreset,
    label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
}

#[derive(Serialize)]
struct Resolved {
    value: DateRangeValue,
    label: String,
    query: String,
}

pub fn run(command: &Command, config: &Config, today: NaiveDate) -> Result<Outcome> {
    debug!(%today, "running command");
    match command {
        Command::Presets => presets(today),
        Command::Preset { preset } => to_json(&get_preset_range(*preset, today)),
        Command::Normalize(range) => to_json(&normalize_date_range_value(&raw_value(range), today)),
        Command::Resolve {
            query,
            default_preset,
        } => resolve(query, default_preset.unwrap_or(config.filters.default_preset), today),
        Command::Contains(args) => contains(args, config, today),
    }
}

fn presets(today: NaiveDate) -> Result<Outcome> {
    let rows: Vec<PresetRow> = DATE_PRESET_OPTIONS
        .iter()
        .map(|option| {
            let range = get_preset_range(option.value, today);
            PresetRow {
                value: option.value,
                label: option.label,
                start_date: range.start_date,
                end_date: range.end_date,
            }
        })
        .collect();
    to_json(&rows)
}

fn resolve(query: &str, default_preset: DatePreset, today: NaiveDate) -> Result<Outcome> {
    let params = parse_query_string(query);
    let value = resolve_date_range_value(&params, default_preset, today);
    info!(preset = %value.preset, "resolved date range from query");
    to_json(&Resolved {
        label: describe_date_range(&value),
        query: to_query_string(&to_date_range_query_params(&value)),
        value,
    })
}

fn contains(args: &ContainsArgs, config: &Config, today: NaiveDate) -> Result<Outcome> {
    let tz_name = args
        .timezone
        .as_deref()
        .unwrap_or(&config.filters.timezone);
    let tz = parse_timezone(tz_name).context("invalid --timezone")?;

    let range = match &args.query {
        Some(query) => resolve_date_range_value(
            &parse_query_string(query),
            config.filters.default_preset,
            today,
        ),
        None => normalize_date_range_value(&raw_value(&args.range), today),
    };

    let inside = is_date_in_range_tz(&args.date_value, &range, &tz);
    info!(
        date_value = %args.date_value,
        range = %describe_date_range(&range),
        inside,
        "membership test"
    );
    Ok(Outcome {
        output: inside.to_string(),
        success: inside,
    })
}

fn raw_value(range: &RangeArgs) -> DateRangeValue {
    DateRangeValue {
        preset: range.preset,
        start_date: range.start.clone(),
        end_date: range.end.clone(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Outcome> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    Ok(Outcome::ok(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn json(outcome: &Outcome) -> serde_json::Value {
        serde_json::from_str(&outcome.output).unwrap()
    }

    #[test]
    fn test_presets_lists_all_in_order() {
        let outcome = run(&Command::Presets, &Config::default(), today()).unwrap();
        let rows = json(&outcome);
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0]["value"], "today");
        assert_eq!(rows[2]["startDate"], "2025-03-04");
        assert!(rows[5].get("startDate").is_none());
    }

    #[test]
    fn test_resolve_uses_config_default() {
        let mut config = Config::default();
        config.filters.default_preset = DatePreset::All;
        let command = Command::Resolve {
            query: "?page=2".into(),
            default_preset: None,
        };
        let outcome = run(&command, &config, today()).unwrap();
        let out = json(&outcome);
        assert_eq!(out["value"]["preset"], "all");
        assert_eq!(out["query"], "datePreset=all");
        assert_eq!(out["label"], "All time");
    }

    #[test]
    fn test_contains_reports_failure_outside_range() {
        let args = ContainsArgs {
            date_value: "2025-02-01T00:00:00Z".into(),
            query: Some("startDate=2025-01-01&endDate=2025-01-31".into()),
            range: RangeArgs {
                preset: DatePreset::Custom,
                start: None,
                end: None,
            },
            timezone: None,
        };
        let outcome = run(&Command::Contains(args), &Config::default(), today()).unwrap();
        assert_eq!(outcome.output, "false");
        assert!(!outcome.success);
    }

    #[test]
    fn test_contains_rejects_bad_timezone() {
        let args = ContainsArgs {
            date_value: "2025-01-15".into(),
            query: None,
            range: RangeArgs {
                preset: DatePreset::All,
                start: None,
                end: None,
            },
            timezone: Some("Nowhere/Special".into()),
        };
        let err = run(&Command::Contains(args), &Config::default(), today()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid timezone"));
    }
}
