//! Configuration file loading and logging initialization.

use std::path::Path;

use anyhow::{Context, Result};
use date_range_engine::{parse_timezone, DatePreset};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Top-level configuration, read from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub filters: FiltersConfig,
    pub logging: LoggingConfig,
}

/// Defaults applied when a command does not say otherwise.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltersConfig {
    /// Preset used by `resolve` when the query names no range.
    pub default_preset: DatePreset,
    /// IANA timezone for day boundaries in `contains`.
    pub timezone: String,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            default_preset: DatePreset::Last30,
            timezone: "UTC".into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        parse_timezone(&self.filters.timezone).context("invalid value for filters.timezone")?;
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => anyhow::bail!(
                "invalid value for logging.format: '{other}' (expected 'pretty' or 'json')"
            ),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. Logs go to stderr; `RUST_LOG`
    /// overrides the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if let Err(err) = result {
            eprintln!("warning: logging already initialized: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.filters.default_preset, DatePreset::Last30);
        assert_eq!(config.filters.timezone, "UTC");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[filters]\ndefault_preset = \"last7\"\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.filters.default_preset, DatePreset::Last7);
        assert_eq!(config.filters.timezone, "UTC");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let file = write_config("[filters]\ntimezone = \"Mars/Olympus\"\n");
        let err = format!("{:#}", Config::load(file.path()).unwrap_err());
        assert!(err.contains("filters.timezone"), "got: {err}");
    }

    #[test]
    fn test_invalid_preset_rejected() {
        let file = write_config("[filters]\ndefault_preset = \"last90\"\n");
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        let err = format!("{:#}", Config::load(file.path()).unwrap_err());
        assert!(err.contains("logging.format"), "got: {err}");
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::load(Path::new("/nonexistent/daterange.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
