//! Runtime configuration

use std::env;
use std::path::PathBuf;
use tracing::warn;
use gauge_session::{SessionSettings, DEFAULT_HISTORY_CAPACITY};
use crate::logging::{LogFormat, LoggingConfig};

pub const DATA_PATH_VAR: &str = "GAUGE_DATA_PATH";
pub const HISTORY_CAPACITY_VAR: &str = "GAUGE_HISTORY_CAPACITY";
pub const PERSIST_HISTORY_VAR: &str = "GAUGE_PERSIST_HISTORY";
pub const LOG_LEVEL_VAR: &str = "RUST_LOG";
pub const LOG_FORMAT_VAR: &str = "GAUGE_LOG_FORMAT";

const DEFAULT_DATA_PATH: &str = "./gauge-data";

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeConfig {
    /// Directory holding `favorites.json` and `history.json`
    pub data_path: PathBuf,
    /// At least 1
    pub history_capacity: usize,
    pub persist_history: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            persist_history: true,
            log_level: "info".into(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl GaugeConfig {
    /// Read configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Values that do not parse
    /// keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup(DATA_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let history_capacity = match lookup(HISTORY_CAPACITY_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) => n.max(1),
                Err(_) => {
                    warn!(var = HISTORY_CAPACITY_VAR, value = %raw, "not a number, using default");
                    defaults.history_capacity
                }
            },
            None => defaults.history_capacity,
        };

        let persist_history = match lookup(PERSIST_HISTORY_VAR) {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!(var = PERSIST_HISTORY_VAR, value = %raw, "not a boolean, using default");
                defaults.persist_history
            }),
            None => defaults.persist_history,
        };

        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => LogFormat::parse(&raw).unwrap_or_else(|| {
                warn!(var = LOG_FORMAT_VAR, value = %raw, "unknown log format, using default");
                defaults.log_format
            }),
            None => defaults.log_format,
        };

        Self {
            data_path,
            history_capacity,
            persist_history,
            log_level,
            log_format,
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    pub fn with_persist_history(mut self, persist: bool) -> Self {
        self.persist_history = persist;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            history_capacity: self.history_capacity,
            persist_history: self.persist_history,
        }
    }

    /// Settings for `init_logging`
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GaugeConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GaugeConfig::default());
        assert_eq!(config.history_capacity, 50);
        assert!(config.persist_history);
        assert_eq!(config.data_path, PathBuf::from("./gauge-data"));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = GaugeConfig::from_lookup(lookup(&[
            (DATA_PATH_VAR, "/tmp/gauge"),
            (HISTORY_CAPACITY_VAR, "20"),
            (PERSIST_HISTORY_VAR, "off"),
            (LOG_LEVEL_VAR, "gauge=debug"),
            (LOG_FORMAT_VAR, "json"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/tmp/gauge"));
        assert_eq!(config.history_capacity, 20);
        assert!(!config.persist_history);
        assert_eq!(config.log_level, "gauge=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = GaugeConfig::from_lookup(lookup(&[
            (HISTORY_CAPACITY_VAR, "lots"),
            (PERSIST_HISTORY_VAR, "maybe"),
            (LOG_FORMAT_VAR, "xml"),
        ]));
        assert_eq!(config.history_capacity, 50);
        assert!(config.persist_history);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let config = GaugeConfig::from_lookup(lookup(&[(HISTORY_CAPACITY_VAR, "0")]));
        assert_eq!(config.history_capacity, 1);
        assert_eq!(GaugeConfig::default().with_history_capacity(0).history_capacity, 1);
    }

    #[test]
    fn test_session_settings() {
        let settings = GaugeConfig::default()
            .with_history_capacity(7)
            .with_persist_history(false)
            .session_settings();
        assert_eq!(settings.history_capacity, 7);
        assert!(!settings.persist_history);
    }

    #[test]
    fn test_logging_follows_variables() {
        let config = GaugeConfig::from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "gauge_session=debug"),
            (LOG_FORMAT_VAR, "compact"),
        ]));
        assert_eq!(
            config.logging(),
            LoggingConfig { level: "gauge_session=debug".into(), format: LogFormat::Compact }
        );
        assert_eq!(GaugeConfig::default().logging(), LoggingConfig::default());
        assert_eq!(
            GaugeConfig::default().with_log_level("warn").logging().level,
            "warn"
        );
    }
}
