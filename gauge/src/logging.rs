//! Tracing subscriber setup

use std::fmt;
use std::io;
use tracing::info;
use tracing_subscriber::{fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human readable
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `gauge_session=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::new(&self.level)
    }
}

/// Install the global subscriber.
///
/// The environment is not consulted here; build the config with
/// `GaugeConfig::from_env().logging()` to honor `RUST_LOG`.
///
/// Returns `false` if a subscriber was already installed, in which case
/// nothing changes.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt_layer::layer().json().with_target(true).with_writer(io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Pretty => registry
            .with(fmt_layer::layer().pretty().with_target(true).with_writer(io::stderr))
            .try_init()
            .is_ok(),
        LogFormat::Compact => registry
            .with(fmt_layer::layer().compact().with_target(false).with_writer(io::stderr))
            .try_init()
            .is_ok(),
    };

    if installed {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            log.level = %config.level,
            log.format = %config.format,
            "logging initialized"
        );
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" compact "), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig { level: "warn".into(), format: LogFormat::Compact };
        // Another test may have installed a subscriber first; either way the
        // second call must report that nothing was installed.
        let _ = init_logging(&config);
        assert!(!init_logging(&config));
    }
}
