//! Gauge - Unit conversion with history and favorites
//!
//! ```no_run
//! use gauge::{init_logging, Gauge, GaugeConfig};
//!
//! let config = GaugeConfig::from_env();
//! init_logging(&config.logging());
//! let mut gauge = Gauge::open(config)?;
//! let result = gauge.convert("length", "meter", "foot", 1.0)?;
//! assert_eq!(result.display_string, "3.28084");
//!
//! let session = gauge.session_mut();
//! session.select_category("temperature")?;
//! session.set_input("100")?;
//! # Ok::<(), gauge::GaugeError>(())
//! ```

pub mod config;
pub mod logging;

pub use config::GaugeConfig;
pub use logging::{init_logging, LogFormat, LoggingConfig};

pub use gauge_core::{codes, format_number, GaugeError, Severity};
pub use gauge_session::{
    Clock, ConversionSession, FavoriteEntry, FileStore, HistoryEntry, ImportReport, LoadReport, ManualClock,
    MemoryStore, PersistenceError, PersistenceGateway, SaveStatus, SessionError, SessionPhase, SessionSettings,
    SystemClock, TransferDocument,
};
pub use gauge_units::{
    Category, ConversionError, ConversionRequest, ConversionResult, ConvertedUnit, UnitDefinition, UnitRegistry,
};

use std::sync::Arc;
use tracing::info;

/// Main Gauge engine: the unit registry plus one conversion session
pub struct Gauge {
    registry: Arc<UnitRegistry>,
    session: ConversionSession,
    config: GaugeConfig,
    load_report: LoadReport,
}

impl Gauge {
    /// Open with a file store under `config.data_path` and restore saved state
    pub fn open(config: GaugeConfig) -> Result<Self, GaugeError> {
        if config.data_path.as_os_str().is_empty() {
            return Err(GaugeError::config("data path is empty"));
        }
        let store = FileStore::open(&config.data_path)?;
        info!(path = %config.data_path.display(), "opening gauge");
        Self::with_store(config, store)
    }

    /// Backed by a fresh `MemoryStore`; nothing is read or written to disk
    pub fn in_memory() -> Result<Self, GaugeError> {
        Self::with_store(GaugeConfig::default(), MemoryStore::new())
    }

    /// Build on any store and hydrate from it
    pub fn with_store(config: GaugeConfig, store: impl PersistenceGateway + 'static) -> Result<Self, GaugeError> {
        let registry = UnitRegistry::builtin();
        let mut session = ConversionSession::new(Arc::clone(&registry), store)?
            .with_settings(config.session_settings());
        let load_report = session.hydrate();
        Ok(Self {
            registry,
            session,
            config,
            load_report,
        })
    }

    /// Swap the session clock, e.g. for deterministic timestamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.session = self.session.with_clock(clock);
        self
    }

    /// One-off conversion that does not touch the session
    pub fn convert(&self, category_key: &str, from_unit_key: &str, to_unit_key: &str, value: f64) -> Result<ConversionResult, GaugeError> {
        Ok(ConversionRequest::new(category_key, from_unit_key, to_unit_key, value).execute(&self.registry)?)
    }

    pub fn convert_all(&self, category_key: &str, from_unit_key: &str, value: f64) -> Result<Vec<ConvertedUnit>, GaugeError> {
        Ok(gauge_units::convert_all(&self.registry, category_key, from_unit_key, value)?)
    }

    pub fn categories(&self) -> &[Category] {
        self.registry.list_categories()
    }

    pub fn registry(&self) -> &Arc<UnitRegistry> {
        &self.registry
    }

    pub fn session(&self) -> &ConversionSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ConversionSession {
        &mut self.session
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// What was restored when the gauge was opened
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        let gauge = Gauge::in_memory().unwrap();
        let result = gauge.convert("length", "meter", "foot", 1.0).unwrap();
        assert_eq!(result.display_string, "3.28084");

        let freezing = gauge.convert("temperature", "fahrenheit", "celsius", 32.0).unwrap();
        assert!(freezing.output_value.abs() < 1e-9);
    }

    #[test]
    fn test_convert_errors_carry_codes() {
        let gauge = Gauge::in_memory().unwrap();
        let err = gauge.convert("doesNotExist", "a", "b", 1.0).unwrap_err();
        assert!(err.is(codes::UNKNOWN_CATEGORY));
        let err = gauge.convert("length", "meter", "cubit", 1.0).unwrap_err();
        assert!(err.is(codes::UNKNOWN_UNIT));
        let err = gauge.convert("length", "meter", "foot", f64::INFINITY).unwrap_err();
        assert!(err.is(codes::INVALID_VALUE));
    }

    #[test]
    fn test_categories() {
        let gauge = Gauge::in_memory().unwrap();
        let keys: Vec<_> = gauge.categories().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0], "length");
        assert!(keys.contains(&"temperature"));
    }

    #[test]
    fn test_convert_all() {
        let gauge = Gauge::in_memory().unwrap();
        let table = gauge.convert_all("data", "kilobyte", 1.0).unwrap();
        assert_eq!(table.len(), gauge.registry().get_category("data").unwrap().units().len());
    }

    #[test]
    fn test_favorites_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = GaugeConfig::default().with_data_path(dir.path());

        {
            let mut gauge = Gauge::open(config.clone()).unwrap();
            assert!(gauge.load_report().is_clean());
            let session = gauge.session_mut();
            session.select_to_unit("foot").unwrap();
            assert!(session.add_favorite().unwrap().is_saved());
            session.set_input("2").unwrap();
            assert!(session.save_history().is_saved());
        }

        let gauge = Gauge::open(config).unwrap();
        assert_eq!(gauge.load_report().favorites, 1);
        assert_eq!(gauge.load_report().history, 1);
        let favorite = gauge.session().favorites().get(0).unwrap();
        assert_eq!(favorite.to_unit_key, "foot");
        assert_eq!(gauge.session().history().newest().unwrap().input_value, 2.0);
    }

    #[test]
    fn test_open_rejects_empty_data_path() {
        let err = Gauge::open(GaugeConfig::default().with_data_path("")).err().unwrap();
        assert!(err.is(codes::CONFIG));
    }

    #[test]
    fn test_history_not_restored_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = GaugeConfig::default().with_data_path(dir.path());
        {
            let mut gauge = Gauge::open(config.clone()).unwrap();
            gauge.session_mut().set_value(5.0).unwrap();
            assert!(gauge.session().save_history().is_saved());
        }

        let gauge = Gauge::open(config.with_persist_history(false)).unwrap();
        assert!(gauge.session().history().is_empty());
    }

    #[test]
    fn test_with_clock_stamps_history() {
        let clock = ManualClock::new(42);
        let mut gauge = Gauge::in_memory().unwrap().with_clock(clock);
        gauge.session_mut().set_value(1.0).unwrap();
        assert_eq!(gauge.session().history().newest().unwrap().timestamp_millis, 42);
    }
}
