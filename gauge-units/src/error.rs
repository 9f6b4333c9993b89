//! Errors raised by the registry and the conversion engine

use gauge_core::GaugeError;
use thiserror::Error;

/// Errors that can occur during lookup or conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown unit '{unit}' in category '{category}'")]
    UnknownUnit { category: String, unit: String },

    #[error("invalid value {value}: {reason}")]
    InvalidValue { value: f64, reason: &'static str },
}

impl ConversionError {
    pub(crate) fn unknown_unit(category: &str, unit: &str) -> Self {
        ConversionError::UnknownUnit {
            category: category.to_string(),
            unit: unit.to_string(),
        }
    }
}

impl From<ConversionError> for GaugeError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCategory(key) => GaugeError::unknown_category(&key),
            ConversionError::UnknownUnit { category, unit } => GaugeError::unknown_unit(&category, &unit),
            e @ ConversionError::InvalidValue { .. } => GaugeError::invalid_value(e.to_string()),
        }
    }
}

/// Violations of the unit table invariants, reported when a registry is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("registry has no categories")]
    NoCategories,

    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("category '{0}' has no units")]
    EmptyCategory(String),

    #[error("unit '{unit}' is defined more than once in category '{category}'")]
    DuplicateUnit { category: String, unit: String },

    #[error("base unit '{unit}' of category '{category}' is not one of its units")]
    MissingBaseUnit { category: String, unit: String },

    #[error("unit '{unit}' in category '{category}' has factor {factor}, expected a positive finite number")]
    InvalidFactor { category: String, unit: String, factor: f64 },

    #[error("unit '{unit}' in category '{category}' has no conversion formula")]
    MissingFormula { category: String, unit: String },
}

impl From<RegistryError> for GaugeError {
    fn from(err: RegistryError) -> Self {
        GaugeError::invalid_registry(err.to_string())
    }
}
