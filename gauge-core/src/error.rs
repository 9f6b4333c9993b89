//! Structured errors for UI consumption
//!
//! Every crate in the workspace has its own typed error enum. At the
//! boundary they collapse into `GaugeError`, which carries a stable
//! machine-readable code so a UI layer can decide how to present it.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const DUPLICATE_FAVORITE: &str = "DUPLICATE_FAVORITE";
    pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
    pub const MALFORMED_DOCUMENT: &str = "MALFORMED_DOCUMENT";
    pub const PERSISTENCE: &str = "PERSISTENCE";
    pub const INVALID_REGISTRY: &str = "INVALID_REGISTRY";
    pub const CONFIG: &str = "CONFIG";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The action was refused; state is unchanged
    Warning,
    /// The action failed
    Error,
    /// The converter cannot be used until the cause is fixed
    Fatal,
}

/// Structured error surfaced to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl GaugeError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// True if the error carries the given code
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// Serialize for a UI bridge
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({ "code": self.code, "message": self.message })
        })
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_category(key: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", key))
            .with_suggestion("List the available categories and pick one of their keys")
            .with_severity(Severity::Fatal)
    }

    pub fn unknown_unit(category: &str, key: &str) -> Self {
        Self::new(
            codes::UNKNOWN_UNIT,
            format!("Unknown unit '{}' in category '{}'", key, category),
        )
        .with_suggestion(format!("Use a unit key listed for '{}'", category))
        .with_severity(Severity::Fatal)
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_VALUE, format!("Invalid value: {}", details.into()))
            .with_suggestion("Enter a finite number")
    }

    pub fn duplicate_favorite(details: impl Into<String>) -> Self {
        Self::new(
            codes::DUPLICATE_FAVORITE,
            format!("Already a favorite: {}", details.into()),
        )
        .with_severity(Severity::Warning)
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            codes::INDEX_OUT_OF_RANGE,
            format!("Index {} out of range (length {})", index, len),
        )
        .with_severity(Severity::Warning)
    }

    pub fn malformed_document(details: impl Into<String>) -> Self {
        Self::new(
            codes::MALFORMED_DOCUMENT,
            format!("Malformed document: {}", details.into()),
        )
        .with_suggestion("Import a file produced by the export function")
    }

    pub fn persistence(details: impl Into<String>) -> Self {
        Self::new(codes::PERSISTENCE, format!("Storage error: {}", details.into()))
            .with_suggestion("Changes are kept for this session only")
            .with_severity(Severity::Warning)
    }

    pub fn invalid_registry(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_REGISTRY,
            format!("Invalid unit table: {}", details.into()),
        )
        .with_severity(Severity::Fatal)
    }

    pub fn config(details: impl Into<String>) -> Self {
        Self::new(codes::CONFIG, format!("Configuration error: {}", details.into()))
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for GaugeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_suggestion() {
        let err = GaugeError::unknown_category("doesNotExist");
        let text = err.to_string();
        assert!(text.starts_with("[UNKNOWN_CATEGORY]"));
        assert!(text.contains("doesNotExist"));
        assert!(text.contains("suggestion:"));
    }

    #[test]
    fn test_user_action_errors_are_warnings() {
        assert_eq!(GaugeError::duplicate_favorite("x").severity, Severity::Warning);
        assert_eq!(GaugeError::index_out_of_range(3, 1).severity, Severity::Warning);
        assert_eq!(GaugeError::unknown_unit("length", "x").severity, Severity::Fatal);
    }

    #[test]
    fn test_to_json_skips_missing_suggestion() {
        let json = GaugeError::new(codes::INTERNAL, "boom").to_json();
        assert_eq!(json["code"], "INTERNAL");
        assert_eq!(json["severity"], "error");
        assert!(json.get("suggestion").is_none());
    }
}
