//! Session and persistence errors

use gauge_core::GaugeError;
use gauge_units::ConversionError;
use thiserror::Error;

/// Outcome of a user action that could not be carried out.
///
/// `DuplicateFavorite` and `IndexOutOfRange` leave the session unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{category}: {from} to {to} is already a favorite")]
    DuplicateFavorite { category: String, from: String, to: String },

    #[error("index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

impl From<SessionError> for GaugeError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::DuplicateFavorite { category, from, to } => {
                GaugeError::duplicate_favorite(format!("{} {} to {}", category, from, to))
            }
            SessionError::IndexOutOfRange { index, len } => GaugeError::index_out_of_range(index, len),
            SessionError::Conversion(e) => e.into(),
            SessionError::MalformedDocument(e) => GaugeError::malformed_document(e.to_string()),
        }
    }
}

/// Failure to read or write a named blob
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed for '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode or decode '{name}': {source}")]
    Serialization {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage rejected '{name}': {reason}")]
    Rejected { name: String, reason: String },
}

impl PersistenceError {
    /// Name of the blob involved
    pub fn blob(&self) -> &str {
        match self {
            PersistenceError::Io { name, .. }
            | PersistenceError::Serialization { name, .. }
            | PersistenceError::Rejected { name, .. } => name,
        }
    }
}

impl From<PersistenceError> for GaugeError {
    fn from(err: PersistenceError) -> Self {
        GaugeError::persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::{codes, Severity};

    #[test]
    fn test_session_errors_map_to_codes() {
        let dup: GaugeError = SessionError::DuplicateFavorite {
            category: "length".into(),
            from: "meter".into(),
            to: "foot".into(),
        }
        .into();
        assert!(dup.is(codes::DUPLICATE_FAVORITE));
        assert_eq!(dup.severity, Severity::Warning);

        let range: GaugeError = SessionError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert!(range.is(codes::INDEX_OUT_OF_RANGE));

        let conv: GaugeError = SessionError::Conversion(ConversionError::UnknownCategory("x".into())).into();
        assert!(conv.is(codes::UNKNOWN_CATEGORY));
    }

    #[test]
    fn test_persistence_error_names_blob() {
        let err = PersistenceError::Rejected { name: "favorites".into(), reason: "full".into() };
        assert_eq!(err.blob(), "favorites");
        let gauge: GaugeError = err.into();
        assert!(gauge.is(codes::PERSISTENCE));
    }
}
