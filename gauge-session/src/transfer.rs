//! Import/export document
//!
//! ```json
//! { "favorites": [...], "history": [...], "exportDate": "2024-01-02T03:04:05.006Z", "version": "1.0" }
//! ```
//!
//! Either array may be missing on import. Unknown keys are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use crate::error::SessionError;
use crate::favorites::FavoriteEntry;
use crate::history::HistoryEntry;

/// Version written into every export
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<FavoriteEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Same layout with the arrays left undecoded
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawDocument {
    favorites: Option<Vec<JsonValue>>,
    history: Option<Vec<JsonValue>>,
    export_date: Option<JsonValue>,
    version: Option<JsonValue>,
}

impl TransferDocument {
    pub fn parse(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse, skipping array entries that do not decode.
    ///
    /// The document itself must still be an object whose `favorites` and
    /// `history` are arrays when present. Returns the number of skipped entries.
    pub fn parse_lenient(json: &str) -> Result<(Self, usize), SessionError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let mut skipped = 0;
        let favorites = raw.favorites.map(|items| {
            let (entries, bad) = decode_entries::<FavoriteEntry>(items);
            skipped += bad;
            entries
        });
        let history = raw.history.map(|items| {
            let (entries, bad) = decode_entries::<HistoryEntry>(items);
            skipped += bad;
            entries
        });
        let document = Self {
            favorites,
            history,
            export_date: raw.export_date.and_then(|v| v.as_str().map(str::to_owned)),
            version: raw.version.and_then(|v| v.as_str().map(str::to_owned)),
        };
        Ok((document, skipped))
    }

    pub fn to_json_pretty(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Decode each item on its own; returns the decoded entries and how many failed
pub(crate) fn decode_entries<T: DeserializeOwned>(items: Vec<JsonValue>) -> (Vec<T>, usize) {
    let total = items.len();
    let entries: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let failed = total - entries.len();
    (entries, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_favorites_only() {
        let doc = TransferDocument::parse(
            r#"{ "favorites": [ { "category": "length", "fromUnit": "meter", "toUnit": "foot", "label": "m to ft" } ],
                 "somethingElse": 42 }"#,
        )
        .unwrap();
        assert_eq!(doc.favorites.as_ref().unwrap().len(), 1);
        assert!(doc.history.is_none());
        assert!(doc.version.is_none());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = TransferDocument::parse(r#"{ "favorites": "nope" }"#).unwrap_err();
        assert!(matches!(err, SessionError::MalformedDocument(_)));
        assert!(TransferDocument::parse("not json").is_err());
    }

    #[test]
    fn test_serialize_skips_missing_arrays() {
        let doc = TransferDocument {
            history: Some(vec![]),
            version: Some(FORMAT_VERSION.to_string()),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert!(value.get("favorites").is_none());
        assert_eq!(value["history"], serde_json::json!([]));
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn test_parse_lenient_skips_bad_entries() {
        let json = r#"{ "favorites": [
                { "category": "length", "fromUnit": "meter", "toUnit": "foot", "label": "m to ft" },
                { "category": "length", "fromUnit": "meter", "toUnit": "inch" }
            ],
            "exportDate": 17 }"#;
        assert!(TransferDocument::parse(json).is_err());

        let (doc, skipped) = TransferDocument::parse_lenient(json).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(doc.favorites.unwrap()[0].to_unit_key, "foot");
        assert!(doc.history.is_none());
        assert!(doc.export_date.is_none());
    }

    #[test]
    fn test_parse_lenient_still_checks_shape() {
        let err = TransferDocument::parse_lenient(r#"{ "history": {} }"#).unwrap_err();
        assert!(matches!(err, SessionError::MalformedDocument(_)));
        assert!(TransferDocument::parse_lenient("[]").is_err());
    }
}
