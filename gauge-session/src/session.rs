//! Conversion session: current selection, input, history and favorites
//!
//! A session is driven by one caller. Every operation runs to completion
//! synchronously. Failed user actions return a `SessionError` and leave
//! the session as it was. Persistence attempts report a `SaveStatus` but
//! never roll back the in-memory change.

use std::fmt;
use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use gauge_core::format_number;
use gauge_units::{convert, convert_all, ConversionError, ConversionResult, ConvertedUnit, UnitDefinition, UnitRegistry};
use crate::clock::{iso8601, Clock, SystemClock};
use crate::error::{PersistenceError, SessionError};
use crate::favorites::{FavoriteEntry, Favorites};
use crate::history::{History, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
use crate::store::{PersistenceGateway, SaveStatus, FAVORITES_BLOB, HISTORY_BLOB};
use crate::transfer::{decode_entries, TransferDocument, FORMAT_VERSION};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Maximum number of history entries kept (at least one)
    pub history_capacity: usize,
    /// Whether history is loaded at hydrate and saved on clear and import
    pub persist_history: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            persist_history: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No input value
    Idle,
    /// Input present and result computed
    HasInput,
}

/// What `hydrate` restored
#[derive(Debug, Default)]
pub struct LoadReport {
    pub favorites: usize,
    pub history: usize,
    /// Entries skipped because they were malformed, unknown or duplicated
    pub dropped: usize,
    pub errors: Vec<PersistenceError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.errors.is_empty()
    }
}

/// What `import_document` applied. `None` means the key was absent.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub favorites: Option<usize>,
    pub history: Option<usize>,
    pub dropped: usize,
    pub saves: Vec<SaveStatus>,
}

pub struct ConversionSession {
    registry: Arc<UnitRegistry>,
    store: Box<dyn PersistenceGateway>,
    clock: Box<dyn Clock>,
    settings: SessionSettings,
    category_key: String,
    from_unit_key: String,
    to_unit_key: String,
    input: Option<f64>,
    result: Option<ConversionResult>,
    history: History,
    favorites: Favorites,
}

impl fmt::Debug for ConversionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionSession")
            .field("category_key", &self.category_key)
            .field("from_unit_key", &self.from_unit_key)
            .field("to_unit_key", &self.to_unit_key)
            .field("input", &self.input)
            .field("result", &self.result)
            .field("history", &self.history.len())
            .field("favorites", &self.favorites.len())
            .finish_non_exhaustive()
    }
}

impl ConversionSession {
    /// Start in the registry's first category, idle, with empty logs
    pub fn new(registry: Arc<UnitRegistry>, store: impl PersistenceGateway + 'static) -> Result<Self, SessionError> {
        let settings = SessionSettings::default();
        let first = registry.first_category().key.clone();
        let mut session = ConversionSession {
            registry,
            store: Box::new(store),
            clock: Box::new(SystemClock),
            history: History::with_capacity(settings.history_capacity),
            settings,
            category_key: String::new(),
            from_unit_key: String::new(),
            to_unit_key: String::new(),
            input: None,
            result: None,
            favorites: Favorites::new(),
        };
        session.reset_to(&first)?;
        Ok(session)
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        let mut history = History::with_capacity(settings.history_capacity);
        history.replace(self.history.to_vec());
        self.history = history;
        self.settings = settings;
        self
    }

    // ============ Accessors ============

    pub fn registry(&self) -> &Arc<UnitRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn category_key(&self) -> &str {
        &self.category_key
    }

    pub fn from_unit_key(&self) -> &str {
        &self.from_unit_key
    }

    pub fn to_unit_key(&self) -> &str {
        &self.to_unit_key
    }

    pub fn from_unit(&self) -> Option<&UnitDefinition> {
        self.registry.get_unit(&self.category_key, &self.from_unit_key).ok()
    }

    pub fn to_unit(&self) -> Option<&UnitDefinition> {
        self.registry.get_unit(&self.category_key, &self.to_unit_key).ok()
    }

    pub fn input(&self) -> Option<f64> {
        self.input
    }

    /// Formatted input value, if any
    pub fn input_display(&self) -> Option<String> {
        self.input.map(format_number)
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.input.is_some() {
            SessionPhase::HasInput
        } else {
            SessionPhase::Idle
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    // ============ Selection ============

    /// Switch category, reset units to its default pair and go idle
    pub fn select_category(&mut self, category_key: &str) -> Result<(), SessionError> {
        self.reset_to(category_key)?;
        debug!(category = category_key, "category selected");
        Ok(())
    }

    /// Change the source unit; recomputes (and logs to history) when input is present
    pub fn select_from_unit(&mut self, unit_key: &str) -> Result<Option<ConversionResult>, SessionError> {
        let to = self.to_unit_key.clone();
        self.set_units(unit_key, &to)
    }

    /// Change the target unit; recomputes (and logs to history) when input is present
    pub fn select_to_unit(&mut self, unit_key: &str) -> Result<Option<ConversionResult>, SessionError> {
        let from = self.from_unit_key.clone();
        self.set_units(&from, unit_key)
    }

    /// Exchange the units and the input/output values.
    ///
    /// The values are swapped as they are: the conversion engine is not
    /// re-run, the new output display is rendered from the old input, and no
    /// history entry is added or saved. Two swaps therefore restore the exact
    /// previous state even where a round trip through the engine would drift.
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit_key, &mut self.to_unit_key);
        if let (Some(input), Some(result)) = (self.input, self.result.take()) {
            self.input = Some(result.output_value);
            self.result = Some(ConversionResult::new(input));
        }
        debug!(from = %self.from_unit_key, to = %self.to_unit_key, "units swapped");
    }

    // ============ Input ============

    /// Text entry. Empty, unparseable or non-finite text makes the session idle.
    pub fn set_input(&mut self, text: &str) -> Result<SessionPhase, SessionError> {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let result = self.run(&self.category_key, &self.from_unit_key, &self.to_unit_key, value)?;
                self.commit(value, result);
                Ok(SessionPhase::HasInput)
            }
            _ => {
                self.clear_input();
                Ok(SessionPhase::Idle)
            }
        }
    }

    /// Numeric entry. A non-finite value is rejected and the session is left as it was.
    pub fn set_value(&mut self, value: f64) -> Result<ConversionResult, SessionError> {
        let result = self.run(&self.category_key, &self.from_unit_key, &self.to_unit_key, value)?;
        self.commit(value, result.clone());
        Ok(result)
    }

    pub fn clear_input(&mut self) {
        self.input = None;
        self.result = None;
    }

    /// The current input converted into every unit of the category
    pub fn conversion_table(&self) -> Result<Option<Vec<ConvertedUnit>>, SessionError> {
        match self.input {
            Some(value) => Ok(Some(convert_all(&self.registry, &self.category_key, &self.from_unit_key, value)?)),
            None => Ok(None),
        }
    }

    // ============ Favorites ============

    /// Pin the current conversion, labelled "From → To"
    pub fn add_favorite(&mut self) -> Result<SaveStatus, SessionError> {
        let label = match (self.from_unit(), self.to_unit()) {
            (Some(from), Some(to)) => format!("{} → {}", from.display_name, to.display_name),
            _ => format!("{} → {}", self.from_unit_key, self.to_unit_key),
        };
        self.add_favorite_with_label(&label)
    }

    pub fn add_favorite_with_label(&mut self, label: &str) -> Result<SaveStatus, SessionError> {
        let entry = FavoriteEntry::new(&self.category_key, &self.from_unit_key, &self.to_unit_key, label);
        self.favorites.add(entry)?;
        info!(category = %self.category_key, from = %self.from_unit_key, to = %self.to_unit_key, "favorite added");
        Ok(self.save_favorites())
    }

    pub fn remove_favorite(&mut self, index: usize) -> Result<SaveStatus, SessionError> {
        let removed = self.favorites.remove(index)?;
        info!(index, label = %removed.label, "favorite removed");
        Ok(self.save_favorites())
    }

    /// Load a favorite's category and units. Input survives when the category is unchanged.
    pub fn apply_favorite(&mut self, index: usize) -> Result<Option<ConversionResult>, SessionError> {
        let favorite = self
            .favorites
            .get(index)
            .cloned()
            .ok_or(SessionError::IndexOutOfRange { index, len: self.favorites.len() })?;
        self.registry.get_unit(&favorite.category_key, &favorite.from_unit_key)?;
        self.registry.get_unit(&favorite.category_key, &favorite.to_unit_key)?;

        if favorite.category_key != self.category_key {
            self.reset_to(&favorite.category_key)?;
        }
        self.set_units(&favorite.from_unit_key, &favorite.to_unit_key)
    }

    // ============ History ============

    /// Re-run a history entry with its category, units and input
    pub fn reuse_history(&mut self, index: usize) -> Result<ConversionResult, SessionError> {
        let entry = self
            .history
            .get(index)
            .cloned()
            .ok_or(SessionError::IndexOutOfRange { index, len: self.history.len() })?;
        let result = self.run(&entry.category_key, &entry.from_unit_key, &entry.to_unit_key, entry.input_value)?;
        self.category_key = entry.category_key;
        self.from_unit_key = entry.from_unit_key;
        self.to_unit_key = entry.to_unit_key;
        self.commit(entry.input_value, result.clone());
        Ok(result)
    }

    /// Empty the history. Returns the save outcome when history is persisted.
    pub fn clear_history(&mut self) -> Option<SaveStatus> {
        self.history.clear();
        info!("history cleared");
        self.settings.persist_history.then(|| self.save_history())
    }

    pub fn save_history(&self) -> SaveStatus {
        self.save(HISTORY_BLOB, &self.history.to_vec())
    }

    pub fn save_favorites(&self) -> SaveStatus {
        self.save(FAVORITES_BLOB, &self.favorites.to_vec())
    }

    // ============ Persistence ============

    /// Restore favorites (and history, when persisted) from the store.
    ///
    /// Never fails: unreadable blobs are reported in `errors`, and entries
    /// naming unknown units are dropped.
    pub fn hydrate(&mut self) -> LoadReport {
        let mut report = LoadReport::default();

        match self.load_entries::<FavoriteEntry>(FAVORITES_BLOB) {
            Ok(Some((entries, malformed))) => {
                let (known, unknown) = self.retain_known_favorites(entries);
                let duplicates = self.favorites.replace(known);
                report.favorites = self.favorites.len();
                report.dropped += malformed + unknown + duplicates;
            }
            Ok(None) => {}
            Err(e) => report.errors.push(e),
        }

        if self.settings.persist_history {
            match self.load_entries::<HistoryEntry>(HISTORY_BLOB) {
                Ok(Some((entries, malformed))) => {
                    let (known, unknown) = self.retain_known_history(entries);
                    self.history.replace(known);
                    report.history = self.history.len();
                    report.dropped += malformed + unknown;
                }
                Ok(None) => {}
                Err(e) => report.errors.push(e),
            }
        }

        for error in &report.errors {
            warn!(blob = error.blob(), error = %error, "could not load blob");
        }
        if report.dropped > 0 {
            warn!(dropped = report.dropped, "skipped invalid stored entries");
        }
        info!(favorites = report.favorites, history = report.history, "session hydrated");
        report
    }

    /// Snapshot of favorites and history stamped with the current time
    pub fn export_document(&self) -> TransferDocument {
        TransferDocument {
            favorites: Some(self.favorites.to_vec()),
            history: Some(self.history.to_vec()),
            export_date: Some(iso8601(self.clock.now_millis())),
            version: Some(FORMAT_VERSION.to_string()),
        }
    }

    pub fn export_json(&self) -> Result<String, SessionError> {
        self.export_document().to_json_pretty()
    }

    /// Parse and apply an exported document.
    ///
    /// Entries that do not decode are skipped and counted in `dropped`; a
    /// document whose `favorites` or `history` is not an array changes nothing.
    pub fn import_document(&mut self, json: &str) -> Result<ImportReport, SessionError> {
        let (document, malformed) = TransferDocument::parse_lenient(json)?;
        Ok(self.apply(document, malformed))
    }

    /// Replace favorites and/or history with whichever arrays the document carries
    pub fn apply_document(&mut self, document: TransferDocument) -> ImportReport {
        self.apply(document, 0)
    }

    // ============ Internals ============

    fn apply(&mut self, document: TransferDocument, malformed: usize) -> ImportReport {
        let mut report = ImportReport {
            dropped: malformed,
            ..Default::default()
        };

        if let Some(entries) = document.favorites {
            let (known, unknown) = self.retain_known_favorites(entries);
            let duplicates = self.favorites.replace(known);
            report.favorites = Some(self.favorites.len());
            report.dropped += unknown + duplicates;
            report.saves.push(self.save_favorites());
        }

        if let Some(entries) = document.history {
            let (known, unknown) = self.retain_known_history(entries);
            self.history.replace(known);
            report.history = Some(self.history.len());
            report.dropped += unknown;
            if self.settings.persist_history {
                report.saves.push(self.save_history());
            }
        }

        if report.dropped > 0 {
            warn!(dropped = report.dropped, "skipped invalid imported entries");
        }
        info!(favorites = ?report.favorites, history = ?report.history, "document imported");
        report
    }

    fn reset_to(&mut self, category_key: &str) -> Result<(), ConversionError> {
        let (from, to) = {
            let category = self.registry.get_category(category_key)?;
            let (from, to) = category
                .default_pair()
                .ok_or_else(|| ConversionError::UnknownCategory(category_key.to_string()))?;
            (from.key.clone(), to.key.clone())
        };
        self.category_key = category_key.to_string();
        self.from_unit_key = from;
        self.to_unit_key = to;
        self.clear_input();
        Ok(())
    }

    fn set_units(&mut self, from: &str, to: &str) -> Result<Option<ConversionResult>, SessionError> {
        self.registry.get_unit(&self.category_key, from)?;
        self.registry.get_unit(&self.category_key, to)?;
        let recomputed = match self.input {
            Some(value) => Some((value, self.run(&self.category_key, from, to, value)?)),
            None => None,
        };
        self.from_unit_key = from.to_string();
        self.to_unit_key = to.to_string();
        Ok(recomputed.map(|(value, result)| {
            self.commit(value, result.clone());
            result
        }))
    }

    fn run(&self, category_key: &str, from: &str, to: &str, value: f64) -> Result<ConversionResult, ConversionError> {
        convert(&self.registry, category_key, from, to, value).map(ConversionResult::new)
    }

    fn commit(&mut self, value: f64, result: ConversionResult) {
        let entry = HistoryEntry {
            timestamp_millis: self.clock.now_millis(),
            category_key: self.category_key.clone(),
            from_unit_key: self.from_unit_key.clone(),
            to_unit_key: self.to_unit_key.clone(),
            input_value: value,
            output_value: result.output_value,
        };
        if let Some(evicted) = self.history.push(entry) {
            debug!(timestamp = evicted.timestamp_millis, "oldest history entry evicted");
        }
        self.input = Some(value);
        self.result = Some(result);
    }

    fn save<T: Serialize>(&self, name: &str, entries: &T) -> SaveStatus {
        let result = serde_json::to_value(entries)
            .map_err(|source| PersistenceError::Serialization {
                name: name.to_string(),
                source,
            })
            .and_then(|value| self.store.save_blob(name, &value));
        SaveStatus::from_result(result)
    }

    /// Decode a stored array entry by entry. Returns the decoded entries and
    /// the number that did not decode.
    fn load_entries<T: DeserializeOwned>(&self, name: &str) -> Result<Option<(Vec<T>, usize)>, PersistenceError> {
        let Some(value) = self.store.load_blob(name)? else {
            return Ok(None);
        };
        let items: Vec<JsonValue> = serde_json::from_value(value).map_err(|source| PersistenceError::Serialization {
            name: name.to_string(),
            source,
        })?;
        Ok(Some(decode_entries(items)))
    }

    fn knows(&self, category_key: &str, from: &str, to: &str) -> bool {
        self.registry.get_unit(category_key, from).is_ok() && self.registry.get_unit(category_key, to).is_ok()
    }

    fn retain_known_favorites(&self, entries: Vec<FavoriteEntry>) -> (Vec<FavoriteEntry>, usize) {
        let total = entries.len();
        let known: Vec<_> = entries
            .into_iter()
            .filter(|f| self.knows(&f.category_key, &f.from_unit_key, &f.to_unit_key))
            .collect();
        let unknown = total - known.len();
        (known, unknown)
    }

    fn retain_known_history(&self, entries: Vec<HistoryEntry>) -> (Vec<HistoryEntry>, usize) {
        let total = entries.len();
        let known: Vec<_> = entries
            .into_iter()
            .filter(|h| {
                h.input_value.is_finite()
                    && h.output_value.is_finite()
                    && self.knows(&h.category_key, &h.from_unit_key, &h.to_unit_key)
            })
            .collect();
        let unknown = total - known.len();
        (known, unknown)
    }
}
