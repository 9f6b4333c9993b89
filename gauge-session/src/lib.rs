//! Gauge Session - Interactive conversion state
//!
//! A `ConversionSession` tracks the selected category and units, the last
//! input and its result, a bounded history (most recent first) and the
//! user's favorites. Favorites and history are mirrored to a
//! `PersistenceGateway` as named JSON blobs:
//!
//! - `favorites`: `[{ category, fromUnit, toUnit, label }]`
//! - `history`: `[{ timestamp, category, fromUnit, toUnit, fromValue, toValue }]`

mod clock;
mod error;
mod favorites;
mod history;
mod session;
mod store;
mod transfer;

pub use clock::{iso8601, Clock, ManualClock, SystemClock};
pub use error::{PersistenceError, SessionError};
pub use favorites::{FavoriteEntry, Favorites};
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use session::{ConversionSession, ImportReport, LoadReport, SessionPhase, SessionSettings};
pub use store::{FileStore, MemoryStore, PersistenceGateway, SaveStatus, FAVORITES_BLOB, HISTORY_BLOB};
pub use transfer::{TransferDocument, FORMAT_VERSION};
