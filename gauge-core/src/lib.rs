//! Gauge Core - Fundamental types
//!
//! This crate provides the types shared by every Gauge crate:
//! - `GaugeError`: Structured errors with machine-readable codes
//! - `format_number`: Display policy for conversion results

mod error;
mod format;

pub use error::{codes, GaugeError, Severity};
pub use format::{format_number, GROUPED_ABOVE, SCIENTIFIC_ABOVE, SCIENTIFIC_BELOW};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{format_number, GaugeError, Severity};
}
