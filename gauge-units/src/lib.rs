//! Gauge Units - Unit registry and conversion engine
//!
//! Categories hold named units with a linear factor to their base unit.
//! Temperature is the one affine category, converted through Celsius.
//!
//! Categories:
//! - Length (meter, foot, mile, etc.)
//! - Weight (kilogram, pound, ounce, etc.)
//! - Temperature (celsius, fahrenheit, kelvin, rankine)
//! - Volume (liter, gallon, cup, etc.)
//! - Area (square meter, acre, hectare, etc.)
//! - Speed (m/s, km/h, mph, knot)
//! - Time (second through year)
//! - Digital storage (byte, kB, MiB, etc.)
//! - Energy (joule, calorie, kWh, etc.)
//! - Pressure (pascal, bar, psi, etc.)
//! - Power (watt, horsepower, etc.)
//! - Angle (degree, radian, etc.)

mod category;
mod convert;
mod error;
mod registry;
mod units;
pub mod temperature;

pub use category::{AffineFormula, Category, CategoryKind, FormulaSet, UnitDefinition, IMPERIAL, METRIC};
pub use convert::{convert, convert_all, ConversionRequest, ConversionResult, ConvertedUnit};
pub use error::{ConversionError, RegistryError};
pub use registry::{RegistryBuilder, UnitRegistry};
