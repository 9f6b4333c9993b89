//! Temperature scales, routed through Celsius

use crate::category::FormulaSet;

pub const CELSIUS: &str = "celsius";
pub const FAHRENHEIT: &str = "fahrenheit";
pub const KELVIN: &str = "kelvin";
pub const RANKINE: &str = "rankine";

/// Offset between the Celsius and Kelvin zero points
pub const ABSOLUTE_ZERO_C: f64 = 273.15;

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - ABSOLUTE_ZERO_C
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + ABSOLUTE_ZERO_C
}

pub fn rankine_to_celsius(r: f64) -> f64 {
    r / 9.0 * 5.0 - ABSOLUTE_ZERO_C
}

pub fn celsius_to_rankine(c: f64) -> f64 {
    (c + ABSOLUTE_ZERO_C) * 9.0 / 5.0
}

/// Formula set with Celsius as the pivot
pub fn formulas() -> FormulaSet {
    FormulaSet::new(CELSIUS)
        .with(FAHRENHEIT, fahrenheit_to_celsius, celsius_to_fahrenheit)
        .with(KELVIN, kelvin_to_celsius, celsius_to_kelvin)
        .with(RANKINE, rankine_to_celsius, celsius_to_rankine)
}
