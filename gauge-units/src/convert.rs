//! Conversion engine
//!
//! Pure functions over a `UnitRegistry`. Linear categories use
//! `value * factor[from] / factor[to]`, multiplying into the base unit
//! first and dividing out of it second. Affine categories are routed
//! through their pivot unit.

use serde::{Deserialize, Serialize};
use tracing::debug;
use gauge_core::format_number;
use crate::category::CategoryKind;
use crate::error::ConversionError;
use crate::registry::UnitRegistry;

/// Convert `value` from one unit to another within a category
pub fn convert(
    registry: &UnitRegistry,
    category_key: &str,
    from_unit_key: &str,
    to_unit_key: &str,
    value: f64,
) -> Result<f64, ConversionError> {
    let category = registry.get_category(category_key)?;
    let from = registry.get_unit(category_key, from_unit_key)?;
    let to = registry.get_unit(category_key, to_unit_key)?;

    if !value.is_finite() {
        return Err(ConversionError::InvalidValue { value, reason: "not a finite number" });
    }

    if from.key == to.key {
        return Ok(value);
    }

    let result = match &category.kind {
        CategoryKind::Linear => {
            let in_base = value * from.factor;
            in_base / to.factor
        }
        CategoryKind::Affine(formulas) => {
            let pivot = formulas
                .to_pivot(&from.key, value)
                .ok_or_else(|| ConversionError::unknown_unit(category_key, &from.key))?;
            formulas
                .from_pivot(&to.key, pivot)
                .ok_or_else(|| ConversionError::unknown_unit(category_key, &to.key))?
        }
    };

    if !result.is_finite() {
        return Err(ConversionError::InvalidValue { value, reason: "result is out of range" });
    }

    debug!(category = category_key, from = from_unit_key, to = to_unit_key, value, result, "converted");
    Ok(result)
}

/// One row of a conversion table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedUnit {
    pub unit_key: String,
    pub symbol: String,
    pub value: f64,
    pub display_string: String,
}

/// Convert `value` into every unit of the category, in definition order
pub fn convert_all(
    registry: &UnitRegistry,
    category_key: &str,
    from_unit_key: &str,
    value: f64,
) -> Result<Vec<ConvertedUnit>, ConversionError> {
    let category = registry.get_category(category_key)?;
    category
        .units()
        .iter()
        .map(|unit| {
            let converted = convert(registry, category_key, from_unit_key, &unit.key, value)?;
            Ok(ConvertedUnit {
                unit_key: unit.key.clone(),
                symbol: unit.symbol.clone(),
                value: converted,
                display_string: format_number(converted),
            })
        })
        .collect()
}

/// A single conversion to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub category_key: String,
    pub from_unit_key: String,
    pub to_unit_key: String,
    pub input_value: f64,
}

impl ConversionRequest {
    pub fn new(category_key: &str, from_unit_key: &str, to_unit_key: &str, input_value: f64) -> Self {
        ConversionRequest {
            category_key: category_key.to_string(),
            from_unit_key: from_unit_key.to_string(),
            to_unit_key: to_unit_key.to_string(),
            input_value,
        }
    }

    /// Convert and format
    pub fn execute(&self, registry: &UnitRegistry) -> Result<ConversionResult, ConversionError> {
        let output_value = convert(
            registry,
            &self.category_key,
            &self.from_unit_key,
            &self.to_unit_key,
            self.input_value,
        )?;
        Ok(ConversionResult::new(output_value))
    }
}

/// Numeric output plus its display string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub output_value: f64,
    pub display_string: String,
}

impl ConversionResult {
    pub fn new(output_value: f64) -> Self {
        ConversionResult {
            output_value,
            display_string: format_number(output_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 5] = [0.0, 1.0, -1.0, 1e-6, 1e9];

    fn registry() -> std::sync::Arc<UnitRegistry> {
        UnitRegistry::builtin()
    }

    fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
        if a == b {
            return true;
        }
        (a - b).abs() <= rel * a.abs().max(b.abs())
    }

    #[test]
    fn test_linear_round_trip_all_pairs() {
        let registry = registry();
        for category in registry.list_categories().iter().filter(|c| c.kind.is_linear()) {
            for a in category.units() {
                for b in category.units() {
                    for &x in &SAMPLES {
                        let there = convert(&registry, &category.key, &a.key, &b.key, x).unwrap();
                        let back = convert(&registry, &category.key, &b.key, &a.key, there).unwrap();
                        assert!(
                            approx_eq(back, x, 1e-9),
                            "{}: {} {} -> {} -> {} gave {}",
                            category.key, x, a.key, b.key, a.key, back
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_round_trip() {
        let registry = registry();
        let category = registry.get_category("temperature").unwrap();
        for a in category.units() {
            for b in category.units() {
                for &x in &[-40.0, 0.0, 37.0, 100.0, 1000.0] {
                    let there = convert(&registry, "temperature", &a.key, &b.key, x).unwrap();
                    let back = convert(&registry, "temperature", &b.key, &a.key, there).unwrap();
                    assert!((back - x).abs() < 1e-9, "{} {} -> {} -> back = {}", x, a.key, b.key, back);
                }
            }
        }
    }

    #[test]
    fn test_identity_is_exact_everywhere() {
        let registry = registry();
        for category in registry.list_categories() {
            for unit in category.units() {
                for &x in &[0.1, -273.15, 1.0 / 3.0, 1e300] {
                    let out = convert(&registry, &category.key, &unit.key, &unit.key, x).unwrap();
                    assert_eq!(out, x, "{}/{}", category.key, unit.key);
                }
            }
        }
    }

    #[test]
    fn test_temperature_fixed_points() {
        let registry = registry();
        assert_eq!(convert(&registry, "temperature", "celsius", "fahrenheit", 0.0).unwrap(), 32.0);
        assert_eq!(convert(&registry, "temperature", "celsius", "fahrenheit", 100.0).unwrap(), 212.0);
        assert_eq!(convert(&registry, "temperature", "celsius", "kelvin", 0.0).unwrap(), 273.15);
        assert_eq!(convert(&registry, "temperature", "fahrenheit", "celsius", 32.0).unwrap(), 0.0);
    }

    #[test]
    fn test_temperature_routes_through_celsius() {
        let registry = registry();
        let k = convert(&registry, "temperature", "fahrenheit", "kelvin", 212.0).unwrap();
        assert!((k - 373.15).abs() < 1e-9);
        let r = convert(&registry, "temperature", "kelvin", "rankine", 0.0).unwrap();
        assert!(r.abs() < 1e-9);
    }

    #[test]
    fn test_linear_examples() {
        let registry = registry();
        let ft = convert(&registry, "length", "meter", "foot", 1.0).unwrap();
        assert!((ft - 3.280839895).abs() < 1e-6);
        let lb = convert(&registry, "weight", "kilogram", "pound", 1.0).unwrap();
        assert!((lb - 2.20462262).abs() < 1e-6);
        let m = convert(&registry, "length", "kilometer", "meter", 5.0).unwrap();
        assert_eq!(m, 5000.0);
    }

    #[test]
    fn test_unknown_identifiers() {
        let registry = registry();
        assert_eq!(
            convert(&registry, "length", "meter", "doesNotExist", 1.0),
            Err(ConversionError::UnknownUnit {
                category: "length".to_string(),
                unit: "doesNotExist".to_string(),
            })
        );
        assert_eq!(
            convert(&registry, "doesNotExist", "a", "b", 1.0),
            Err(ConversionError::UnknownCategory("doesNotExist".to_string()))
        );
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let registry = registry();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert(&registry, "length", "meter", "foot", bad).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidValue { .. }));
        }
        // Identity does not bypass the check
        let err = convert(&registry, "length", "meter", "meter", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { .. }));
    }

    #[test]
    fn test_overflowing_result_rejected() {
        let registry = registry();
        let err = convert(&registry, "length", "kilometer", "nanometer", f64::MAX).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { .. }));
    }

    #[test]
    fn test_request_execute_formats() {
        let registry = registry();
        let result = ConversionRequest::new("length", "kilometer", "meter", 1500.0)
            .execute(&registry)
            .unwrap();
        assert_eq!(result.output_value, 1_500_000.0);
        assert_eq!(result.display_string, "1,500,000");
    }

    #[test]
    fn test_convert_all_in_definition_order() {
        let registry = registry();
        let rows = convert_all(&registry, "temperature", "celsius", 100.0).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.unit_key.as_str()).collect();
        assert_eq!(keys, vec!["celsius", "fahrenheit", "kelvin", "rankine"]);
        assert_eq!(rows[0].value, 100.0);
        assert_eq!(rows[1].value, 212.0);
        assert_eq!(rows[1].display_string, "212");
    }

    #[test]
    fn test_convert_all_propagates_unknown_unit() {
        let registry = registry();
        assert!(matches!(
            convert_all(&registry, "length", "parsec", 1.0),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }
}
