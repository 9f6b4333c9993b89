//! Categories and the units they contain

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;

/// Subgroup tags used by the built-in table
pub const METRIC: &str = "metric";
pub const IMPERIAL: &str = "imperial";

/// A named unit inside a category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDefinition {
    /// Identifier, unique within its category (e.g. "meter")
    pub key: String,
    /// Display name (e.g. "Meter")
    pub display_name: String,
    /// Short symbol (e.g. "m")
    pub symbol: String,
    /// Ratio to the category's base unit. Meaningless for affine categories.
    pub factor: f64,
    /// Display grouping tag (e.g. "metric", "imperial")
    pub subgroup: String,
}

impl UnitDefinition {
    pub fn new(key: &str, display_name: &str, symbol: &str, factor: f64, subgroup: &str) -> Self {
        UnitDefinition {
            key: key.to_string(),
            display_name: display_name.to_string(),
            symbol: symbol.to_string(),
            factor,
            subgroup: subgroup.to_string(),
        }
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol)
    }
}

/// A pair of one-argument formulas mapping a unit to and from the pivot unit
#[derive(Debug, Clone, Copy)]
pub struct AffineFormula {
    pub to_pivot: fn(f64) -> f64,
    pub from_pivot: fn(f64) -> f64,
}

/// Formulas for a category whose units are not related by a single factor.
///
/// Every conversion goes `from -> pivot -> to`. The pivot itself needs no
/// formula.
#[derive(Debug, Clone)]
pub struct FormulaSet {
    pivot: String,
    formulas: HashMap<String, AffineFormula>,
}

impl FormulaSet {
    pub fn new(pivot: &str) -> Self {
        FormulaSet {
            pivot: pivot.to_string(),
            formulas: HashMap::new(),
        }
    }

    /// Builder: register the formula pair for a unit
    pub fn with(mut self, unit_key: &str, to_pivot: fn(f64) -> f64, from_pivot: fn(f64) -> f64) -> Self {
        self.formulas.insert(unit_key.to_string(), AffineFormula { to_pivot, from_pivot });
        self
    }

    pub fn pivot(&self) -> &str {
        &self.pivot
    }

    /// True if a value in `unit_key` can be routed through the pivot
    pub fn covers(&self, unit_key: &str) -> bool {
        unit_key == self.pivot || self.formulas.contains_key(unit_key)
    }

    /// Express `value` (in `unit_key`) in the pivot unit
    pub fn to_pivot(&self, unit_key: &str, value: f64) -> Option<f64> {
        if unit_key == self.pivot {
            return Some(value);
        }
        self.formulas.get(unit_key).map(|f| (f.to_pivot)(value))
    }

    /// Express a pivot-unit `value` in `unit_key`
    pub fn from_pivot(&self, unit_key: &str, value: f64) -> Option<f64> {
        if unit_key == self.pivot {
            return Some(value);
        }
        self.formulas.get(unit_key).map(|f| (f.from_pivot)(value))
    }
}

/// How values inside a category relate to each other
#[derive(Debug, Clone)]
pub enum CategoryKind {
    /// `result = value * factor[from] / factor[to]`
    Linear,
    /// Routed through a pivot unit with per-unit formulas
    Affine(FormulaSet),
}

impl CategoryKind {
    pub fn is_linear(&self) -> bool {
        matches!(self, CategoryKind::Linear)
    }
}

/// A measurement category with its units in definition order
#[derive(Debug, Clone)]
pub struct Category {
    pub key: String,
    pub display_name: String,
    pub base_unit_key: String,
    pub kind: CategoryKind,
    units: Vec<UnitDefinition>,
}

impl Category {
    /// Create a category whose units convert by factor ratio
    pub fn linear(key: &str, display_name: &str, base_unit_key: &str) -> Self {
        Self::with_kind(key, display_name, base_unit_key, CategoryKind::Linear)
    }

    /// Create a category whose units convert through affine formulas
    pub fn affine(key: &str, display_name: &str, base_unit_key: &str, formulas: FormulaSet) -> Self {
        Self::with_kind(key, display_name, base_unit_key, CategoryKind::Affine(formulas))
    }

    fn with_kind(key: &str, display_name: &str, base_unit_key: &str, kind: CategoryKind) -> Self {
        Category {
            key: key.to_string(),
            display_name: display_name.to_string(),
            base_unit_key: base_unit_key.to_string(),
            kind,
            units: Vec::new(),
        }
    }

    /// Builder: append a unit. Insertion order is display order.
    pub fn with_unit(mut self, unit: UnitDefinition) -> Self {
        self.units.push(unit);
        self
    }

    pub fn units(&self) -> &[UnitDefinition] {
        &self.units
    }

    pub fn unit(&self, key: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.unit(key).is_some()
    }

    pub fn base_unit(&self) -> Option<&UnitDefinition> {
        self.unit(&self.base_unit_key)
    }

    /// Default selection: the first two units, or the only unit twice
    pub fn default_pair(&self) -> Option<(&UnitDefinition, &UnitDefinition)> {
        let first = self.units.first()?;
        let second = self.units.get(1).unwrap_or(first);
        Some((first, second))
    }

    /// Resolve a symbol first, then a key
    pub fn find_by_symbol(&self, symbol: &str) -> Option<&UnitDefinition> {
        self.units
            .iter()
            .find(|u| u.symbol == symbol)
            .or_else(|| self.unit(symbol))
    }

    /// Distinct subgroup tags in order of first appearance
    pub fn subgroups(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for unit in &self.units {
            if !seen.contains(&unit.subgroup.as_str()) {
                seen.push(&unit.subgroup);
            }
        }
        seen
    }

    pub fn units_in_subgroup<'a>(&'a self, subgroup: &'a str) -> impl Iterator<Item = &'a UnitDefinition> + 'a {
        self.units.iter().filter(move |u| u.subgroup == subgroup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance() -> Category {
        Category::linear("distance", "Distance", "meter")
            .with_unit(UnitDefinition::new("meter", "Meter", "m", 1.0, METRIC))
            .with_unit(UnitDefinition::new("foot", "Foot", "ft", 0.3048, IMPERIAL))
            .with_unit(UnitDefinition::new("kilometer", "Kilometer", "km", 1000.0, METRIC))
    }

    #[test]
    fn test_default_pair_takes_first_two() {
        let cat = distance();
        let (a, b) = cat.default_pair().unwrap();
        assert_eq!(a.key, "meter");
        assert_eq!(b.key, "foot");
    }

    #[test]
    fn test_default_pair_single_unit() {
        let cat = Category::linear("solo", "Solo", "one")
            .with_unit(UnitDefinition::new("one", "One", "1", 1.0, METRIC));
        let (a, b) = cat.default_pair().unwrap();
        assert_eq!(a.key, "one");
        assert_eq!(b.key, "one");
    }

    #[test]
    fn test_subgroups_in_first_appearance_order() {
        let cat = distance();
        assert_eq!(cat.subgroups(), vec![METRIC, IMPERIAL]);
        let metric: Vec<_> = cat.units_in_subgroup(METRIC).map(|u| u.key.as_str()).collect();
        assert_eq!(metric, vec!["meter", "kilometer"]);
    }

    #[test]
    fn test_find_by_symbol_then_key() {
        let cat = distance();
        assert_eq!(cat.find_by_symbol("ft").unwrap().key, "foot");
        assert_eq!(cat.find_by_symbol("kilometer").unwrap().key, "kilometer");
        assert!(cat.find_by_symbol("yd").is_none());
    }

    #[test]
    fn test_formula_set_pivot_is_identity() {
        let set = FormulaSet::new("c").with("d", |v| v / 2.0, |v| v * 2.0);
        assert_eq!(set.to_pivot("c", 5.0), Some(5.0));
        assert_eq!(set.to_pivot("d", 5.0), Some(2.5));
        assert_eq!(set.from_pivot("d", 5.0), Some(10.0));
        assert!(set.covers("c"));
        assert!(!set.covers("e"));
        assert_eq!(set.to_pivot("e", 1.0), None);
    }
}
