//! Read-only registry of categories and units

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use crate::category::{Category, CategoryKind, UnitDefinition};
use crate::error::{ConversionError, RegistryError};
use crate::units;

static BUILTIN: LazyLock<Arc<UnitRegistry>> = LazyLock::new(|| Arc::new(units::builtin_registry()));

/// Immutable table of categories in definition order
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    categories: Vec<Category>,
}

impl UnitRegistry {
    /// Start building a custom registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The table shipped with Gauge, built once per process
    pub fn builtin() -> Arc<UnitRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// All categories in definition order
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category a fresh session starts in. `build` rejects an empty registry.
    pub fn first_category(&self) -> &Category {
        &self.categories[0]
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.key.as_str())
    }

    pub fn get_category(&self, category_key: &str) -> Result<&Category, ConversionError> {
        self.categories
            .iter()
            .find(|c| c.key == category_key)
            .ok_or_else(|| ConversionError::UnknownCategory(category_key.to_string()))
    }

    pub fn get_unit(&self, category_key: &str, unit_key: &str) -> Result<&UnitDefinition, ConversionError> {
        self.get_category(category_key)?
            .unit(unit_key)
            .ok_or_else(|| ConversionError::unknown_unit(category_key, unit_key))
    }

    /// Resolve a unit by symbol (e.g. "ft"), falling back to its key
    pub fn find_unit_by_symbol(&self, category_key: &str, symbol: &str) -> Result<&UnitDefinition, ConversionError> {
        self.get_category(category_key)?
            .find_by_symbol(symbol)
            .ok_or_else(|| ConversionError::unknown_unit(category_key, symbol))
    }

    pub fn subgroups(&self, category_key: &str) -> Result<Vec<&str>, ConversionError> {
        Ok(self.get_category(category_key)?.subgroups())
    }

    pub fn units_in_subgroup(&self, category_key: &str, subgroup: &str) -> Result<Vec<&UnitDefinition>, ConversionError> {
        Ok(self
            .get_category(category_key)?
            .units()
            .iter()
            .filter(|u| u.subgroup == subgroup)
            .collect())
    }
}

/// Collects categories and validates them into a `UnitRegistry`
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    categories: Vec<Category>,
}

impl RegistryBuilder {
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        if self.categories.is_empty() {
            return Err(RegistryError::NoCategories);
        }
        let mut category_keys = HashSet::new();
        for category in &self.categories {
            if !category_keys.insert(category.key.as_str()) {
                return Err(RegistryError::DuplicateCategory(category.key.clone()));
            }
            validate_category(category)?;
        }
        debug!(categories = self.categories.len(), "unit registry built");
        Ok(UnitRegistry {
            categories: self.categories,
        })
    }
}

fn validate_category(category: &Category) -> Result<(), RegistryError> {
    if category.units().is_empty() {
        return Err(RegistryError::EmptyCategory(category.key.clone()));
    }

    let mut unit_keys = HashSet::new();
    for unit in category.units() {
        if !unit_keys.insert(unit.key.as_str()) {
            return Err(RegistryError::DuplicateUnit {
                category: category.key.clone(),
                unit: unit.key.clone(),
            });
        }
        match &category.kind {
            CategoryKind::Linear => {
                if !(unit.factor.is_finite() && unit.factor > 0.0) {
                    return Err(RegistryError::InvalidFactor {
                        category: category.key.clone(),
                        unit: unit.key.clone(),
                        factor: unit.factor,
                    });
                }
            }
            CategoryKind::Affine(formulas) => {
                if !formulas.covers(&unit.key) {
                    return Err(RegistryError::MissingFormula {
                        category: category.key.clone(),
                        unit: unit.key.clone(),
                    });
                }
            }
        }
    }

    if !unit_keys.contains(category.base_unit_key.as_str()) {
        return Err(RegistryError::MissingBaseUnit {
            category: category.key.clone(),
            unit: category.base_unit_key.clone(),
        });
    }
    Ok(())
}
