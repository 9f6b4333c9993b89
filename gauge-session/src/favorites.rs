//! User-pinned conversions

use serde::{Deserialize, Serialize};
use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(rename = "category")]
    pub category_key: String,
    #[serde(rename = "fromUnit")]
    pub from_unit_key: String,
    #[serde(rename = "toUnit")]
    pub to_unit_key: String,
    pub label: String,
}

impl FavoriteEntry {
    pub fn new(category_key: &str, from_unit_key: &str, to_unit_key: &str, label: &str) -> Self {
        FavoriteEntry {
            category_key: category_key.to_string(),
            from_unit_key: from_unit_key.to_string(),
            to_unit_key: to_unit_key.to_string(),
            label: label.to_string(),
        }
    }

    /// True if both name the same (category, from, to) triple
    pub fn same_conversion(&self, other: &FavoriteEntry) -> bool {
        self.matches(&other.category_key, &other.from_unit_key, &other.to_unit_key)
    }

    pub fn matches(&self, category_key: &str, from_unit_key: &str, to_unit_key: &str) -> bool {
        self.category_key == category_key
            && self.from_unit_key == from_unit_key
            && self.to_unit_key == to_unit_key
    }
}

/// Ordered favorites with unique conversion triples
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FavoriteEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, category_key: &str, from_unit_key: &str, to_unit_key: &str) -> bool {
        self.entries
            .iter()
            .any(|f| f.matches(category_key, from_unit_key, to_unit_key))
    }

    /// Append a favorite, refusing a triple that is already pinned
    pub fn add(&mut self, entry: FavoriteEntry) -> Result<(), SessionError> {
        if self.entries.iter().any(|f| f.same_conversion(&entry)) {
            return Err(SessionError::DuplicateFavorite {
                category: entry.category_key,
                from: entry.from_unit_key,
                to: entry.to_unit_key,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<FavoriteEntry, SessionError> {
        if index >= self.entries.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Replace all favorites. Later duplicates of a triple are dropped;
    /// returns how many were dropped.
    pub fn replace(&mut self, entries: Vec<FavoriteEntry>) -> usize {
        self.entries.clear();
        let mut dropped = 0;
        for entry in entries {
            if self.add(entry).is_err() {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn to_vec(&self) -> Vec<FavoriteEntry> {
        self.entries.clone()
    }
}
