//! Unit domains: fixed, ordered sets of power-of-ten units
//!
//! A `UnitSet` is plain data. Swapping the data swaps the domain
//! (Ethereum denominations, metric length, bytes) without touching the engine.

use std::collections::HashSet;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use denom_core::ConversionError;
use crate::Unit;

/// Reasons a unit set definition is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitSetError {
    #[error("domain '{0}' has no units")]
    Empty(String),

    #[error("domain '{domain}' has a unit with an empty label")]
    EmptyLabel { domain: String },

    #[error("domain '{domain}': '{label}' names more than one unit")]
    DuplicateLabel { domain: String, label: String },

    #[error("domain '{domain}': exponent {exponent} is used by more than one unit")]
    DuplicateExponent { domain: String, exponent: i32 },
}

#[derive(Deserialize)]
struct UnitSetDef {
    name: String,
    units: Vec<Unit>,
}

/// An ordered, validated set of units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitSetDef")]
pub struct UnitSet {
    name: String,
    units: Vec<Unit>,
}

impl TryFrom<UnitSetDef> for UnitSet {
    type Error = UnitSetError;

    fn try_from(def: UnitSetDef) -> Result<Self, Self::Error> {
        UnitSet::new(&def.name, def.units)
    }
}

impl UnitSet {
    /// Build a domain, ordering units by ascending exponent.
    ///
    /// Labels and aliases must be unique (ASCII case-insensitive) and
    /// exponents must be distinct.
    pub fn new(name: &str, mut units: Vec<Unit>) -> Result<Self, UnitSetError> {
        if units.is_empty() {
            return Err(UnitSetError::Empty(name.to_string()));
        }

        let mut spellings = HashSet::new();
        let mut exponents = HashSet::new();
        for unit in &units {
            if unit.label.trim().is_empty() {
                return Err(UnitSetError::EmptyLabel { domain: name.to_string() });
            }
            for spelling in unit.spellings() {
                if !spellings.insert(spelling.trim().to_ascii_lowercase()) {
                    return Err(UnitSetError::DuplicateLabel {
                        domain: name.to_string(),
                        label: spelling.to_string(),
                    });
                }
            }
            if !exponents.insert(unit.exponent) {
                return Err(UnitSetError::DuplicateExponent {
                    domain: name.to_string(),
                    exponent: unit.exponent,
                });
            }
        }

        for unit in units.iter_mut().filter(|u| u.name.is_empty()) {
            unit.name = unit.label.to_ascii_lowercase();
        }
        units.sort_by_key(|u| u.exponent);
        Ok(UnitSet { name: name.to_string(), units })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units in ascending exponent order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false for a constructed set; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The smallest denomination
    pub fn base(&self) -> &Unit {
        &self.units[0]
    }

    /// Unit labels in order
    pub fn labels(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.label.as_str()).collect()
    }

    /// Get a unit by label or alias
    pub fn get(&self, label: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.matches(label))
    }

    /// Like `get`, failing with `UnknownUnit`
    pub fn resolve(&self, label: &str) -> Result<&Unit, ConversionError> {
        self.get(label)
            .ok_or_else(|| ConversionError::UnknownUnit(label.to_string()))
    }

    /// The member of this set that `unit` denotes, failing with `UnknownUnit`
    pub fn member(&self, unit: &Unit) -> Result<&Unit, ConversionError> {
        self.units.iter()
            .find(|u| u.same_as(unit))
            .ok_or_else(|| ConversionError::UnknownUnit(unit.label.clone()))
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.member(unit).is_ok()
    }
}

impl<'a> IntoIterator for &'a UnitSet {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
