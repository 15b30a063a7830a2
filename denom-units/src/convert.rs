//! Exact conversion between units of one domain

use serde::{Serialize, Serializer, Deserialize};
use serde::ser::SerializeMap;
use tracing::debug;
use denom_core::{ConversionError, Decimal, RoundingMode};
use crate::{Unit, UnitSet};

/// Rounding policy for converted values.
///
/// The default is exact: a power-of-ten shift of a finite decimal is always
/// finite, so every digit is kept. Setting `max_fraction_digits` caps the
/// fractional part and rounds the remainder with `rounding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub max_fraction_digits: Option<u32>,
    pub rounding: RoundingMode,
}

impl ConversionOptions {
    /// Keep every digit
    pub fn exact() -> Self {
        Self::default()
    }

    /// Keep at most `digits` fractional digits
    pub fn capped(digits: u32, rounding: RoundingMode) -> Self {
        Self { max_fraction_digits: Some(digits), rounding }
    }

    pub fn is_exact(&self) -> bool {
        self.max_fraction_digits.is_none()
    }

    fn apply(&self, value: Decimal) -> Decimal {
        match self.max_fraction_digits {
            Some(digits) => value.round_fraction(digits, self.rounding),
            None => value,
        }
    }
}

/// Every unit of a domain paired with its rendering of one quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTable {
    entries: Vec<(Unit, String)>,
}

impl ConversionTable {
    /// Every unit mapped to an empty string
    pub fn blank(set: &UnitSet) -> Self {
        Self {
            entries: set.iter().map(|u| (u.clone(), String::new())).collect(),
        }
    }

    /// Value for a unit label or alias
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(u, _)| u.matches(label))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unit, &str)> {
        self.entries.iter().map(|(u, v)| (u, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(Unit, String)> {
        self.entries
    }
}

/// Serialized as a `{label: value}` map in domain order
impl Serialize for ConversionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (unit, value) in &self.entries {
            map.serialize_entry(&unit.label, value)?;
        }
        map.end()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl UnitSet {
    /// Convert `value` from one unit to another, keeping every digit.
    ///
    /// Checks run in order: both units must belong to the set, then `value`
    /// must be a decimal number. Converting a unit to itself returns `value`
    /// verbatim.
    pub fn convert(&self, value: &str, from: &Unit, to: &Unit) -> Result<String, ConversionError> {
        self.convert_with(value, from, to, &ConversionOptions::exact())
    }

    /// `convert` with an explicit rounding policy
    pub fn convert_with(
        &self,
        value: &str,
        from: &Unit,
        to: &Unit,
        options: &ConversionOptions,
    ) -> Result<String, ConversionError> {
        let from = self.member(from)?;
        let to = self.member(to)?;
        let parsed = Decimal::parse(value)?;

        if from.same_as(to) {
            return Ok(value.to_string());
        }

        let shifted = options.apply(parsed.shift(from.shift_to(to)));
        let result = shifted.to_plain_string();
        debug!(domain = %self.name(), from = %from, to = %to, input = value, output = %result, "converted");
        Ok(result)
    }

    /// Convert between units named by label or alias
    pub fn convert_labels(&self, value: &str, from: &str, to: &str) -> Result<String, ConversionError> {
        self.convert_labels_with(value, from, to, &ConversionOptions::exact())
    }

    pub fn convert_labels_with(
        &self,
        value: &str,
        from: &str,
        to: &str,
        options: &ConversionOptions,
    ) -> Result<String, ConversionError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.convert_with(value, from, to, options)
    }

    /// Convert `value` into every unit of the set, `from` included.
    ///
    /// A blank `value` maps every unit to `""`. Any failure fails the
    /// whole call; there is no partial table.
    pub fn convert_all(&self, value: &str, from: &Unit) -> Result<ConversionTable, ConversionError> {
        self.convert_all_with(value, from, &ConversionOptions::exact())
    }

    pub fn convert_all_with(
        &self,
        value: &str,
        from: &Unit,
        options: &ConversionOptions,
    ) -> Result<ConversionTable, ConversionError> {
        let from = self.member(from)?;

        if is_blank(value) {
            return Ok(ConversionTable::blank(self));
        }

        let entries = self.iter()
            .map(|unit| {
                self.convert_with(value, from, unit, options)
                    .map(|converted| (unit.clone(), converted))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConversionTable { entries })
    }

    /// `convert_all` with the source unit named by label or alias
    pub fn convert_all_label(&self, value: &str, from: &str) -> Result<ConversionTable, ConversionError> {
        self.convert_all_label_with(value, from, &ConversionOptions::exact())
    }

    pub fn convert_all_label_with(
        &self,
        value: &str,
        from: &str,
        options: &ConversionOptions,
    ) -> Result<ConversionTable, ConversionError> {
        let from = self.resolve(from)?;
        self.convert_all_with(value, from, options)
    }
}
