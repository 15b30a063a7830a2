//! Converter form state
//!
//! Holds one string per unit. Editing a field re-derives every other field
//! from it. Updates carry a revision so a late result from an older edit
//! can never overwrite a newer one.

use serde::Serialize;
use tracing::{debug, error};
use denom_core::ConversionError;
use denom_units::{ConversionOptions, ConversionTable, Unit, UnitSet};
use crate::{Clipboard, HandoffStore};

/// Monotonic edit counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Revision(u64);

impl Revision {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// User-facing error shown next to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub unit: String,
    pub message: String,
}

/// Result of one edit, not yet applied to the form
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    revision: Revision,
    unit: Unit,
    input: String,
    outcome: Result<ConversionTable, ConversionError>,
}

impl PendingUpdate {
    pub fn revision(&self) -> Revision {
        self.revision
    }
}

/// What `apply` did with an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer update was already applied; this one was dropped
    Stale,
}

/// Headless state of a converter form
#[derive(Debug, Clone)]
pub struct Converter {
    domain: UnitSet,
    options: ConversionOptions,
    fields: Vec<(Unit, String)>,
    error: Option<FieldError>,
    next_revision: u64,
    applied: Option<Revision>,
}

impl Converter {
    pub fn new(domain: &UnitSet) -> Self {
        Self {
            domain: domain.clone(),
            options: ConversionOptions::exact(),
            fields: domain.iter().map(|u| (u.clone(), String::new())).collect(),
            error: None,
            next_revision: 0,
            applied: None,
        }
    }

    /// Builder: set the rounding policy for derived fields
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a converter and seed `unit` with the value waiting under `key`.
    /// The stored value is removed whether or not it converts.
    pub fn mount(
        domain: &UnitSet,
        unit: &str,
        store: &mut dyn HandoffStore,
        key: &str,
    ) -> Result<Self, ConversionError> {
        let mut converter = Self::new(domain);
        converter.domain.resolve(unit)?;

        if let Some(value) = store.take(key) {
            debug!(domain = %domain.name(), unit, key, "seeding converter from handoff");
            converter.edit(unit, &value)?;
        }
        Ok(converter)
    }

    pub fn domain(&self) -> &UnitSet {
        &self.domain
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Current text of a field, by label or alias
    pub fn value(&self, unit: &str) -> Option<&str> {
        self.fields.iter()
            .find(|(u, _)| u.matches(unit))
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Unit, &str)> {
        self.fields.iter().map(|(u, v)| (u, v.as_str()))
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Latest applied revision
    pub fn revision(&self) -> Option<Revision> {
        self.applied
    }

    // ========== Edits ==========

    /// Reserve the next revision
    pub fn begin_edit(&mut self) -> Revision {
        self.next_revision += 1;
        Revision(self.next_revision)
    }

    /// Convert `text` typed into `unit` without touching the form.
    /// Fails only when `unit` is not part of the domain.
    pub fn compute(&self, revision: Revision, unit: &str, text: &str) -> Result<PendingUpdate, ConversionError> {
        let unit = self.domain.resolve(unit)?.clone();
        let outcome = self.domain.convert_all_with(text, &unit, &self.options);
        Ok(PendingUpdate {
            revision,
            unit,
            input: text.to_string(),
            outcome,
        })
    }

    /// Apply an update unless a newer one is already showing
    pub fn apply(&mut self, update: PendingUpdate) -> ApplyOutcome {
        if let Some(applied) = self.applied {
            if update.revision <= applied {
                debug!(stale = update.revision.get(), current = applied.get(), "dropping stale update");
                return ApplyOutcome::Stale;
            }
        }
        self.applied = Some(update.revision);

        match update.outcome {
            Ok(table) => {
                for ((unit, field), (_, converted)) in self.fields.iter_mut().zip(table.into_entries()) {
                    *field = if unit.same_as(&update.unit) { update.input.clone() } else { converted };
                }
                self.error = None;
            }
            Err(e @ ConversionError::InvalidNumber(_)) => {
                self.set_field(&update.unit, update.input);
                self.error = Some(FieldError {
                    unit: update.unit.label.clone(),
                    message: e.to_string(),
                });
            }
            Err(e @ ConversionError::UnknownUnit(_)) => {
                error!(domain = %self.domain.name(), error = %e, "conversion rejected a unit of its own domain");
            }
        }
        ApplyOutcome::Applied
    }

    /// Edit a field and apply the result immediately
    pub fn edit(&mut self, unit: &str, text: &str) -> Result<ApplyOutcome, ConversionError> {
        let revision = self.begin_edit();
        let update = self.compute(revision, unit, text).map_err(|e| {
            error!(domain = %self.domain.name(), error = %e, "edit targeted a unit outside the domain");
            e
        })?;
        Ok(self.apply(update))
    }

    /// Empty every field
    pub fn clear(&mut self) {
        for (_, field) in &mut self.fields {
            field.clear();
        }
        self.error = None;
    }

    /// Copy a field's text to the clipboard
    pub fn copy(&self, unit: &str, clipboard: &dyn Clipboard) -> Result<(), ConversionError> {
        let text = self.value(unit)
            .ok_or_else(|| ConversionError::UnknownUnit(unit.to_string()))?;
        clipboard.write_text(text);
        Ok(())
    }

    fn set_field(&mut self, unit: &Unit, text: String) {
        if let Some((_, field)) = self.fields.iter_mut().find(|(u, _)| u.same_as(unit)) {
            *field = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use denom_units::domain;
    use crate::{MemoryClipboard, MemoryHandoff};

    fn eth() -> Converter {
        Converter::new(domain("ethereum").unwrap())
    }

    #[test]
    fn test_starts_empty() {
        let c = eth();
        assert_eq!(c.fields().count(), 5);
        assert!(c.fields().all(|(_, v)| v.is_empty()));
        assert!(c.error().is_none());
        assert!(c.revision().is_none());
    }

    #[test]
    fn test_edit_derives_other_fields() {
        let mut c = eth();
        assert_eq!(c.edit("Gwei", "2").unwrap(), ApplyOutcome::Applied);
        assert_eq!(c.value("Wei"), Some("2000000000"));
        assert_eq!(c.value("Gwei"), Some("2"));
        assert_eq!(c.value("Szabo"), Some("0.002"));
        assert_eq!(c.value("Finney"), Some("0.000002"));
        assert_eq!(c.value("Ether"), Some("0.000000002"));
    }

    #[test]
    fn test_edited_field_keeps_typed_text() {
        let mut c = eth();
        c.edit("Ether", "01.50").unwrap();
        assert_eq!(c.value("Ether"), Some("01.50"));
        assert_eq!(c.value("Finney"), Some("1500"));
    }

    #[test]
    fn test_invalid_input_surfaces_error_and_keeps_other_fields() {
        let mut c = eth();
        c.edit("Ether", "1").unwrap();
        c.edit("Ether", "1.5.2").unwrap();

        assert_eq!(c.value("Ether"), Some("1.5.2"));
        assert_eq!(c.value("Wei"), Some("1000000000000000000"));
        let err = c.error().unwrap();
        assert_eq!(err.unit, "Ether");
        assert!(err.message.contains("Invalid number"));

        c.edit("Ether", "2").unwrap();
        assert!(c.error().is_none());
        assert_eq!(c.value("Finney"), Some("2000"));
    }

    #[test]
    fn test_blank_input_clears_all_fields() {
        let mut c = eth();
        c.edit("Wei", "5").unwrap();
        c.edit("Wei", "").unwrap();
        assert!(c.fields().all(|(_, v)| v.is_empty()));
        assert!(c.error().is_none());
    }

    #[test]
    fn test_unknown_unit_is_returned_not_shown() {
        let mut c = eth();
        c.edit("Ether", "1").unwrap();
        assert_eq!(c.edit("Kwei", "1"), Err(ConversionError::UnknownUnit("Kwei".into())));
        assert!(c.error().is_none());
        assert_eq!(c.value("Ether"), Some("1"));
    }

    #[test]
    fn test_stale_update_is_discarded() {
        let mut c = eth();
        let older = c.begin_edit();
        let newer = c.begin_edit();
        let old_update = c.compute(older, "Ether", "1").unwrap();
        let new_update = c.compute(newer, "Ether", "2").unwrap();

        assert_eq!(c.apply(new_update), ApplyOutcome::Applied);
        assert_eq!(c.apply(old_update), ApplyOutcome::Stale);
        assert_eq!(c.value("Finney"), Some("2000"));
        assert_eq!(c.revision(), Some(newer));
    }

    #[test]
    fn test_in_order_updates_all_apply() {
        let mut c = eth();
        let first = c.begin_edit();
        let update = c.compute(first, "Wei", "1").unwrap();
        assert_eq!(c.apply(update), ApplyOutcome::Applied);
        let second = c.begin_edit();
        let update = c.compute(second, "Wei", "10").unwrap();
        assert_eq!(c.apply(update), ApplyOutcome::Applied);
        assert_eq!(c.value("Wei"), Some("10"));
    }

    #[test]
    fn test_copy_writes_field_value() {
        let mut c = eth();
        c.edit("Ether", "1").unwrap();
        let clip = MemoryClipboard::new();
        c.copy("Gwei", &clip).unwrap();
        assert_eq!(clip.contents().as_deref(), Some("1000000000"));
        assert!(c.copy("Kwei", &clip).is_err());
    }

    #[test]
    fn test_mount_takes_and_clears_handoff() {
        let mut store = MemoryHandoff::new();
        store.put("ethValue", "0.5");
        let c = Converter::mount(domain("ethereum").unwrap(), "Ether", &mut store, "ethValue").unwrap();
        assert_eq!(c.value("Ether"), Some("0.5"));
        assert_eq!(c.value("Finney"), Some("500"));
        assert!(!store.contains("ethValue"));
    }

    #[test]
    fn test_mount_without_handoff_is_empty() {
        let mut store = MemoryHandoff::new();
        let c = Converter::mount(domain("ethereum").unwrap(), "Ether", &mut store, "ethValue").unwrap();
        assert!(c.fields().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_mount_unknown_unit_fails() {
        let mut store = MemoryHandoff::new();
        store.put("k", "1");
        let res = Converter::mount(domain("ethereum").unwrap(), "Kwei", &mut store, "k");
        assert!(matches!(res, Err(ConversionError::UnknownUnit(_))));
    }

    #[test]
    fn test_clear() {
        let mut c = eth();
        c.edit("Ether", "x").unwrap();
        c.clear();
        assert!(c.fields().all(|(_, v)| v.is_empty()));
        assert!(c.error().is_none());
    }

    #[test]
    fn test_capped_options_apply_to_derived_fields() {
        let mut c = eth().with_options(ConversionOptions::capped(3, denom_units::RoundingMode::HalfUp));
        c.edit("Finney", "1.2345").unwrap();
        assert_eq!(c.value("Ether"), Some("0.001"));
        assert_eq!(c.value("Szabo"), Some("1234.5"));
        assert_eq!(c.value("Finney"), Some("1.2345"));
    }
}
