//! Caller-owned collector of attempted values and field errors.

use form_binding_domain::{FieldName, RawValues};
use std::collections::BTreeMap;

/// Default cap on recorded model errors per request.
pub const DEFAULT_MAX_MODEL_ERRORS: usize = 200;

/// Validation state of one model state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// Nothing has been decided for the field yet.
    Unvalidated,
    /// The field bound cleanly.
    Valid,
    /// At least one error was recorded for the field.
    Invalid,
}

/// Attempted value and errors recorded for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStateEntry {
    raw_value: Option<RawValues>,
    errors: Vec<String>,
    marked_valid: bool,
}

impl ModelStateEntry {
    /// Raw values recorded for redisplay, if any.
    #[must_use]
    pub const fn raw_value(&self) -> Option<&RawValues> {
        self.raw_value.as_ref()
    }

    /// Attempted value as a single string (multiple values joined with `", "`).
    #[must_use]
    pub fn attempted_value(&self) -> Option<String> {
        self.raw_value.as_ref().map(ToString::to_string)
    }

    /// Error messages in the order they were recorded.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Current validation state.
    #[must_use]
    pub fn validation_state(&self) -> ValidationState {
        if !self.errors.is_empty() {
            ValidationState::Invalid
        } else if self.marked_valid {
            ValidationState::Valid
        } else {
            ValidationState::Unvalidated
        }
    }
}

/// Per-request model state.
///
/// Fields are kept in the order they were first touched so an error summary
/// lists them in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelState {
    entries: BTreeMap<FieldName, ModelStateEntry>,
    order: Vec<FieldName>,
    max_errors: usize,
    error_count: usize,
    has_reached_max_errors: bool,
}

impl Default for ModelState {
    fn default() -> Self {
        Self::with_max_errors(DEFAULT_MAX_MODEL_ERRORS)
    }
}

impl ModelState {
    /// Empty model state with the default error cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty model state with a custom error cap.
    #[must_use]
    pub const fn with_max_errors(max_errors: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            order: Vec::new(),
            max_errors,
            error_count: 0,
            has_reached_max_errors: false,
        }
    }

    fn entry_mut(&mut self, field: &FieldName) -> &mut ModelStateEntry {
        if !self.entries.contains_key(field) {
            self.order.push(field.clone());
        }
        self.entries.entry(field.clone()).or_default()
    }

    /// Record the raw values submitted for `field`.
    pub fn set_model_value(&mut self, field: &FieldName, raw_value: RawValues) {
        self.entry_mut(field).raw_value = Some(raw_value);
    }

    /// Record an error for `field`.
    ///
    /// Returns `false` without recording anything once the error cap is reached.
    pub fn try_add_model_error(&mut self, field: &FieldName, message: impl Into<String>) -> bool {
        if self.error_count >= self.max_errors {
            self.has_reached_max_errors = true;
            return false;
        }
        self.entry_mut(field).errors.push(message.into());
        self.error_count += 1;
        true
    }

    /// Mark `field` as bound cleanly.
    pub fn mark_valid(&mut self, field: &FieldName) {
        self.entry_mut(field).marked_valid = true;
    }

    /// Entry for `field`.
    #[must_use]
    pub fn get(&self, field: &FieldName) -> Option<&ModelStateEntry> {
        self.entries.get(field)
    }

    /// Entry looked up by raw field name.
    #[must_use]
    pub fn get_by_name(&self, field: &str) -> Option<&ModelStateEntry> {
        FieldName::parse(field)
            .ok()
            .and_then(|field| self.entries.get(&field))
    }

    /// Returns true when no errors were recorded and the cap was never hit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count == 0 && !self.has_reached_max_errors
    }

    /// Number of recorded errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    /// Configured error cap.
    #[must_use]
    pub const fn max_errors(&self) -> usize {
        self.max_errors
    }

    /// Returns true once an error was dropped because of the cap.
    #[must_use]
    pub const fn has_reached_max_errors(&self) -> bool {
        self.has_reached_max_errors
    }

    /// Entries in first-touch order.
    pub fn entries(&self) -> impl Iterator<Item = (&FieldName, &ModelStateEntry)> {
        self.order
            .iter()
            .filter_map(|field| self.entries.get_key_value(field))
    }

    /// Every `(field, message)` pair in first-touch order.
    pub fn errors(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.entries().flat_map(|(field, entry)| {
            entry
                .errors
                .iter()
                .map(move |message| (field, message.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_binding_domain::PrimitiveError;

    #[test]
    fn records_values_and_errors_in_first_touch_order() -> Result<(), PrimitiveError> {
        let year = FieldName::parse("Year")?;
        let age = FieldName::parse("Age")?;
        let mut state = ModelState::new();

        state.set_model_value(&year, RawValues::single("20x4"));
        assert!(state.try_add_model_error(&year, "Year must be a number"));
        assert!(state.try_add_model_error(&age, "Enter your age"));

        let errors: Vec<(String, &str)> = state
            .errors()
            .map(|(field, message)| (field.to_string(), message))
            .collect();
        assert_eq!(
            errors,
            vec![
                ("Year".to_string(), "Year must be a number"),
                ("Age".to_string(), "Enter your age"),
            ]
        );
        assert_eq!(
            state.get(&year).and_then(ModelStateEntry::attempted_value),
            Some("20x4".to_string())
        );
        assert_eq!(state.get(&age).and_then(ModelStateEntry::raw_value), None);
        assert!(!state.is_valid());
        assert_eq!(state.error_count(), 2);
        Ok(())
    }

    #[test]
    fn validation_state_tracks_marks_and_errors() -> Result<(), PrimitiveError> {
        let age = FieldName::parse("Age")?;
        let mut state = ModelState::new();
        state.set_model_value(&age, RawValues::single("42"));
        assert_eq!(
            state.get(&age).map(ModelStateEntry::validation_state),
            Some(ValidationState::Unvalidated)
        );

        state.mark_valid(&age);
        assert_eq!(
            state.get_by_name("Age").map(ModelStateEntry::validation_state),
            Some(ValidationState::Valid)
        );
        assert!(state.is_valid());

        state.try_add_model_error(&age, "Age must be a whole number");
        assert_eq!(
            state.get(&age).map(ModelStateEntry::validation_state),
            Some(ValidationState::Invalid)
        );
        Ok(())
    }

    #[test]
    fn error_cap_drops_further_errors() -> Result<(), PrimitiveError> {
        let age = FieldName::parse("Age")?;
        let mut state = ModelState::with_max_errors(1);

        assert!(state.try_add_model_error(&age, "first"));
        assert!(!state.has_reached_max_errors());
        assert!(!state.try_add_model_error(&age, "second"));
        assert!(state.has_reached_max_errors());
        assert_eq!(state.error_count(), 1);
        assert_eq!(state.get(&age).map(|entry| entry.errors().len()), Some(1));
        assert!(!state.is_valid());
        Ok(())
    }

    #[test]
    fn zero_cap_invalidates_on_first_error() -> Result<(), PrimitiveError> {
        let age = FieldName::parse("Age")?;
        let mut state = ModelState::with_max_errors(0);
        assert!(!state.try_add_model_error(&age, "dropped"));
        assert!(!state.is_valid());
        assert!(state.get(&age).is_none());
        Ok(())
    }
}
