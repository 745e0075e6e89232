//! Raw request values and per-field binding requests.

use crate::{ContainerType, ErrorMessageConfig, FieldName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered raw values a value provider associated with one key.
///
/// An empty list means the key was not supplied at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawValues(Vec<String>);

impl RawValues {
    /// No value was supplied for the key.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// A single supplied value.
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self(vec![value.into()])
    }

    /// Returns true when nothing was supplied.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First supplied value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Iterate over the supplied values in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Append a value.
    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }
}

impl From<Vec<String>> for RawValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<'a> FromIterator<&'a str> for RawValues {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_owned).collect())
    }
}

impl FromIterator<String> for RawValues {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RawValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0.join(", "))
    }
}

/// Everything a field binder sees for one field of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBindingRequest {
    /// Field the values are bound into.
    pub field_name: FieldName,
    /// Model type declaring the field.
    pub container_type: ContainerType,
    /// Raw values supplied by the value provider.
    pub raw_values: RawValues,
    /// Error text declared for the field; `None` means the declaration is incomplete.
    pub error_config: Option<ErrorMessageConfig>,
}

impl FieldBindingRequest {
    /// Build a request for a field with declared error text.
    pub fn new(
        field_name: FieldName,
        container_type: ContainerType,
        raw_values: RawValues,
        error_config: ErrorMessageConfig,
    ) -> Self {
        Self {
            field_name,
            container_type,
            raw_values,
            error_config: Some(error_config),
        }
    }

    /// Build a request for a field declared without error text.
    pub const fn without_error_config(
        field_name: FieldName,
        container_type: ContainerType,
        raw_values: RawValues,
    ) -> Self {
        Self {
            field_name,
            container_type,
            raw_values,
            error_config: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_report_presence_and_first_value() {
        let none = RawValues::none();
        assert!(none.is_none());
        assert_eq!(none.first_value(), None);

        let many: RawValues = ["1", "2"].into_iter().collect();
        assert_eq!(many.len(), 2);
        assert_eq!(many.first_value(), Some("1"));
        assert_eq!(many.to_string(), "1, 2");
    }

    #[test]
    fn empty_string_is_a_supplied_value() {
        let values = RawValues::single("");
        assert!(!values.is_none());
        assert_eq!(values.first_value(), Some(""));
    }
}
