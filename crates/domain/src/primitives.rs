//! Domain primitives with validated constructors.

use form_binding_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// `FieldName` is empty after trimming.
    EmptyFieldName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `ContainerType` is empty after trimming.
    EmptyContainerType {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// An error text entry is empty after trimming.
    EmptyErrorText {
        /// Which error text property was blank.
        property: &'static str,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyFieldName { .. } => ErrorCode::new("domain", "invalid_field_name"),
            Self::EmptyContainerType { .. } => ErrorCode::new("domain", "invalid_container_type"),
            Self::EmptyErrorText { .. } => ErrorCode::new("domain", "invalid_error_text"),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFieldName { .. } => formatter.write_str("FieldName must be non-empty"),
            Self::EmptyContainerType { .. } => {
                formatter.write_str("ContainerType must be non-empty")
            },
            Self::EmptyErrorText { property } => write!(formatter, "{property} must be non-empty"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::EmptyFieldName { input_length }
            | PrimitiveError::EmptyContainerType { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
            PrimitiveError::EmptyErrorText { property } => {
                envelope.with_metadata("property", property)
            },
        }
    }
}

/// Name a field is bound under (the model name used as the lookup key).
///
/// Model names may be dotted or indexed (`Address.Postcode`, `Items[0]`); only
/// surrounding whitespace is stripped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(Box<str>);

impl FieldName {
    /// Parse a field name, trimming surrounding whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::EmptyFieldName {
                input_length: raw.len(),
            });
        }
        Ok(Self(trimmed.into()))
    }

    /// Borrow the field name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0.into_string()
    }
}

/// Fully-qualified name of the model type that declares the bound fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerType(Box<str>);

impl ContainerType {
    /// Parse a container type name, trimming surrounding whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let raw = input.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PrimitiveError::EmptyContainerType {
                input_length: raw.len(),
            });
        }
        Ok(Self(trimmed.into()))
    }

    /// Borrow the container type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<String> for ContainerType {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContainerType> for String {
    fn from(value: ContainerType) -> Self {
        value.0.into_string()
    }
}
