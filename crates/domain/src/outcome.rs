//! Result of binding one field.

use crate::FieldName;
use serde::{Deserialize, Serialize};

/// Outcome of a single field bind: a typed value or a user-facing error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BindingOutcome {
    /// The raw input converted cleanly.
    Success {
        /// Bound value.
        value: i32,
    },
    /// The raw input was rejected; the message is shown next to the field.
    ValidationError {
        /// Field the message belongs to.
        field: FieldName,
        /// User-facing message.
        message: String,
    },
}

impl BindingOutcome {
    /// Successful outcome.
    #[must_use]
    pub const fn success(value: i32) -> Self {
        Self::Success { value }
    }

    /// Validation failure for `field`.
    pub fn validation_error(field: FieldName, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            message: message.into(),
        }
    }

    /// Returns true for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Bound value, when successful.
    #[must_use]
    pub const fn value(&self) -> Option<i32> {
        match self {
            Self::Success { value } => Some(*value),
            Self::ValidationError { .. } => None,
        }
    }

    /// Error message, when validation failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::ValidationError { message, .. } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrimitiveError;

    #[test]
    fn accessors_are_exclusive() -> Result<(), PrimitiveError> {
        let ok = BindingOutcome::success(42);
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(42));
        assert_eq!(ok.message(), None);

        let failed =
            BindingOutcome::validation_error(FieldName::parse("Age")?, "Age must be a number");
        assert!(!failed.is_success());
        assert_eq!(failed.value(), None);
        assert_eq!(failed.message(), Some("Age must be a number"));
        Ok(())
    }

    #[test]
    fn serializes_with_status_tag() -> Result<(), Box<dyn std::error::Error>> {
        let failed = BindingOutcome::validation_error(FieldName::parse("Age")?, "Enter your age");
        let json = serde_json::to_value(&failed)?;
        assert_eq!(
            json,
            serde_json::json!({
                "status": "validationError",
                "field": "Age",
                "message": "Enter your age",
            })
        );
        Ok(())
    }
}
