//! Fatal binder errors.
//!
//! These signal that a field declaration and its binder registration disagree.
//! They are never shown to the person filling in the form; user input problems
//! are reported through `BindingOutcome::ValidationError` instead.

use form_binding_domain::{ContainerType, FieldName, RawValues};
use form_binding_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Integration errors raised while binding a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderError {
    /// The field was bound without declared error text.
    MissingErrorConfig {
        /// Field being bound.
        field: FieldName,
        /// Model type declaring the field.
        container_type: ContainerType,
    },
    /// A scalar field received more than one value.
    MultipleValues {
        /// Field being bound.
        field: FieldName,
        /// Model type declaring the field.
        container_type: ContainerType,
        /// Every value that was received.
        values: RawValues,
    },
    /// No binder is registered for the requested field.
    UnregisteredField {
        /// Field that was requested.
        field: FieldName,
        /// Model type the registry binds.
        container_type: ContainerType,
    },
}

impl BinderError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingErrorConfig { .. } => ErrorCode::new("binder", "missing_error_config"),
            Self::MultipleValues { .. } => ErrorCode::new("binder", "multiple_values"),
            Self::UnregisteredField { .. } => ErrorCode::new("binder", "unregistered_field"),
        }
    }

    /// Field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &FieldName {
        match self {
            Self::MissingErrorConfig { field, .. }
            | Self::MultipleValues { field, .. }
            | Self::UnregisteredField { field, .. } => field,
        }
    }
}

impl fmt::Display for BinderError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingErrorConfig {
                field,
                container_type,
            } => write!(
                formatter,
                "property [{field}] on type [{container_type}] is bound as a mandatory int but \
                 declares no error text; declare errorMessageIfMissing and nameAtStartOfSentence \
                 for it"
            ),
            Self::MultipleValues {
                field,
                container_type,
                values,
            } => write!(
                formatter,
                "this property should only be able to send 1 value at a time, but we just \
                 received [{}] values [{values}] for property [{field}] on type \
                 [{container_type}]",
                values.len()
            ),
            Self::UnregisteredField {
                field,
                container_type,
            } => write!(
                formatter,
                "no binder is registered for property [{field}] on type [{container_type}]"
            ),
        }
    }
}

impl std::error::Error for BinderError {}

impl From<BinderError> for ErrorEnvelope {
    fn from(error: BinderError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::invariant(code, message);

        match error {
            BinderError::MissingErrorConfig {
                field,
                container_type,
            }
            | BinderError::UnregisteredField {
                field,
                container_type,
            } => envelope
                .with_metadata("field", field.as_str())
                .with_metadata("container_type", container_type.as_str()),
            BinderError::MultipleValues {
                field,
                container_type,
                values,
            } => envelope
                .with_metadata("field", field.as_str())
                .with_metadata("container_type", container_type.as_str())
                .with_metadata("value_count", values.len().to_string())
                .with_metadata("values", values.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_binding_domain::PrimitiveError;
    use form_binding_shared::ErrorKind;

    #[test]
    fn multiple_values_message_names_field_type_and_values() -> Result<(), PrimitiveError> {
        let error = BinderError::MultipleValues {
            field: FieldName::parse("Age")?,
            container_type: ContainerType::parse("Applicant")?,
            values: ["1", "2"].into_iter().collect(),
        };
        let message = error.to_string();
        assert!(message.contains("received [2] values [1, 2]"));
        assert!(message.contains("property [Age] on type [Applicant]"));
        Ok(())
    }

    #[test]
    fn binder_errors_map_to_invariant_envelopes() -> Result<(), PrimitiveError> {
        let envelope: ErrorEnvelope = BinderError::MissingErrorConfig {
            field: FieldName::parse("Age")?,
            container_type: ContainerType::parse("Applicant")?,
        }
        .into();
        assert_eq!(envelope.kind, ErrorKind::Invariant);
        assert_eq!(envelope.code, ErrorCode::new("binder", "missing_error_config"));
        assert_eq!(envelope.metadata.get("field").map(String::as_str), Some("Age"));
        Ok(())
    }
}
