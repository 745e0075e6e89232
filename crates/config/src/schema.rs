//! Field declaration config schema and validation.
//!
//! The file format is camelCase JSON or TOML:
//!
//! ```toml
//! containerType = "Applicant"
//! maxModelErrors = 200
//!
//! [[fields]]
//! name = "Age"
//! binder = "mandatoryInt"
//!
//! [fields.errorText]
//! errorMessageIfMissing = "Enter your age"
//! nameAtStartOfSentence = "Age"
//! ```
//!
//! `errorText` may be left out. Such a field still loads, but binding it is a
//! fatal `binder:missing_error_config` error.

use form_binding_binder::{BinderRegistry, MandatoryIntBinder, ModelState};
use form_binding_domain::{ContainerType, ErrorMessageConfig, FieldName, PrimitiveError};
use form_binding_shared::{ErrorCode, ErrorEnvelope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Inclusive bounds for `maxModelErrors`.
pub const MAX_MODEL_ERRORS_RANGE: (u32, u32) = (1, 10_000);

const DEFAULT_MAX_MODEL_ERRORS: u32 = 200;

const fn default_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

const fn default_max_model_errors() -> u32 {
    DEFAULT_MAX_MODEL_ERRORS
}

/// Binder kinds a field can be declared with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BinderKind {
    /// Required `i32` field.
    #[default]
    MandatoryInt,
}

impl fmt::Display for BinderKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MandatoryInt => formatter.write_str("mandatoryInt"),
        }
    }
}

/// Error text declared for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorTextDeclaration {
    /// Message shown when the field is missing or empty.
    pub error_message_if_missing: String,
    /// Field name as it reads at the start of a sentence.
    pub name_at_start_of_sentence: String,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDeclaration {
    /// Field (model) name used as the request key.
    pub name: String,
    /// Binder used for the field.
    #[serde(default)]
    pub binder: BinderKind,
    /// Error text; required for binding to succeed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<ErrorTextDeclaration>,
}

/// Raw config file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BinderConfig {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Name of the model type declaring the fields.
    pub container_type: String,
    /// Cap on recorded model errors per request.
    #[serde(default = "default_max_model_errors")]
    pub max_model_errors: u32,
    /// Declared fields, in form order.
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

/// Config validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// Config version is not supported.
    UnsupportedVersion {
        /// Version found in the file.
        version: u32,
    },
    /// `containerType` is blank.
    InvalidContainerType,
    /// No fields were declared.
    NoFields,
    /// A field name is blank.
    InvalidFieldName {
        /// Position of the field in `fields`.
        index: usize,
    },
    /// A field name is declared twice.
    DuplicateField {
        /// Duplicated name.
        name: String,
    },
    /// A field declares blank error text.
    InvalidErrorText {
        /// Field declaring the text.
        field: String,
        /// Blank property.
        property: &'static str,
    },
    /// `maxModelErrors` is outside the allowed range.
    MaxModelErrorsOutOfRange {
        /// Value provided.
        value: u32,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidContainerType => ErrorCode::new("config", "invalid_container_type"),
            Self::NoFields => ErrorCode::new("config", "no_fields"),
            Self::InvalidFieldName { .. } => ErrorCode::new("config", "invalid_field_name"),
            Self::DuplicateField { .. } => ErrorCode::new("config", "duplicate_field"),
            Self::InvalidErrorText { .. } => ErrorCode::new("config", "invalid_error_text"),
            Self::MaxModelErrorsOutOfRange { .. } => ErrorCode::new("config", "out_of_range"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { version } => write!(
                formatter,
                "config version {version} is not supported (expected {CURRENT_CONFIG_VERSION})"
            ),
            Self::InvalidContainerType => formatter.write_str("containerType must be non-empty"),
            Self::NoFields => formatter.write_str("at least one field must be declared"),
            Self::InvalidFieldName { index } => {
                write!(formatter, "fields[{index}].name must be non-empty")
            },
            Self::DuplicateField { name } => {
                write!(formatter, "field {name} is declared more than once")
            },
            Self::InvalidErrorText { field, property } => {
                write!(formatter, "field {field}: errorText.{property} must be non-empty")
            },
            Self::MaxModelErrorsOutOfRange { .. } => write!(
                formatter,
                "maxModelErrors must be between {} and {}",
                MAX_MODEL_ERRORS_RANGE.0, MAX_MODEL_ERRORS_RANGE.1
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigSchemaError::UnsupportedVersion { version } => {
                envelope.with_metadata("version", version.to_string())
            },
            ConfigSchemaError::InvalidContainerType => {
                envelope.with_metadata("field", "containerType")
            },
            ConfigSchemaError::NoFields => envelope.with_metadata("field", "fields"),
            ConfigSchemaError::InvalidFieldName { index } => {
                envelope.with_metadata("field", format!("fields[{index}].name"))
            },
            ConfigSchemaError::DuplicateField { name } => envelope.with_metadata("name", name),
            ConfigSchemaError::InvalidErrorText { field, property } => envelope
                .with_metadata("name", field)
                .with_metadata("property", property),
            ConfigSchemaError::MaxModelErrorsOutOfRange { value } => envelope
                .with_metadata("field", "maxModelErrors")
                .with_metadata("value", value.to_string()),
        }
    }
}

/// A declared field after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedField {
    /// Field name.
    pub name: FieldName,
    /// Binder kind.
    pub binder: BinderKind,
    /// Error text, when declared.
    pub error_text: Option<ErrorMessageConfig>,
}

/// Config after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBinderConfig {
    /// Model type declaring the fields.
    pub container_type: ContainerType,
    /// Cap on recorded model errors per request.
    pub max_model_errors: u32,
    /// Fields in declaration order.
    pub fields: Vec<ValidatedField>,
}

impl BinderConfig {
    /// Validate and normalize the raw config.
    pub fn validate(&self) -> Result<ValidatedBinderConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                version: self.version,
            });
        }
        let container_type = ContainerType::parse(&self.container_type)
            .map_err(|_| ConfigSchemaError::InvalidContainerType)?;

        let (min, max) = MAX_MODEL_ERRORS_RANGE;
        if !(min..=max).contains(&self.max_model_errors) {
            return Err(ConfigSchemaError::MaxModelErrorsOutOfRange {
                value: self.max_model_errors,
            });
        }

        if self.fields.is_empty() {
            return Err(ConfigSchemaError::NoFields);
        }

        let mut seen = BTreeSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for (index, declaration) in self.fields.iter().enumerate() {
            let name = FieldName::parse(&declaration.name)
                .map_err(|_| ConfigSchemaError::InvalidFieldName { index })?;
            if !seen.insert(name.as_str().to_ascii_lowercase()) {
                return Err(ConfigSchemaError::DuplicateField {
                    name: name.to_string(),
                });
            }
            let error_text = declaration
                .error_text
                .as_ref()
                .map(|text| {
                    ErrorMessageConfig::new(
                        &text.error_message_if_missing,
                        &text.name_at_start_of_sentence,
                    )
                })
                .transpose()
                .map_err(|error| match error {
                    PrimitiveError::EmptyErrorText { property } => {
                        ConfigSchemaError::InvalidErrorText {
                            field: name.to_string(),
                            property,
                        }
                    },
                    PrimitiveError::EmptyFieldName { .. }
                    | PrimitiveError::EmptyContainerType { .. } => {
                        ConfigSchemaError::InvalidFieldName { index }
                    },
                })?;
            fields.push(ValidatedField {
                name,
                binder: declaration.binder,
                error_text,
            });
        }

        Ok(ValidatedBinderConfig {
            container_type,
            max_model_errors: self.max_model_errors,
            fields,
        })
    }
}

impl ValidatedBinderConfig {
    /// Build a registry binding every declared field.
    #[must_use]
    pub fn build_registry(&self) -> BinderRegistry {
        let mut registry = BinderRegistry::new(self.container_type.clone());
        for field in &self.fields {
            match field.binder {
                BinderKind::MandatoryInt => {
                    registry.register(
                        field.name.clone(),
                        field.error_text.clone(),
                        MandatoryIntBinder::new(),
                    );
                },
            }
        }
        registry
    }

    /// Fresh model state honouring `maxModelErrors`.
    #[must_use]
    pub fn new_model_state(&self) -> ModelState {
        ModelState::with_max_errors(usize::try_from(self.max_model_errors).unwrap_or(usize::MAX))
    }

    /// Fields that will fail fatally on bind because they lack error text.
    pub fn fields_missing_error_text(&self) -> impl Iterator<Item = &FieldName> {
        self.fields
            .iter()
            .filter(|field| field.error_text.is_none())
            .map(|field| &field.name)
    }

    /// Convert back to the file representation.
    #[must_use]
    pub fn to_config(&self) -> BinderConfig {
        BinderConfig {
            version: CURRENT_CONFIG_VERSION,
            container_type: self.container_type.to_string(),
            max_model_errors: self.max_model_errors,
            fields: self
                .fields
                .iter()
                .map(|field| FieldDeclaration {
                    name: field.name.to_string(),
                    binder: field.binder,
                    error_text: field.error_text.as_ref().map(|text| ErrorTextDeclaration {
                        error_message_if_missing: text.error_message_if_missing().to_owned(),
                        name_at_start_of_sentence: text.name_at_start_of_sentence().to_owned(),
                    }),
                })
                .collect(),
        }
    }
}

/// Parse and validate a config from JSON.
pub fn parse_binder_config_json(input: &str) -> Result<ValidatedBinderConfig, ErrorEnvelope> {
    let config: BinderConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;
    config.validate().map_err(ErrorEnvelope::from)
}

/// Parse and validate a config from TOML.
pub fn parse_binder_config_toml(input: &str) -> Result<ValidatedBinderConfig, ErrorEnvelope> {
    let config: BinderConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;
    config.validate().map_err(ErrorEnvelope::from)
}

/// JSON Schema for the config file.
#[must_use]
pub fn binder_config_schema() -> schemars::Schema {
    schemars::schema_for!(BinderConfig)
}
