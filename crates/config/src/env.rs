//! Environment variable overrides.

use crate::{BinderConfig, ValidatedBinderConfig};
use form_binding_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var overriding `maxModelErrors`.
pub const ENV_MAX_MODEL_ERRORS: &str = "FORM_BINDING_MAX_MODEL_ERRORS";

/// Env var overriding `containerType`.
pub const ENV_CONTAINER_TYPE: &str = "FORM_BINDING_CONTAINER_TYPE";

/// Parsed env overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinderEnv {
    /// Override for `maxModelErrors`.
    pub max_model_errors: Option<u32>,
    /// Override for `containerType`.
    pub container_type: Option<String>,
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "env_empty_value"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "env_invalid_int"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty when set"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a positive integer")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("var", var),
            EnvParseError::InvalidInt { var, value } => envelope
                .with_metadata("var", var)
                .with_metadata("value", value),
        }
    }
}

impl BinderEnv {
    /// Parse overrides from a snapshot of env vars.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let max_model_errors = match read_trimmed(map, ENV_MAX_MODEL_ERRORS)? {
            None => None,
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| EnvParseError::InvalidInt {
                var: ENV_MAX_MODEL_ERRORS,
                value: raw.to_owned(),
            })?),
        };
        let container_type = read_trimmed(map, ENV_CONTAINER_TYPE)?.map(str::to_owned);

        Ok(Self {
            max_model_errors,
            container_type,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_MAX_MODEL_ERRORS, ENV_CONTAINER_TYPE] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }
}

fn read_trimmed<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    match map.get(var) {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(EnvParseError::EmptyValue { var })
            } else {
                Ok(Some(trimmed))
            }
        },
    }
}

/// Apply env overrides, then validate the resulting config.
pub fn apply_env_overrides(
    mut config: BinderConfig,
    env: &BinderEnv,
) -> Result<ValidatedBinderConfig, ErrorEnvelope> {
    if let Some(max_model_errors) = env.max_model_errors {
        config.max_model_errors = max_model_errors;
    }
    if let Some(container_type) = env.container_type.as_ref() {
        config.container_type.clone_from(container_type);
    }
    config.validate().map_err(ErrorEnvelope::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn parses_overrides() -> Result<(), EnvParseError> {
        let env = BinderEnv::from_map(&map(&[
            (ENV_MAX_MODEL_ERRORS, " 25 "),
            (ENV_CONTAINER_TYPE, "Household"),
        ]))?;
        assert_eq!(env.max_model_errors, Some(25));
        assert_eq!(env.container_type.as_deref(), Some("Household"));
        Ok(())
    }

    #[test]
    fn rejects_blank_and_non_numeric_values() {
        assert_eq!(
            BinderEnv::from_map(&map(&[(ENV_MAX_MODEL_ERRORS, "  ")])),
            Err(EnvParseError::EmptyValue {
                var: ENV_MAX_MODEL_ERRORS
            })
        );
        assert_eq!(
            BinderEnv::from_map(&map(&[(ENV_MAX_MODEL_ERRORS, "-1")])),
            Err(EnvParseError::InvalidInt {
                var: ENV_MAX_MODEL_ERRORS,
                value: "-1".to_owned(),
            })
        );
    }

    #[test]
    fn empty_map_means_no_overrides() -> Result<(), EnvParseError> {
        assert_eq!(BinderEnv::from_map(&BTreeMap::new())?, BinderEnv::default());
        Ok(())
    }
}
