//! Config loading helpers (file + env).
//!
//! Env overrides are applied on top of the file contents before validation,
//! so an out-of-range file value can be fixed from the environment.

use crate::{BinderConfig, BinderEnv, ValidatedBinderConfig, apply_env_overrides};
use form_binding_shared::{ErrorCode, ErrorEnvelope, Result, ResultExt};
use std::path::Path;
use tracing::{debug, warn};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// camelCase JSON.
    Json,
    /// camelCase TOML.
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension. No extension means JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_format"),
                "unsupported config format; use .json or .toml",
            )
            .with_metadata("extension", other.to_string())),
        }
    }
}

/// Load and validate a config file, applying `env` on top.
pub fn load_binder_config_from_path(
    path: &Path,
    env: &BinderEnv,
) -> Result<ValidatedBinderConfig> {
    let format = ConfigFormat::from_path(path)?;
    let text = read_config_file(path)?;
    load_binder_config_from_str(&text, format, env).with_metadata("path", &path.to_string_lossy())
}

/// Parse and validate config text, applying `env` on top.
pub fn load_binder_config_from_str(
    input: &str,
    format: ConfigFormat,
    env: &BinderEnv,
) -> Result<ValidatedBinderConfig> {
    let config = parse_config_unvalidated(input, format)?;
    let validated = apply_env_overrides(config, env)?;

    for field in validated.fields_missing_error_text() {
        warn!(
            field = %field,
            container_type = %validated.container_type,
            "field has no errorText; binding it will fail"
        );
    }
    debug!(
        container_type = %validated.container_type,
        fields = validated.fields.len(),
        max_model_errors = validated.max_model_errors,
        "loaded binder config"
    );
    Ok(validated)
}

/// Load a config file with overrides read from the process environment.
pub fn load_binder_config_std_env(path: &Path) -> Result<ValidatedBinderConfig> {
    let env = BinderEnv::from_std_env()?;
    load_binder_config_from_path(path, &env)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &BinderConfig) -> Result<String> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(input: &str, format: ConfigFormat) -> Result<BinderConfig> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_JSON: &str = r#"{
      "containerType": "Applicant",
      "maxModelErrors": 0,
      "fields": [
        { "name": "Age", "errorText": { "errorMessageIfMissing": "Enter your age", "nameAtStartOfSentence": "Age" } }
      ]
    }"#;

    #[test]
    fn env_fixes_an_out_of_range_file_value() -> Result<(), ErrorEnvelope> {
        let env = BinderEnv {
            max_model_errors: Some(10),
            ..BinderEnv::default()
        };
        let config = load_binder_config_from_str(CONFIG_JSON, ConfigFormat::Json, &env)?;
        assert_eq!(config.max_model_errors, 10);
        Ok(())
    }

    #[test]
    fn out_of_range_value_fails_without_env() {
        let result = load_binder_config_from_str(CONFIG_JSON, ConfigFormat::Json, &BinderEnv::default());
        assert!(result.is_err_and(|error| error.code == ErrorCode::new("config", "out_of_range")));
    }

    #[test]
    fn file_errors_carry_the_path() {
        let result = load_binder_config_std_env(Path::new("missing-fields.toml"));
        assert!(result.is_err_and(|error| {
            error.code == ErrorCode::new("config", "config_file_not_found")
                && error.metadata.get("path").map(String::as_str) == Some("missing-fields.toml")
        }));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("fields.TOML")).ok(),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("fields")).ok(),
            Some(ConfigFormat::Json)
        );
        let error = ConfigFormat::from_path(Path::new("fields.yaml")).err();
        assert_eq!(
            error.and_then(|error| error.metadata.get("extension").cloned()),
            Some("yaml".to_string())
        );
    }

    #[test]
    fn pretty_toml_reloads_to_the_same_config() -> Result<(), ErrorEnvelope> {
        let env = BinderEnv {
            max_model_errors: Some(5),
            ..BinderEnv::default()
        };
        let config = load_binder_config_from_str(CONFIG_JSON, ConfigFormat::Json, &env)?.to_config();
        assert_eq!(to_pretty_toml(&config)?, to_pretty_toml(&config)?);

        let toml_text = to_pretty_toml(&config)?;
        let reparsed = load_binder_config_from_str(&toml_text, ConfigFormat::Toml, &BinderEnv::default())?;
        assert_eq!(reparsed.to_config(), config);
        Ok(())
    }
}
