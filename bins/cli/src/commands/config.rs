//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, envelope_exit_code, format_error_output};
use form_binding_config::{binder_config_schema, load_binder_config_std_env, to_pretty_toml};
use std::path::Path;

/// Validate a config file (with env overrides) and print the effective config.
pub fn run_config_check(mode: OutputMode, path: &Path) -> Result<CliOutput, CliError> {
    let config = match load_binder_config_std_env(path) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error, ExitCode::InvalidInput)),
    };
    let missing: Vec<String> = config
        .fields_missing_error_text()
        .map(ToString::to_string)
        .collect();

    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "configPath": path.to_string_lossy(),
            "effectiveConfig": config.to_config(),
            "fieldsMissingErrorText": missing,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        let mut output = format!(
            "status: ok\nconfig: ok\npath: {}\ncontainerType: {}\nfields: {}\nmaxModelErrors: {}\n",
            path.to_string_lossy(),
            config.container_type,
            config.fields.len(),
            config.max_model_errors,
        );
        for field in &missing {
            output.push_str("missingErrorText: ");
            output.push_str(field);
            output.push('\n');
        }
        let effective = match to_pretty_toml(&config.to_config()) {
            Ok(effective) => effective,
            Err(error) => {
                return Ok(format_error_output(mode, &error, envelope_exit_code(&error)));
            },
        };
        output.push_str("effectiveConfig:\n");
        output.push_str(&effective);
        output
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

/// Print the JSON Schema of the config file.
pub fn run_config_schema() -> Result<CliOutput, CliError> {
    let mut stdout = serde_json::to_string_pretty(&binder_config_schema())?;
    stdout.push('\n');
    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
