//! Bind command handler.

use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use crate::{CliOutput, envelope_exit_code, format_error_output};
use form_binding_api::v1::{ApiV1BindingReportDto, binding_report_to_api_v1};
use form_binding_binder::{CompositeValueProvider, FormValueProvider};
use form_binding_config::{BinderEnv, load_binder_config_from_path};
use form_binding_shared::ErrorEnvelope;
use std::path::Path;
use tracing::info;

/// Inputs for one `bind` invocation.
#[derive(Debug, Clone, Copy)]
pub struct BindCommandInput<'a> {
    /// Config file declaring the fields.
    pub config_path: &'a Path,
    /// Encoded form body.
    pub form: Option<&'a str>,
    /// Encoded query string, consulted after the form body.
    pub query: Option<&'a str>,
}

/// Run the bind command.
pub fn run_bind(
    mode: OutputMode,
    env: &BinderEnv,
    input: BindCommandInput<'_>,
) -> Result<CliOutput, CliError> {
    let config = match load_binder_config_from_path(input.config_path, env) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error, ExitCode::InvalidInput)),
    };

    let mut provider = CompositeValueProvider::new();
    if let Some(form) = input.form {
        provider = provider.with(FormValueProvider::parse(form));
    }
    if let Some(query) = input.query {
        provider = provider.with(FormValueProvider::parse(query));
    }

    let registry = config.build_registry();
    let mut model_state = config.new_model_state();
    let bound = match registry.bind_model(&provider, &mut model_state) {
        Ok(bound) => bound,
        Err(error) => {
            let envelope = ErrorEnvelope::from(error);
            return Ok(format_error_output(mode, &envelope, envelope_exit_code(&envelope)));
        },
    };

    let report = binding_report_to_api_v1(&bound, &model_state);
    info!(
        container_type = %config.container_type,
        ok = report.ok,
        errors = report.errors.len(),
        "bind completed"
    );
    format_bind_output(mode, &report)
}

fn format_bind_output(
    mode: OutputMode,
    report: &ApiV1BindingReportDto,
) -> Result<CliOutput, CliError> {
    let status = if report.ok { "ok" } else { "invalid" };
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({
            "status": status,
            "report": report,
        });
        let mut out = serde_json::to_string_pretty(&payload)?;
        out.push('\n');
        out
    } else {
        format_report_text(status, report)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: if report.ok {
            ExitCode::Ok
        } else {
            ExitCode::Rejected
        },
    })
}

fn format_report_text(status: &str, report: &ApiV1BindingReportDto) -> String {
    let mut out = format!("status: {status}\n");
    if !report.values.is_empty() {
        out.push_str("values:\n");
        for value in &report.values {
            out.push_str(&format!("  {}: {}\n", value.field, value.value));
        }
    }
    if !report.errors.is_empty() {
        out.push_str("errors:\n");
        for error in &report.errors {
            out.push_str(&format!("  {}: {} ({})\n", error.field, error.message, error.href));
        }
    }
    if !report.ok && !report.attempted_values.is_empty() {
        out.push_str("attempted:\n");
        for attempted in &report.attempted_values {
            out.push_str(&format!("  {}: {:?}\n", attempted.field, attempted.value));
        }
    }
    if report.max_errors_reached {
        out.push_str("maxErrorsReached: true\n");
    }
    out
}
