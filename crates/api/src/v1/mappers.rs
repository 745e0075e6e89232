//! API v1 DTO mapping helpers.

use crate::v1::{
    ApiV1AttemptedValueDto, ApiV1BindingReportDto, ApiV1BoundValueDto, ApiV1ErrorCode,
    ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1FieldErrorDto,
};
use form_binding_binder::{BoundModel, ModelState};
use form_binding_shared::{ErrorCode, ErrorEnvelope, ErrorKind};

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into an API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(envelope: &ErrorEnvelope) -> ApiV1ErrorDto {
    let meta: ApiV1ErrorMeta = envelope
        .metadata
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let meta = (!meta.is_empty()).then_some(meta);

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta,
    }
}

/// Anchor linking an error summary entry to its input.
#[must_use]
pub fn field_anchor(field: &str) -> String {
    format!("#{field}")
}

/// Build the report for a finished bind.
#[must_use]
pub fn binding_report_to_api_v1(
    bound: &BoundModel,
    model_state: &ModelState,
) -> ApiV1BindingReportDto {
    let values = bound
        .iter()
        .map(|(field, value)| ApiV1BoundValueDto {
            field: field.to_string(),
            value,
        })
        .collect();

    let errors = model_state
        .errors()
        .map(|(field, message)| ApiV1FieldErrorDto {
            field: field.to_string(),
            message: message.to_owned(),
            href: field_anchor(field.as_str()),
        })
        .collect();

    let attempted_values = model_state
        .entries()
        .filter_map(|(field, entry)| {
            entry.attempted_value().map(|value| ApiV1AttemptedValueDto {
                field: field.to_string(),
                value,
            })
        })
        .collect();

    ApiV1BindingReportDto {
        ok: model_state.is_valid(),
        values,
        errors,
        attempted_values,
        max_errors_reached: model_state.has_reached_max_errors(),
    }
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
