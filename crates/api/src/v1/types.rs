//! API v1 DTO types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error kind exposed in API v1 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, caller-facing errors (bad config, unreadable input).
    Expected,
    /// Invariant violations: the form and the declared fields disagree.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// API v1 error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_BINDER_MULTIPLE_VALUES`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message for the caller.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Optional metadata for debugging and correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
}

/// A field that bound to an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1BoundValueDto {
    /// Field name.
    pub field: String,
    /// Bound value.
    pub value: i32,
}

/// A field error, ready for an error summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1FieldErrorDto {
    /// Field name.
    pub field: String,
    /// User-facing message.
    pub message: String,
    /// Link to the input, `#<field>`.
    pub href: String,
}

/// The text a user submitted for a field, for re-display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1AttemptedValueDto {
    /// Field name.
    pub field: String,
    /// Submitted text.
    pub value: String,
}

/// Result of binding one request against the declared fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1BindingReportDto {
    /// True when every field bound and no error was recorded.
    pub ok: bool,
    /// Bound values in declaration order.
    pub values: Vec<ApiV1BoundValueDto>,
    /// Field errors in the order fields were bound.
    pub errors: Vec<ApiV1FieldErrorDto>,
    /// Submitted text for every field that received a value.
    pub attempted_values: Vec<ApiV1AttemptedValueDto>,
    /// True when the model error cap stopped further errors being recorded.
    pub max_errors_reached: bool,
}
