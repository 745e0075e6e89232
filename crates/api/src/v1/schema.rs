//! JSON Schema exports for API v1 DTOs.

use crate::v1::ApiV1BindingReportDto;
use schemars::{Schema, schema_for};

/// JSON Schema for `ApiV1BindingReportDto`.
#[must_use]
pub fn api_v1_binding_report_schema() -> Schema {
    schema_for!(ApiV1BindingReportDto)
}
