//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;

pub use mappers::{
    binding_report_to_api_v1, error_code_to_api_v1, error_envelope_to_api_v1_error, field_anchor,
};
pub use schema::api_v1_binding_report_schema;
pub use types::*;
