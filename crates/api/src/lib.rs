//! # form-binding-api
//!
//! API data transfer objects and wire formats for binding reports.
//! This crate maps binder and shared types into stable JSON contracts.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// API v1 DTOs.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
