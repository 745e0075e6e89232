//! # form-binding-domain
//!
//! Domain types for binding form input into typed fields:
//!
//! - **Primitives** - `FieldName`, `ContainerType`
//! - **Messages** - `ErrorMessageConfig` (per-field error text)
//! - **Request** - `RawValues`, `FieldBindingRequest`
//! - **Outcome** - `BindingOutcome`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use form_binding_shared::shared_crate_version;

pub mod messages;
pub mod outcome;
pub mod primitives;
pub mod request;

pub use messages::ErrorMessageConfig;
pub use outcome::BindingOutcome;
pub use primitives::{ContainerType, FieldName, PrimitiveError};
pub use request::{FieldBindingRequest, RawValues};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
