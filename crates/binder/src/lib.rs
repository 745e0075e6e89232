//! # form-binding-binder
//!
//! Field binders that turn raw request text into typed values, recording
//! user-facing errors in a caller-owned [`ModelState`].
//!
//! - **Value providers** - form/query decoding and composition
//! - **Model state** - attempted values, errors, error cap
//! - **Binders** - [`MandatoryIntBinder`] behind the [`FieldBinder`] seam
//! - **Registry** - explicit per-field registration, bound in declaration order
//!
//! Two error channels are kept apart: bad user input becomes
//! [`BindingOutcome::ValidationError`], while wiring mistakes come back as
//! [`BinderError`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod error;
pub mod mandatory_int;
pub mod model_state;
pub mod numeric;
pub mod registry;
pub mod value_provider;

pub use error::BinderError;
pub use mandatory_int::MandatoryIntBinder;
pub use model_state::{DEFAULT_MAX_MODEL_ERRORS, ModelState, ModelStateEntry, ValidationState};
pub use numeric::{NumericShape, classify};
pub use registry::{BinderRegistry, BoundModel, FieldRegistration};
pub use value_provider::{
    CompositeValueProvider, FormValueProvider, MapValueProvider, ValueProvider,
};

use form_binding_domain::{BindingOutcome, FieldBindingRequest};

/// Converts the raw values of one field into a typed outcome.
pub trait FieldBinder: Send + Sync {
    /// Bind `request`, recording attempted values and errors into `model_state`.
    fn bind(
        &self,
        request: &FieldBindingRequest,
        model_state: &mut ModelState,
    ) -> Result<BindingOutcome, BinderError>;
}

/// Returns the binder crate version.
#[must_use]
pub const fn binder_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
