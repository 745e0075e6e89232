//! Binder for required `i32` fields.

use crate::numeric::{NumericShape, classify};
use crate::{BinderError, FieldBinder, ModelState};
use form_binding_domain::{BindingOutcome, FieldBindingRequest, FieldName};
use tracing::{debug, warn};

/// Binds a required whole-number field, producing GOV.UK-style messages.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. no value supplied: the declared missing message
/// 2. more than one value: `BinderError::MultipleValues`
/// 3. empty value: the declared missing message
/// 4. not a number: `"<Name> must be a number"`
/// 5. not a whole `i32`: `"<Name> must be a whole number"`
///
/// From step 3 on, the raw value is recorded in the model state so the form
/// can be redisplayed with what was typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MandatoryIntBinder;

impl MandatoryIntBinder {
    /// New binder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FieldBinder for MandatoryIntBinder {
    fn bind(
        &self,
        request: &FieldBindingRequest,
        model_state: &mut ModelState,
    ) -> Result<BindingOutcome, BinderError> {
        let field = &request.field_name;
        let Some(error_text) = request.error_config.as_ref() else {
            warn!(field = %field, container_type = %request.container_type, "mandatory int field declares no error text");
            return Err(BinderError::MissingErrorConfig {
                field: field.clone(),
                container_type: request.container_type.clone(),
            });
        };

        let raw_values = &request.raw_values;
        if raw_values.is_none() {
            return Ok(reject(
                model_state,
                field,
                "missing",
                error_text.error_message_if_missing().to_owned(),
            ));
        }

        if raw_values.len() > 1 {
            warn!(
                field = %field,
                container_type = %request.container_type,
                value_count = raw_values.len(),
                "scalar field received multiple values"
            );
            return Err(BinderError::MultipleValues {
                field: field.clone(),
                container_type: request.container_type.clone(),
                values: raw_values.clone(),
            });
        }

        model_state.set_model_value(field, raw_values.clone());

        let value = raw_values.first_value().unwrap_or_default();
        if value.is_empty() {
            return Ok(reject(
                model_state,
                field,
                "empty",
                error_text.error_message_if_missing().to_owned(),
            ));
        }

        match classify(value) {
            NumericShape::NotANumber => Ok(reject(
                model_state,
                field,
                "not_a_number",
                error_text.must_be_a_number(),
            )),
            NumericShape::NotWhole => Ok(reject(
                model_state,
                field,
                "not_whole",
                error_text.must_be_a_whole_number(),
            )),
            NumericShape::Whole(bound) => {
                model_state.mark_valid(field);
                debug!(field = %field, outcome = "bound", "mandatory int bound");
                Ok(BindingOutcome::success(bound))
            },
        }
    }
}

fn reject(
    model_state: &mut ModelState,
    field: &FieldName,
    reason: &'static str,
    message: String,
) -> BindingOutcome {
    if !model_state.try_add_model_error(field, message.clone()) {
        debug!(field = %field, "model error cap reached; error not recorded");
    }
    debug!(field = %field, outcome = reason, "mandatory int rejected");
    BindingOutcome::validation_error(field.clone(), message)
}
