//! Explicit field-to-binder registration table.

use crate::{BinderError, FieldBinder, MandatoryIntBinder, ModelState, ValueProvider};
use form_binding_domain::{
    BindingOutcome, ContainerType, ErrorMessageConfig, FieldBindingRequest, FieldName,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug_span;

/// Error text and binder registered for one field.
#[derive(Clone)]
pub struct FieldRegistration {
    error_config: Option<ErrorMessageConfig>,
    binder: Arc<dyn FieldBinder>,
}

impl FieldRegistration {
    /// Declared error text, if any.
    #[must_use]
    pub const fn error_config(&self) -> Option<&ErrorMessageConfig> {
        self.error_config.as_ref()
    }
}

impl fmt::Debug for FieldRegistration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldRegistration")
            .field("error_config", &self.error_config)
            .finish_non_exhaustive()
    }
}

/// Values bound for a model, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundModel {
    values: Vec<(FieldName, i32)>,
}

impl BoundModel {
    /// Bound value for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(name, _)| name.as_str() == field)
            .map(|(_, value)| *value)
    }

    /// Bound `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, i32)> {
        self.values.iter().map(|(field, value)| (field, *value))
    }

    /// Number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when nothing bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Binders for the fields of one container type.
#[derive(Debug, Clone)]
pub struct BinderRegistry {
    container_type: ContainerType,
    order: Vec<FieldName>,
    fields: BTreeMap<FieldName, FieldRegistration>,
}

impl BinderRegistry {
    /// Empty registry for `container_type`.
    #[must_use]
    pub const fn new(container_type: ContainerType) -> Self {
        Self {
            container_type,
            order: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Container type the registry binds.
    #[must_use]
    pub const fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    /// Register `binder` for `field`.
    ///
    /// Registering a field twice replaces the binder but keeps the original
    /// declaration position.
    pub fn register(
        &mut self,
        field: FieldName,
        error_config: Option<ErrorMessageConfig>,
        binder: impl FieldBinder + 'static,
    ) -> &mut Self {
        if !self.fields.contains_key(&field) {
            self.order.push(field.clone());
        }
        self.fields.insert(
            field,
            FieldRegistration {
                error_config,
                binder: Arc::new(binder),
            },
        );
        self
    }

    /// Register a required `i32` field.
    pub fn register_mandatory_int(
        &mut self,
        field: FieldName,
        error_config: ErrorMessageConfig,
    ) -> &mut Self {
        self.register(field, Some(error_config), MandatoryIntBinder::new())
    }

    /// Registration for `field`.
    #[must_use]
    pub fn registration(&self, field: &FieldName) -> Option<&FieldRegistration> {
        self.fields.get(field)
    }

    /// Registered field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldName> {
        self.order.iter()
    }

    /// Number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true when no fields are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bind a single registered field.
    pub fn bind_field(
        &self,
        field: &FieldName,
        provider: &dyn ValueProvider,
        model_state: &mut ModelState,
    ) -> Result<BindingOutcome, BinderError> {
        let registration =
            self.fields
                .get(field)
                .ok_or_else(|| BinderError::UnregisteredField {
                    field: field.clone(),
                    container_type: self.container_type.clone(),
                })?;

        let request = FieldBindingRequest {
            field_name: field.clone(),
            container_type: self.container_type.clone(),
            raw_values: provider.get_value(field.as_str()),
            error_config: registration.error_config.clone(),
        };
        registration.binder.bind(&request, model_state)
    }

    /// Bind every registered field in declaration order.
    ///
    /// Validation failures are recorded in `model_state` and binding carries on;
    /// the first fatal error stops the bind.
    pub fn bind_model(
        &self,
        provider: &dyn ValueProvider,
        model_state: &mut ModelState,
    ) -> Result<BoundModel, BinderError> {
        let _span = debug_span!(
            "bind_model",
            container_type = %self.container_type,
            fields = self.order.len()
        )
        .entered();

        let mut bound = BoundModel::default();
        for field in &self.order {
            if let BindingOutcome::Success { value } =
                self.bind_field(field, provider, model_state)?
            {
                bound.values.push((field.clone(), value));
            }
        }
        Ok(bound)
    }
}
