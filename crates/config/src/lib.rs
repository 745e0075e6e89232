//! # form-binding-config
//!
//! Field declaration config: schema, validation, env overrides and loading.
//! A validated config builds the [`form_binding_binder::BinderRegistry`] the
//! CLI binds requests with.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{BinderEnv, ENV_CONTAINER_TYPE, ENV_MAX_MODEL_ERRORS, EnvParseError, apply_env_overrides};
pub use load::{
    ConfigFormat, load_binder_config_from_path, load_binder_config_from_str,
    load_binder_config_std_env, to_pretty_toml,
};
pub use schema::{
    BinderConfig, BinderKind, CURRENT_CONFIG_VERSION, ConfigSchemaError, ErrorTextDeclaration,
    FieldDeclaration, MAX_MODEL_ERRORS_RANGE, ValidatedBinderConfig, ValidatedField,
    binder_config_schema, parse_binder_config_json, parse_binder_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
