//! CLI command handlers.

pub mod bind;
pub mod config;

pub use bind::{BindCommandInput, run_bind};
pub use config::{run_config_check, run_config_schema};
