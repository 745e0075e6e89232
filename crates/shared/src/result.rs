//! Result helpers for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for results carrying an `ErrorEnvelope`.
pub trait ResultExt<T> {
    /// Attach a metadata entry to the error, preserving the success.
    fn with_metadata(self, key: &str, value: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ErrorEnvelope>,
{
    fn with_metadata(self, key: &str, value: &str) -> Result<T> {
        self.map_err(|error| error.into().with_metadata(key, value))
    }
}
