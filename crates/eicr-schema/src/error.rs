//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {}", errors.join("; "))]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema compilation error.
    #[error("Schema compilation error: {0}")]
    Compile(String),

    /// Value passed the schema but could not be deserialised.
    #[error("Deserialisation failed: {0}")]
    Deserialize(#[from] serde_json::Error),
}
