//! Error types for `eicr-core`.
//!
//! Validation outcomes are never errors: a failed electrical test is a
//! [`Verdict`](crate::verdict::Verdict) with `severity = error`. `CoreError`
//! only covers malformed input at the parsing boundary (CLI arguments, session
//! files). A unified error is deferred to `eicr-cli` where all crate errors
//! converge into `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name any known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    /// A device identifier could not be parsed.
    #[error("Invalid device identifier '{0}': expected a curve letter followed by a rating, e.g. B32")]
    InvalidDevice(String),

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
