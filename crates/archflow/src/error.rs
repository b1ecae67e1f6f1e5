//! Shared error taxonomy for the diagram pipeline.
//!
//! These are the kinds that cross crate boundaries: the spec generator and
//! orchestrator speak in terms of [`Error`]; the resolver and engine define
//! richer error types in their own crates and the server maps everything onto
//! HTTP statuses.

use crate::validate::SpecValidationError;
use thiserror::Error;

/// Error kinds shared across the pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Request or generated spec failed shape/enum/size checks
    #[error("validation failed: {0}")]
    Validation(String),

    /// Input does not describe a cloud architecture
    #[error("input rejected: {0}")]
    InputRejected(String),

    /// The spec generator (LLM provider) failed
    #[error("spec generation failed: {0}")]
    Generator(String),

    /// A pipeline step exceeded its time budget
    #[error("{stage} timed out after {seconds}s")]
    Timeout {
        /// Pipeline stage that timed out (e.g. "spec generation", "render")
        stage: String,
        /// Budget that was exceeded
        seconds: u64,
    },

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SpecValidationError> for Error {
    fn from(err: SpecValidationError) -> Self {
        Error::Validation(err.to_string())
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
