//! API error taxonomy and HTTP mapping.
//!
//! Lower layers raise typed errors; this module folds them into the response
//! taxonomy. Every error body names its kind so clients can branch without
//! parsing prose, and resolver failures carry the full diagnostic payload.

use archflow::Error as CoreError;
use archflow_engine::EngineError;
use archflow_resolver::ResolverError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service error taxonomy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Request or spec failed shape/enum/size checks
    #[error("validation failed: {0}")]
    Validation(String),

    /// Input does not describe a cloud architecture
    #[error("input rejected: {0}")]
    InputRejected(String),

    /// A component could not be mapped to any renderer symbol
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Session id unknown or expired
    #[error("session not found or expired")]
    SessionNotFound,

    /// Requested resource missing (artifact file, retained log, ...)
    #[error("not found: {0}")]
    NotFound(String),

    /// Artifact name failed the character filter
    #[error("malformed artifact name")]
    MalformedName,

    /// Artifact name attempted to escape the output directory
    #[error("path traversal rejected")]
    Traversal,

    /// Renderer subprocess failed or produced no artifact
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// A pipeline step exceeded its budget
    #[error("{0} timed out")]
    Timeout(String),

    /// Unexpected failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Taxonomy kind string used in bodies, logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::InputRejected(_) => "input_rejected",
            ApiError::Resolver(_) => "resolver_error",
            ApiError::SessionNotFound => "session_not_found",
            ApiError::NotFound(_) => "not_found",
            ApiError::MalformedName => "validation_error",
            ApiError::Traversal => "forbidden",
            ApiError::RenderFailed(_) => "render_failed",
            ApiError::Timeout(_) => "timeout",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this kind.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InputRejected(_) | ApiError::MalformedName => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Resolver(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Traversal => StatusCode::FORBIDDEN,
            ApiError::RenderFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Taxonomy kind
    pub kind: String,
    /// Human-readable message
    pub error: String,
    /// HTTP status echoed into the body
    pub status: u16,
    /// Resolver diagnostic payload, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Resolver(err) => serde_json::to_value(err.diagnostic()).ok(),
            _ => None,
        };
        let body = Json(ErrorResponse {
            kind: self.kind().to_string(),
            error: self.to_string(),
            status: status.as_u16(),
            details,
        });
        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::InputRejected(msg) => ApiError::InputRejected(msg),
            CoreError::Generator(msg) => ApiError::Internal(format!("spec generation failed: {msg}")),
            CoreError::Timeout { stage, .. } => ApiError::Timeout(stage),
            CoreError::Internal(msg) => ApiError::Internal(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Timeout { .. } => {
                crate::metrics::record_render_failure("timeout");
                ApiError::Timeout("render".to_string())
            }
            EngineError::RenderFailed { .. } => {
                crate::metrics::record_render_failure("nonzero_exit");
                ApiError::RenderFailed(err.to_string())
            }
            EngineError::NoArtifact { .. } => {
                crate::metrics::record_render_failure("no_artifact");
                ApiError::RenderFailed(err.to_string())
            }
            EngineError::Emit(e) => ApiError::Internal(e.to_string()),
            EngineError::Io(e) => ApiError::Internal(format!("renderer io error: {e}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Result alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InputRejected("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::SessionNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Traversal.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::RenderFailed("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Timeout("render".into()).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ApiError::SessionNotFound.kind(), "session_not_found");
        assert_eq!(ApiError::MalformedName.kind(), "validation_error");
        assert_eq!(ApiError::RenderFailed("x".into()).kind(), "render_failed");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = CoreError::InputRejected("nope".into()).into();
        assert!(matches!(err, ApiError::InputRejected(_)));

        let err: ApiError = CoreError::Timeout {
            stage: "spec generation".into(),
            seconds: 60,
        }
        .into();
        assert!(matches!(err, ApiError::Timeout(_)));
    }

    #[test]
    fn test_engine_error_conversion() {
        let err: ApiError = EngineError::Timeout { seconds: 60 }.into();
        assert!(matches!(err, ApiError::Timeout(_)));

        let err: ApiError = EngineError::RenderFailed {
            exit_code: Some(1),
            stderr: "dot: boom".into(),
        }
        .into();
        assert!(matches!(err, ApiError::RenderFailed(_)));
    }
}
