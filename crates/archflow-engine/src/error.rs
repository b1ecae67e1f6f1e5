//! Engine error types.

use crate::emit::EmitError;
use thiserror::Error;

/// How much captured stderr an error payload keeps.
pub const STDERR_LIMIT: usize = 4096;

/// Rendering failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Source emission failed (upstream contract violation)
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Filesystem or spawn failure
    #[error("renderer io error: {0}")]
    Io(#[from] std::io::Error),

    /// Renderer subprocess exited non-zero
    #[error("renderer failed (exit code {exit_code:?}): {stderr}")]
    RenderFailed {
        /// Exit code when the process exited normally
        exit_code: Option<i32>,
        /// Captured stderr, truncated to [`STDERR_LIMIT`]
        stderr: String,
    },

    /// Renderer exited cleanly but the expected artifact never appeared
    #[error("renderer produced no artifact at {expected:?}")]
    NoArtifact {
        /// Artifact filename that was expected in the output directory
        expected: String,
    },

    /// The subprocess exceeded its wall-clock budget
    #[error("renderer timed out after {seconds}s")]
    Timeout {
        /// Budget that was exceeded
        seconds: u64,
    },
}

/// Truncate captured output to a payload-sized tail-safe prefix.
#[must_use]
pub fn truncate_output(raw: &str, limit: usize) -> String {
    if raw.len() <= limit {
        return raw.to_string();
    }
    let mut cut = limit;
    while !raw.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}… [truncated {} bytes]", &raw[..cut], raw.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_output_unchanged() {
        assert_eq!(truncate_output("boom", 100), "boom");
    }

    #[test]
    fn test_truncate_long_output() {
        let long = "e".repeat(10_000);
        let truncated = truncate_output(&long, STDERR_LIMIT);
        assert!(truncated.len() < long.len());
        assert!(truncated.contains("[truncated"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "é".repeat(100);
        let truncated = truncate_output(&s, 33);
        assert!(truncated.starts_with('é'));
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::RenderFailed {
            exit_code: Some(1),
            stderr: "dot: not found".to_string(),
        };
        assert!(err.to_string().contains("dot: not found"));

        let err = EngineError::Timeout { seconds: 60 };
        assert_eq!(err.to_string(), "renderer timed out after 60s");
    }
}
