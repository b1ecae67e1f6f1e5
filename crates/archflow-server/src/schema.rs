//! Request and response schemas for the diagram API.

use archflow::spec::{ArchitectureSpec, Direction, GraphvizAttrs, OutFormats, Provider};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/generate-diagram`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDiagramRequest {
    /// Natural-language architecture description
    pub description: String,

    /// Provider override; falls back to the configured default
    #[serde(default)]
    pub provider: Option<Provider>,

    /// Requested output format(s); falls back to the configured default
    #[serde(default)]
    pub out_format: Option<OutFormats>,

    /// Accepted for wire compatibility; the natural-language path renders LR
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Extra Graphviz attributes merged over the generated spec's
    #[serde(default)]
    pub graphviz_attrs: Option<GraphvizAttrs>,

    /// The description names an exact component inventory; suppress
    /// dependency synthesis
    #[serde(default)]
    pub scope_restricted: bool,
}

/// Response of `POST /api/generate-diagram`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDiagramResponse {
    /// URL of the primary artifact (first requested format)
    pub diagram_url: String,

    /// URLs of every produced artifact, in request order
    pub artifact_urls: Vec<String>,

    pub message: String,
    pub session_id: Uuid,
    pub generation_id: Uuid,

    /// The renderer source that produced the artifact
    pub generated_code: String,
}

/// Body of `POST /api/modify-diagram`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyDiagramRequest {
    pub session_id: Uuid,

    /// Natural-language modification instruction
    pub modification: String,

    /// Suppress dependency synthesis on the re-advised spec
    #[serde(default)]
    pub scope_restricted: bool,
}

/// Response of modify/undo/regenerate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyDiagramResponse {
    pub diagram_url: String,
    pub artifact_urls: Vec<String>,
    pub message: String,
    pub changes: Vec<String>,
    pub updated_spec: ArchitectureSpec,
    pub generation_id: Uuid,
}

/// Body of `POST /api/undo-diagram`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoDiagramRequest {
    pub session_id: Uuid,
}

/// Body of `POST /api/regenerate-format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateFormatRequest {
    pub session_id: Uuid,
    pub out_format: OutFormats,
}

/// Body of `POST /api/execute-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteCodeRequest {
    /// Renderer source to execute in the sandbox
    pub code: String,

    #[serde(default)]
    pub provider: Option<Provider>,

    /// Stem for the scratch file; artifacts are detected by scanning
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub out_format: Option<OutFormats>,
}

/// Response of `POST /api/execute-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteCodeResponse {
    pub diagram_url: String,
    pub artifact_urls: Vec<String>,
    pub message: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Body of `POST /api/validate-code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCodeRequest {
    pub code: String,
}

/// Response of `POST /api/validate-code`. Never a 5xx, however broken the
/// input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateCodeResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Response of `GET /api/completions/{provider}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionsResponse {
    /// Category name to exported classes
    pub classes: std::collections::BTreeMap<String, Vec<String>>,

    /// Class name to its import line
    pub imports: std::collections::BTreeMap<String, String>,

    /// Editor keywords
    pub keywords: Vec<String>,

    /// Edge operators
    pub operators: Vec<String>,
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Generation being rated
    #[serde(default)]
    pub generation_id: Option<Uuid>,

    #[serde(default)]
    pub session_id: Option<Uuid>,

    /// 1 (unusable) to 5 (perfect)
    pub rating: u8,

    #[serde(default)]
    pub comment: Option<String>,
}

/// Response of `POST /api/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Response of `GET /api/feedback/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackStatsResponse {
    pub count: usize,
    pub average_rating: f64,
    pub by_rating: std::collections::BTreeMap<u8, usize>,
}

/// Response of `GET /api/error-logs/{request_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorLogResponse {
    pub request_id: Uuid,
    pub lines: Vec<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_minimal() {
        let req: GenerateDiagramRequest =
            serde_json::from_str(r#"{"description": "lambda behind api gateway"}"#).unwrap();
        assert!(req.provider.is_none());
        assert!(req.out_format.is_none());
        assert!(!req.scope_restricted);
    }

    #[test]
    fn test_generate_request_full() {
        let req: GenerateDiagramRequest = serde_json::from_str(
            r#"{
                "description": "three tier",
                "provider": "azure",
                "out_format": ["svg", "png"],
                "direction": "TB",
                "scope_restricted": true
            }"#,
        )
        .unwrap();
        assert_eq!(req.provider, Some(Provider::Azure));
        assert_eq!(req.out_format.unwrap().len(), 2);
        assert!(req.scope_restricted);
    }

    #[test]
    fn test_generate_request_rejects_bad_provider() {
        let result: std::result::Result<GenerateDiagramRequest, _> =
            serde_json::from_str(r#"{"description": "x", "provider": "oracle"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_regenerate_accepts_single_format_string() {
        let req: RegenerateFormatRequest = serde_json::from_str(&format!(
            r#"{{"session_id": "{}", "out_format": "pdf"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(req.out_format.primary().as_str(), "pdf");
    }

    #[test]
    fn test_feedback_request_shape() {
        let req: FeedbackRequest =
            serde_json::from_str(r#"{"rating": 4, "comment": "nice"}"#).unwrap();
        assert_eq!(req.rating, 4);
        assert_eq!(req.comment.as_deref(), Some("nice"));
    }
}
