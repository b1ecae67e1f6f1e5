//! Typed HTTP client for an archflow server.
//!
//! Front-ends and scripts that drive the service over HTTP get the same
//! request/response types the server itself speaks, plus structured error
//! decoding: a non-2xx response is parsed back into its taxonomy kind rather
//! than surfaced as a bare status code.
//!
//! # Example
//!
//! ```no_run
//! use archflow_server::client::ArchflowClient;
//! use archflow_server::schema::GenerateDiagramRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArchflowClient::new("http://localhost:8000")?;
//! let generated = client
//!     .generate(&GenerateDiagramRequest {
//!         description: "api gateway in front of lambda and dynamodb".to_string(),
//!         provider: None,
//!         out_format: None,
//!         direction: None,
//!         graphviz_attrs: None,
//!         scope_restricted: false,
//!     })
//!     .await?;
//! println!("artifact at {}", generated.diagram_url);
//! # Ok(())
//! # }
//! ```

use crate::error::ErrorResponse;
use crate::schema::{
    CompletionsResponse, ErrorLogResponse, ExecuteCodeRequest, ExecuteCodeResponse,
    FeedbackRequest, FeedbackResponse, FeedbackStatsResponse, GenerateDiagramRequest,
    GenerateDiagramResponse, HealthResponse, ModifyDiagramRequest, ModifyDiagramResponse,
    RegenerateFormatRequest, UndoDiagramRequest, ValidateCodeRequest, ValidateCodeResponse,
};
use archflow::Provider;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Client-side failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The base URL could not be parsed
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error taxonomy body
    #[error("server error ({status}) {kind}: {message}")]
    Api {
        /// HTTP status
        status: StatusCode,
        /// Taxonomy kind (`resolver_error`, `session_not_found`, ...)
        kind: String,
        /// Human-readable message
        message: String,
    },

    /// The response body did not decode as the expected type
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Result alias for client calls.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Typed client for the diagram API.
#[derive(Debug, Clone)]
pub struct ArchflowClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ArchflowClient {
    /// Create a client for a server base URL (e.g. `http://localhost:8000`).
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidUrl`] when the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::InvalidUrl(format!("{normalized}: {e}")))?;
        Ok(ArchflowClient {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, ...).
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(body).send().await?;
        decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    /// `POST /api/generate-diagram`
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] carrying the server's taxonomy kind on rejection.
    pub async fn generate(
        &self,
        request: &GenerateDiagramRequest,
    ) -> Result<GenerateDiagramResponse> {
        self.post("api/generate-diagram", request).await
    }

    /// `POST /api/modify-diagram`
    ///
    /// # Errors
    ///
    /// `session_not_found` after TTL expiry surfaces as [`ClientError::Api`].
    pub async fn modify(&self, request: &ModifyDiagramRequest) -> Result<ModifyDiagramResponse> {
        self.post("api/modify-diagram", request).await
    }

    /// `POST /api/undo-diagram`
    ///
    /// # Errors
    ///
    /// See [`ArchflowClient::modify`].
    pub async fn undo(&self, session_id: Uuid) -> Result<ModifyDiagramResponse> {
        self.post("api/undo-diagram", &UndoDiagramRequest { session_id })
            .await
    }

    /// `POST /api/regenerate-format`
    ///
    /// # Errors
    ///
    /// See [`ArchflowClient::modify`].
    pub async fn regenerate_format(
        &self,
        request: &RegenerateFormatRequest,
    ) -> Result<ModifyDiagramResponse> {
        self.post("api/regenerate-format", request).await
    }

    /// `POST /api/execute-code`
    ///
    /// # Errors
    ///
    /// Sandbox failures surface as `render_failed` [`ClientError::Api`].
    pub async fn execute_code(&self, request: &ExecuteCodeRequest) -> Result<ExecuteCodeResponse> {
        self.post("api/execute-code", request).await
    }

    /// `POST /api/validate-code`
    ///
    /// # Errors
    ///
    /// Only transport/decoding failures; invalid code is a 200 with
    /// `valid: false`.
    pub async fn validate_code(&self, code: &str) -> Result<ValidateCodeResponse> {
        self.post(
            "api/validate-code",
            &ValidateCodeRequest {
                code: code.to_string(),
            },
        )
        .await
    }

    /// `GET /api/completions/{provider}`
    ///
    /// # Errors
    ///
    /// Transport failures and unknown providers.
    pub async fn completions(&self, provider: Provider) -> Result<CompletionsResponse> {
        self.get(&format!("api/completions/{provider}")).await
    }

    /// `POST /api/feedback`
    ///
    /// # Errors
    ///
    /// Out-of-range ratings surface as `validation_error`.
    pub async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackResponse> {
        self.post("api/feedback", request).await
    }

    /// `GET /api/feedback/stats`
    ///
    /// # Errors
    ///
    /// Transport/decoding failures only.
    pub async fn feedback_stats(&self) -> Result<FeedbackStatsResponse> {
        self.get("api/feedback/stats").await
    }

    /// `GET /api/error-logs/{request_id}`
    ///
    /// # Errors
    ///
    /// `not_found` when the server no longer retains the request's lines.
    pub async fn error_logs(&self, request_id: Uuid) -> Result<ErrorLogResponse> {
        self.get(&format!("api/error-logs/{request_id}")).await
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Transport/decoding failures only.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("health").await
    }

    /// Fetch an artifact by its returned URL (`/api/diagrams/{name}` or a
    /// bare filename).
    ///
    /// # Errors
    ///
    /// Traversal rejections and missing artifacts surface as
    /// [`ClientError::Api`].
    pub async fn fetch_artifact(&self, url_or_name: &str) -> Result<Vec<u8>> {
        let path = url_or_name.trim_start_matches('/');
        let path = if path.starts_with("api/diagrams/") {
            path.to_string()
        } else {
            format!("api/diagrams/{path}")
        };
        let url = self.endpoint(&path)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    } else {
        Err(api_error(status, &body))
    }
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => ClientError::Api {
            status,
            kind: parsed.kind,
            message: parsed.error,
        },
        Err(_) => ClientError::Api {
            status,
            kind: "unknown".to_string(),
            message: body.trim().to_string(),
        },
    }
}
