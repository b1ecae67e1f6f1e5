//! Anthropic-backed spec generation.

use crate::prompts;
use archflow::{
    ArchitectureSpec, Error as CoreError, GenerateRequest, GeneratedSpec, ModifiedSpec,
    SpecGenerator,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default model for spec generation.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Default Messages API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Environment variable holding the API key.
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<RequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Envelope the modification prompt asks for.
#[derive(Debug, Deserialize)]
struct ModificationEnvelope {
    spec: ArchitectureSpec,
    #[serde(default)]
    changes: Vec<String>,
}

/// [`SpecGenerator`] backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicSpecGenerator {
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    http_client: reqwest::Client,
}

// Custom Debug to keep the API key out of logs.
impl std::fmt::Debug for AnthropicSpecGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicSpecGenerator")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AnthropicSpecGenerator {
    /// Create a generator, reading the API key from `ANTHROPIC_API_KEY`.
    ///
    /// # Errors
    ///
    /// When the HTTP client cannot be constructed.
    pub fn try_new() -> Result<Self, CoreError> {
        let api_key = std::env::var(ANTHROPIC_API_KEY).unwrap_or_default();
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(AnthropicSpecGenerator {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: Some(0.2),
            http_client,
        })
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the Messages API endpoint (tests point this at a mock server).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set `max_tokens`.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    async fn complete(&self, system: String, user: String) -> Result<String, CoreError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system,
            messages: vec![RequestMessage {
                role: "user",
                content: user,
            }],
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Generator(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Generator(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(map_http_error(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| CoreError::Generator(format!("malformed API response: {e}")))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text),
                ResponseBlock::Other => None,
            })
            .collect();

        if text.trim().is_empty() {
            return Err(CoreError::Generator(
                "model returned no text content".to_string(),
            ));
        }
        Ok(text)
    }
}

fn map_http_error(status: reqwest::StatusCode, body: &str) -> CoreError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| format!("{}: {}", e.error.error_type, e.error.message))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        });
    CoreError::Generator(format!("Anthropic API error ({status}): {message}"))
}

/// Pull the first JSON object out of a model reply, tolerating markdown
/// fences and stray prose around it.
fn extract_json(reply: &str) -> Result<&str, CoreError> {
    let trimmed = reply.trim();
    let without_fence = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.trim_end_matches("```"))
        .unwrap_or(trimmed)
        .trim();

    let start = without_fence
        .find('{')
        .ok_or_else(|| CoreError::Generator("reply contains no JSON object".to_string()))?;

    // Walk to the matching close brace, respecting strings.
    let bytes = without_fence.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&without_fence[start..=offset]);
                }
            }
            _ => {}
        }
    }
    Err(CoreError::Generator(
        "reply contains an unterminated JSON object".to_string(),
    ))
}

#[async_trait]
impl SpecGenerator for AnthropicSpecGenerator {
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedSpec, CoreError> {
        let system = prompts::generation_system_prompt();
        let user = prompts::generation_user_prompt(
            &request.description,
            request.provider,
            &request.out_formats,
            request.direction,
        );

        let reply = self.complete(system, user).await?;
        let json = extract_json(&reply)?;
        let mut spec: ArchitectureSpec = serde_json::from_str(json)
            .map_err(|e| CoreError::Generator(format!("model produced an invalid spec: {e}")))?;

        // The request's provider and formats are authoritative over whatever
        // the model chose to echo back.
        spec.provider = request.provider;
        spec.out_formats = request.out_formats;
        spec.direction = request.direction;

        tracing::debug!(
            components = spec.components.len(),
            connections = spec.connections.len(),
            "generated spec"
        );
        Ok(GeneratedSpec { spec })
    }

    async fn modify(
        &self,
        spec: &ArchitectureSpec,
        instruction: &str,
    ) -> Result<ModifiedSpec, CoreError> {
        let system = prompts::modification_system_prompt();
        let user = prompts::modification_user_prompt(spec, instruction);

        let reply = self.complete(system, user).await?;
        let json = extract_json(&reply)?;
        let envelope: ModificationEnvelope = serde_json::from_str(json).map_err(|e| {
            CoreError::Generator(format!("model produced an invalid modification: {e}"))
        })?;

        let mut modified = envelope.spec;
        // Format and provider stay pinned to the session's spec.
        modified.provider = spec.provider;
        modified.out_formats = spec.out_formats.clone();
        modified.direction = spec.direction;

        Ok(ModifiedSpec {
            spec: modified,
            changes: envelope.changes,
        })
    }
}
