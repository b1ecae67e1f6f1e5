//! Request handlers.
//!
//! Each endpoint runs the same backbone: validate cheaply, call the spec
//! generator if needed, advise, resolve every component, render, persist,
//! respond. Failures are logged against the request id so
//! `GET /api/error-logs/{request_id}` can replay them.

use crate::artifacts::{content_type_for, resolve_artifact};
use crate::codecheck;
use crate::completions::completions_for;
use crate::error::{ApiError, Result};
use crate::feedback::FeedbackRecord;
use crate::middleware::RequestId;
use crate::schema::{
    CompletionsResponse, ErrorLogResponse, ExecuteCodeRequest, ExecuteCodeResponse,
    FeedbackRequest, FeedbackResponse, FeedbackStatsResponse, GenerateDiagramRequest,
    GenerateDiagramResponse, HealthResponse, ModifyDiagramRequest, ModifyDiagramResponse,
    RegenerateFormatRequest, UndoDiagramRequest, ValidateCodeRequest, ValidateCodeResponse,
};
use crate::state::AppState;
use archflow::spec::{ArchitectureSpec, Direction, OutFormats};
use archflow::validate;
use archflow::GenerateRequest;
use archflow_advisor::AdviseOptions;
use archflow_engine::{sanitize_stem, RenderOutcome};
use archflow_resolver::{check_description, Resolution};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use tracing::instrument;
use uuid::Uuid;

/// Map a finished pipeline result, logging failures against the request id.
fn finish<T>(
    state: &AppState,
    request_id: RequestId,
    endpoint: &'static str,
    result: Result<T>,
) -> Result<T> {
    if let Err(err) = &result {
        crate::metrics::record_error(endpoint, err.kind());
        state.request_logs.record(
            request_id.0,
            format!("ERROR {endpoint} [{}]: {err}", err.kind()),
        );
        tracing::warn!(request_id = %request_id.0, endpoint, kind = err.kind(), error = %err, "request failed");
    }
    result
}

/// Enforce the overall request budget around a pipeline future.
async fn with_request_budget<T>(
    state: &AppState,
    inner: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(state.config.request_timeout, inner).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout("request".to_string())),
    }
}

fn artifact_url(path: &std::path::Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("/api/diagrams/{name}")
}

fn artifact_urls(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| artifact_url(p)).collect()
}

fn generation_stem(title: &str, generation_id: Uuid) -> String {
    let short = generation_id.simple().to_string();
    format!("{}_{}", sanitize_stem(title), &short[..8])
}

/// Advise, resolve and render a validated spec.
async fn advise_resolve_render(
    state: &AppState,
    spec: &mut ArchitectureSpec,
    scope_restricted: bool,
    generation_id: Uuid,
) -> Result<(BTreeMap<String, Resolution>, RenderOutcome)> {
    validate::validate(spec).map_err(|e| ApiError::Validation(e.to_string()))?;

    state
        .advisor
        .advise(spec, AdviseOptions { scope_restricted });

    let resolutions = state.resolver.resolve_spec(spec)?;

    let stem = generation_stem(&spec.title, generation_id);
    let outcome = state.renderer.render(spec, &resolutions, &stem).await?;
    Ok((resolutions, outcome))
}

async fn call_generator<T>(
    state: &AppState,
    stage: &'static str,
    fut: impl Future<Output = archflow::Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(state.config.llm_timeout, fut).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => Err(ApiError::Timeout(stage.to_string())),
    }
}

/// `POST /api/generate-diagram`
#[instrument(skip(state, request), fields(request_id = %request_id.0))]
pub async fn generate_diagram(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateDiagramRequest>,
) -> Result<Json<GenerateDiagramResponse>> {
    let inner = async {
        check_description(&request.description).map_err(ApiError::InputRejected)?;

        let provider = request.provider.unwrap_or(state.config.provider_default);
        let out_formats = request
            .out_format
            .clone()
            .unwrap_or_else(|| OutFormats::single(state.config.out_format_default));

        let generated = call_generator(
            &state,
            "spec generation",
            state.generator.generate(GenerateRequest {
                description: request.description.clone(),
                provider,
                out_formats: out_formats.clone(),
                // The natural-language path always renders left-to-right.
                direction: Direction::LR,
            }),
        )
        .await?;

        let mut spec = generated.spec;
        spec.provider = provider;
        spec.out_formats = out_formats;
        spec.direction = Direction::LR;
        if let Some(extra) = &request.graphviz_attrs {
            merge_attrs(&mut spec, extra);
        }

        let generation_id = Uuid::new_v4();
        let (_resolutions, outcome) =
            advise_resolve_render(&state, &mut spec, request.scope_restricted, generation_id)
                .await?;

        let urls = artifact_urls(&outcome.artifact_paths);
        let session = state.sessions.insert(
            spec,
            outcome.artifact_paths.clone(),
            urls.clone(),
            generation_id,
        );

        tracing::info!(
            request_id = %request_id.0,
            session_id = %session.id,
            generation_id = %generation_id,
            artifacts = urls.len(),
            "diagram generated"
        );

        Ok(GenerateDiagramResponse {
            diagram_url: urls.first().cloned().unwrap_or_default(),
            artifact_urls: urls,
            message: "Diagram generated successfully".to_string(),
            session_id: session.id,
            generation_id,
            generated_code: outcome.source,
        })
    };

    let result = with_request_budget(&state, inner).await;
    finish(&state, request_id, "generate-diagram", result).map(Json)
}

/// Merge request-level Graphviz attributes over the generated spec's; the
/// caller's values win.
fn merge_attrs(spec: &mut ArchitectureSpec, extra: &archflow::GraphvizAttrs) {
    for (k, v) in &extra.graph_attr {
        spec.graphviz_attrs
            .graph_attr
            .insert(k.clone(), v.clone());
    }
    for (k, v) in &extra.node_attr {
        spec.graphviz_attrs.node_attr.insert(k.clone(), v.clone());
    }
    for (k, v) in &extra.edge_attr {
        spec.graphviz_attrs.edge_attr.insert(k.clone(), v.clone());
    }
}

/// `POST /api/modify-diagram`
#[instrument(skip(state, request), fields(request_id = %request_id.0, session_id = %request.session_id))]
pub async fn modify_diagram(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ModifyDiagramRequest>,
) -> Result<Json<ModifyDiagramResponse>> {
    let inner = async {
        if request.modification.trim().is_empty() {
            return Err(ApiError::Validation(
                "modification must not be empty".to_string(),
            ));
        }

        let session = state
            .sessions
            .get(request.session_id)
            .ok_or(ApiError::SessionNotFound)?;

        // Serializes with any other mutation of this session.
        let mut session_state = session.state.lock().await;
        let prior = session_state.spec.clone();

        let modified = call_generator(
            &state,
            "spec modification",
            state.generator.modify(&prior, &request.modification),
        )
        .await?;

        let mut spec = modified.spec;
        spec.direction = Direction::LR;

        let generation_id = Uuid::new_v4();
        let (_resolutions, outcome) =
            advise_resolve_render(&state, &mut spec, request.scope_restricted, generation_id)
                .await?;

        let urls = artifact_urls(&outcome.artifact_paths);
        state.sessions.push_undo(&mut session_state, prior);
        session_state.spec = spec.clone();
        session_state.artifact_paths = outcome.artifact_paths.clone();
        session_state.artifact_urls = urls.clone();
        session_state.generation_id = generation_id;

        Ok(ModifyDiagramResponse {
            diagram_url: urls.first().cloned().unwrap_or_default(),
            artifact_urls: urls,
            message: "Diagram updated".to_string(),
            changes: modified.changes,
            updated_spec: spec,
            generation_id,
        })
    };

    let result = with_request_budget(&state, inner).await;
    finish(&state, request_id, "modify-diagram", result).map(Json)
}

/// `POST /api/undo-diagram`
#[instrument(skip(state, request), fields(request_id = %request_id.0, session_id = %request.session_id))]
pub async fn undo_diagram(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<UndoDiagramRequest>,
) -> Result<Json<ModifyDiagramResponse>> {
    let inner = async {
        let session = state
            .sessions
            .get(request.session_id)
            .ok_or(ApiError::SessionNotFound)?;
        let mut session_state = session.state.lock().await;

        let Some(mut spec) = session_state.undo_stack.pop_back() else {
            return Err(ApiError::Validation("nothing to undo".to_string()));
        };

        // The restored spec was advised before it was stored; re-advising is
        // a no-op, so the prior artifact is reproduced exactly.
        let generation_id = Uuid::new_v4();
        let (_resolutions, outcome) =
            advise_resolve_render(&state, &mut spec, false, generation_id).await?;

        let urls = artifact_urls(&outcome.artifact_paths);
        session_state.spec = spec.clone();
        session_state.artifact_paths = outcome.artifact_paths.clone();
        session_state.artifact_urls = urls.clone();
        session_state.generation_id = generation_id;

        Ok(ModifyDiagramResponse {
            diagram_url: urls.first().cloned().unwrap_or_default(),
            artifact_urls: urls,
            message: "Reverted to the previous diagram".to_string(),
            changes: vec!["reverted last modification".to_string()],
            updated_spec: spec,
            generation_id,
        })
    };

    let result = with_request_budget(&state, inner).await;
    finish(&state, request_id, "undo-diagram", result).map(Json)
}

/// `POST /api/regenerate-format`
#[instrument(skip(state, request), fields(request_id = %request_id.0, session_id = %request.session_id))]
pub async fn regenerate_format(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RegenerateFormatRequest>,
) -> Result<Json<ModifyDiagramResponse>> {
    let inner = async {
        let session = state
            .sessions
            .get(request.session_id)
            .ok_or(ApiError::SessionNotFound)?;
        let mut session_state = session.state.lock().await;

        let mut spec = session_state.spec.clone();
        spec.out_formats = request.out_format.clone();

        let generation_id = Uuid::new_v4();
        let (_resolutions, outcome) =
            advise_resolve_render(&state, &mut spec, true, generation_id).await?;

        let urls = artifact_urls(&outcome.artifact_paths);
        session_state.spec = spec.clone();
        session_state.artifact_paths = outcome.artifact_paths.clone();
        session_state.artifact_urls = urls.clone();
        session_state.generation_id = generation_id;

        Ok(ModifyDiagramResponse {
            diagram_url: urls.first().cloned().unwrap_or_default(),
            artifact_urls: urls,
            message: format!(
                "Diagram regenerated as {}",
                request
                    .out_format
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            changes: vec![],
            updated_spec: spec,
            generation_id,
        })
    };

    let result = with_request_budget(&state, inner).await;
    finish(&state, request_id, "regenerate-format", result).map(Json)
}

/// `POST /api/execute-code`
#[instrument(skip(state, request), fields(request_id = %request_id.0))]
pub async fn execute_code(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ExecuteCodeRequest>,
) -> Result<Json<ExecuteCodeResponse>> {
    let inner = async {
        let report = codecheck::check(&request.code);
        if !report.is_valid() {
            return Ok(ExecuteCodeResponse {
                diagram_url: String::new(),
                artifact_urls: vec![],
                message: "Code failed validation".to_string(),
                errors: report.errors,
                warnings: report.warnings,
            });
        }

        let title = request.title.as_deref().unwrap_or("diagram");
        let stem = generation_stem(title, Uuid::new_v4());
        let outcome = state.renderer.execute_source(&request.code, &stem).await?;

        let urls = artifact_urls(&outcome.artifact_paths);
        Ok(ExecuteCodeResponse {
            diagram_url: urls.first().cloned().unwrap_or_default(),
            artifact_urls: urls,
            message: "Code executed successfully".to_string(),
            errors: vec![],
            warnings: report.warnings,
        })
    };

    let result = with_request_budget(&state, inner).await;
    finish(&state, request_id, "execute-code", result).map(Json)
}

/// `POST /api/validate-code`; never a 5xx on invalid input.
pub async fn validate_code(
    Json(request): Json<ValidateCodeRequest>,
) -> Json<ValidateCodeResponse> {
    let report = codecheck::check(&request.code);
    let mut suggestions = report.suggestions;
    // Warnings double as suggestions on this endpoint.
    suggestions.extend(report.warnings);
    Json(ValidateCodeResponse {
        valid: report.errors.is_empty(),
        errors: report.errors,
        suggestions,
    })
}

/// `GET /api/completions/{provider}`
#[instrument(skip(state), fields(request_id = %request_id.0))]
pub async fn completions(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(provider): Path<String>,
) -> Result<Json<CompletionsResponse>> {
    let provider = provider
        .parse::<archflow::Provider>()
        .map_err(ApiError::Validation);
    finish(&state, request_id, "completions", provider).map(|p| Json(completions_for(p)))
}

/// `GET /api/diagrams/{filename}`
#[instrument(skip(state), fields(request_id = %request_id.0, filename = %filename))]
pub async fn serve_diagram(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let inner = async {
        let path = resolve_artifact(&state.config.output_dir, &filename).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|_| ApiError::NotFound(filename.clone()))?;
        let response = (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&path))],
            bytes,
        )
            .into_response();
        Ok(response)
    };

    let result = inner.await;
    finish(&state, request_id, "diagrams", result)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// `GET /metrics`
pub async fn metrics_export() -> Response {
    match crate::metrics::export() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

/// `POST /api/feedback`
#[instrument(skip(state, request), fields(request_id = %request_id.0))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    let result = state
        .feedback
        .record(FeedbackRecord {
            generation_id: request.generation_id,
            session_id: request.session_id,
            rating: request.rating,
            comment: request.comment,
            received_at: chrono::Utc::now(),
        })
        .map_err(ApiError::Validation)
        .map(|()| FeedbackResponse {
            message: "Feedback recorded".to_string(),
        });
    finish(&state, request_id, "feedback", result).map(Json)
}

/// `GET /api/feedback/stats`
pub async fn feedback_stats(State(state): State<AppState>) -> Json<FeedbackStatsResponse> {
    let stats = state.feedback.stats();
    Json(FeedbackStatsResponse {
        count: stats.count,
        average_rating: stats.average_rating,
        by_rating: stats.by_rating,
    })
}

/// `GET /api/error-logs/{request_id}`
#[instrument(skip(state), fields(request_id = %request_id.0))]
pub async fn error_logs(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(wanted): Path<Uuid>,
) -> Result<Json<ErrorLogResponse>> {
    let result = state
        .request_logs
        .lines(wanted)
        .map(|lines| ErrorLogResponse {
            request_id: wanted,
            lines,
        })
        .ok_or_else(|| ApiError::NotFound(format!("logs for request {wanted}")));
    finish(&state, request_id, "error-logs", result).map(Json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_stem_shape() {
        let id = Uuid::new_v4();
        let stem = generation_stem("Order API", id);
        assert!(stem.starts_with("Order_API_"));
        assert_eq!(stem.len(), "Order_API_".len() + 8);
    }

    #[test]
    fn test_artifact_url_uses_file_name_only() {
        let url = artifact_url(std::path::Path::new("/srv/out/orders_ab12cd34.png"));
        assert_eq!(url, "/api/diagrams/orders_ab12cd34.png");
    }

    #[test]
    fn test_merge_attrs_caller_wins() {
        let mut spec: ArchitectureSpec = serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": [{"id": "a", "name": "A", "type": "ec2"}],
            "graphviz_attrs": {"graph_attr": {"splines": "polyline"}}
        }))
        .unwrap();
        let extra: archflow::GraphvizAttrs = serde_json::from_value(serde_json::json!({
            "graph_attr": {"splines": "ortho", "bgcolor": "white"}
        }))
        .unwrap();
        merge_attrs(&mut spec, &extra);
        assert_eq!(spec.graphviz_attrs.graph_attr["splines"], "ortho");
        assert_eq!(spec.graphviz_attrs.graph_attr["bgcolor"], "white");
    }
}
