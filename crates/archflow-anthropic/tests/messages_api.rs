//! Integration tests against a mocked Messages API endpoint.

#![allow(clippy::unwrap_used)]

use archflow::{Direction, GenerateRequest, OutFormat, OutFormats, Provider, SpecGenerator};
use archflow_anthropic::AnthropicSpecGenerator;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer) -> AnthropicSpecGenerator {
    AnthropicSpecGenerator::try_new()
        .unwrap()
        .with_api_key("test-key")
        .with_api_url(format!("{}/v1/messages", server.uri()))
}

fn request(description: &str) -> GenerateRequest {
    GenerateRequest {
        description: description.to_string(),
        provider: Provider::Aws,
        out_formats: OutFormats::single(OutFormat::Svg),
        direction: Direction::LR,
    }
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-7-sonnet-20250219",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 100, "output_tokens": 200}
    })
}

#[tokio::test]
async fn generate_parses_spec_and_pins_request_fields() {
    let server = MockServer::start().await;
    let spec_json = json!({
        "title": "Orders",
        "provider": "azure",
        "out_format": "png",
        "components": [
            {"id": "api", "name": "API", "type": "apigateway"},
            {"id": "fn", "name": "Handler", "type": "lambda"}
        ],
        "connections": [{"from_id": "api", "to_id": "fn"}]
    });

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&spec_json.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let out = generator(&server)
        .generate(request("api gateway in front of lambda"))
        .await
        .unwrap();

    assert_eq!(out.spec.title, "Orders");
    assert_eq!(out.spec.components.len(), 2);
    // The request's provider/format win over the model's echo.
    assert_eq!(out.spec.provider, Provider::Aws);
    assert_eq!(out.spec.out_formats.primary(), OutFormat::Svg);
}

#[tokio::test]
async fn generate_unwraps_markdown_fences() {
    let server = MockServer::start().await;
    let fenced = "```json\n{\"title\": \"T\", \"components\": [{\"id\": \"a\", \"name\": \"A\", \"type\": \"ec2\"}]}\n```";

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(fenced)))
        .mount(&server)
        .await;

    let out = generator(&server).generate(request("one ec2 box")).await.unwrap();
    assert_eq!(out.spec.title, "T");
}

#[tokio::test]
async fn api_error_surfaces_error_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "type": "error",
            "error": {"type": "rate_limit_error", "message": "slow down"}
        })))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate(request("anything with lambda"))
        .await
        .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("rate_limit_error"));
    assert!(rendered.contains("slow down"));
}

#[tokio::test]
async fn invalid_spec_json_is_a_generator_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
            "{\"title\": \"T\", \"components\": \"not-a-list\"}",
        )))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate(request("anything with lambda"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid spec"));
}

#[tokio::test]
async fn empty_content_is_a_generator_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-7-sonnet-20250219",
            "content": [],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1, "output_tokens": 0}
        })))
        .mount(&server)
        .await;

    let err = generator(&server)
        .generate(request("anything with lambda"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no text content"));
}

#[tokio::test]
async fn modify_returns_spec_and_changes() {
    let server = MockServer::start().await;
    let current: archflow::ArchitectureSpec = serde_json::from_value(json!({
        "title": "Orders",
        "components": [{"id": "fn", "name": "Handler", "type": "lambda"}]
    }))
    .unwrap();

    let envelope = json!({
        "spec": {
            "title": "Orders",
            "components": [
                {"id": "fn", "name": "Handler", "type": "lambda"},
                {"id": "q", "name": "Work queue", "type": "sqs"}
            ],
            "connections": [{"from_id": "fn", "to_id": "q"}]
        },
        "changes": ["added SQS work queue", "connected handler to queue"]
    });

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(&envelope.to_string())))
        .mount(&server)
        .await;

    let out = generator(&server)
        .modify(&current, "add a work queue")
        .await
        .unwrap();
    assert_eq!(out.spec.components.len(), 2);
    assert_eq!(out.changes.len(), 2);
    assert_eq!(out.spec.provider, current.provider);
}
