//! Request-scoped context: id tagging and timing.
//!
//! Every response carries `X-Request-ID` and `X-Process-Time` (seconds with
//! millisecond precision). Handlers read the id back out of extensions to tag
//! their log lines.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use uuid::Uuid;

/// The request id, available to handlers through `Extension<RequestId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

/// Middleware tagging requests with an id and timing them end to end.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let request_id = RequestId(Uuid::new_v4());
    let endpoint = request.uri().path().to_string();
    request.extensions_mut().insert(request_id);

    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16();
    crate::metrics::record_request(&endpoint, status, elapsed);

    if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
        response.headers_mut().insert("x-request-id", value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.3}")) {
        response.headers_mut().insert("x-process-time", value);
    }

    tracing::debug!(
        request_id = %request_id.0,
        endpoint = %endpoint,
        status,
        elapsed_secs = elapsed,
        "request completed"
    );
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_headers_attached() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(request_context));

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("x-request-id").unwrap();
        assert!(Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
        let process_time = response.headers().get("x-process-time").unwrap();
        assert!(process_time.to_str().unwrap().parse::<f64>().is_ok());
    }

    #[tokio::test]
    async fn test_ids_are_unique_per_request() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(request_context));

        let mut seen = std::collections::HashSet::new();
        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
                .await
                .unwrap();
            let id = response
                .headers()
                .get("x-request-id")
                .unwrap()
                .to_str()
                .unwrap()
                .to_string();
            assert!(seen.insert(id));
        }
    }
}
