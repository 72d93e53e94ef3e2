//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 当状态码为 4xx 或 5xx 时记录日志（含处理耗时）。
/// 对流式响应，耗时只统计到响应头返回为止。
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    async fn audio_handler() -> &'static str {
        "ID3"
    }

    async fn bad_gateway_handler() -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/audio", post(audio_handler))
            .route("/upstream-down", post(bad_gateway_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn send(path: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        assert_eq!(send("/audio").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_passes_through() {
        assert_eq!(send("/missing").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        assert_eq!(send("/upstream-down").await, StatusCode::BAD_GATEWAY);
    }
}
