//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 请求体大小上限（字节）
    pub max_body_bytes: usize,
    /// 前端页面目录，None 或目录不存在时根路径返回 "Server is UP"
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: 1024 * 1024,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }

    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    fn build_router(&self) -> Router {
        // 前端页面可能由其他来源托管
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600));

        let routes = match &self.config.static_dir {
            Some(dir) if dir.is_dir() => create_routes().fallback_service(ServeDir::new(dir)),
            Some(dir) => {
                warn!(
                    dir = %dir.display(),
                    "Static directory not found, serving plain root instead"
                );
                create_routes().route("/", get(handlers::root))
            }
            None => create_routes().route("/", get(handlers::root)),
        };

        routes
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use bytes::Bytes;
    use tower::util::ServiceExt;

    use crate::domain::tone::ToneCatalog;
    use crate::infrastructure::adapters::{FakeChatClient, FakeTtsClient};

    fn server(config: ServerConfig) -> HttpServer {
        let catalog = Arc::new(ToneCatalog::builtin().unwrap());
        let state = AppState::new(
            catalog,
            Arc::new(FakeChatClient::replying("ok")),
            Arc::new(FakeTtsClient::replying(vec![Bytes::from_static(b"ID3")])),
        );
        HttpServer::new(config, state)
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert!(config.static_dir.is_none());
    }

    #[tokio::test]
    async fn test_root_without_static_dir() {
        let router = server(ServerConfig::default()).build_router();
        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Server is UP");
    }

    #[tokio::test]
    async fn test_root_serves_static_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>EchoMind</h1>").unwrap();

        let config = ServerConfig::default().with_static_dir(Some(dir.path().to_path_buf()));
        let router = server(config).build_router();

        let (status, body) = get_body(router.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("EchoMind"));

        // API 路由优先于静态文件
        let (status, body) = get_body(router, "/api/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"ok\""));
    }

    #[tokio::test]
    async fn test_root_falls_back_when_static_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("web");

        let config = ServerConfig::default().with_static_dir(Some(missing));
        let router = server(config).build_router();

        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Server is UP");
    }

    #[tokio::test]
    async fn test_body_limit_rejects_oversized_request() {
        let router = server(ServerConfig::default().with_max_body_bytes(64)).build_router();

        let text = "a".repeat(256);
        let request = Request::builder()
            .method("POST")
            .uri("/generate-voice")
            .header("content-type", "application/json")
            .body(Body::from(format!(
                r#"{{"userText": "{}", "voiceType": "formal"}}"#,
                text
            )))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
