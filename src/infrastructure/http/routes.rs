//! HTTP Routes
//!
//! API Endpoints:
//! - /generate-voice   POST  文本 → LLM 回复 → 音频流
//! - /api/ping         GET   存活检查
//! - /api/health       GET   上游服务可用性
//! - /api/tones        GET   可用语气列表
//!
//! 根路径 `/` 由 server 决定：托管前端页面或返回 "Server is UP"

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-voice", post(handlers::generate_voice))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/tones", get(handlers::list_tones))
}
