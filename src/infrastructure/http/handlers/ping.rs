//! Ping / Health Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::HealthResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 未托管前端页面时的根路径
pub async fn root() -> &'static str {
    "Server is UP"
}

/// 上游服务可用性检查
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (chat, tts) = tokio::join!(state.chat.health_check(), state.tts.health_check());

    let healthy = chat && tts;
    if !healthy {
        tracing::warn!(chat, tts, "Upstream health check failed");
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            chat,
            tts,
        }),
    )
}
