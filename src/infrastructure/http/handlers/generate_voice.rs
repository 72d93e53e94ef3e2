//! Generate Voice Handler
//!
//! 校验 → LLM → TTS，音频逐块转发给客户端。
//! 客户端断开时响应体被丢弃，上游 TTS 请求随之终止。

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures_util::TryStreamExt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::infrastructure::http::dto::GenerateVoiceRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成语音
pub async fn generate_voice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateVoiceRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_voice", request_id = %request_id);

    let generated = state
        .generate_voice_handler
        .handle(req.into())
        .instrument(span)
        .await?;

    let chunks = generated.audio.chunks.inspect_err(move |e| {
        tracing::error!(request_id = %request_id, error = %e, "Audio stream aborted");
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, generated.audio.content_type.as_str())
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(chunks))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
