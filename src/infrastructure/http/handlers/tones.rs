//! Tone Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListTones;
use crate::infrastructure::http::dto::TonesResponse;
use crate::infrastructure::http::state::AppState;

/// 获取可用语气列表
pub async fn list_tones(State(state): State<Arc<AppState>>) -> Json<TonesResponse> {
    Json(TonesResponse {
        tones: state.list_tones_handler.handle(ListTones),
    })
}
