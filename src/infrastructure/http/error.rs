//! HTTP Error Handling
//!
//! 错误统一返回 `{"error": "..."}` 与对应的 HTTP 状态码。
//! 5xx 只返回通用提示，具体原因写入日志。

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 上游失败时返回给调用方的提示
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Upstream service failed. Please try again.";

/// 内部错误时返回给调用方的提示
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 输入无效，消息原样返回
    BadRequest(String),
    /// LLM / TTS 上游失败
    Upstream(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                ErrorResponse::new(msg)
            }
            ApiError::Upstream(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Upstream service failure");
                ErrorResponse::new(UPSTREAM_FAILURE_MESSAGE)
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Internal server error");
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::ExternalServiceError(msg) => ApiError::Upstream(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}
