//! Chat Completion Port - 大模型对话补全抽象
//!
//! 定义文本补全的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 对话补全错误
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 上游返回成功但没有可用的回复文本
    #[error("Completion returned no content")]
    EmptyResponse,
}

/// Chat Completion Port
///
/// 外部大模型服务的抽象接口：提示词进，简短回复出
#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    /// 获取对用户文本的回复
    ///
    /// 返回的文本保证非空
    async fn complete(&self, prompt: &str) -> Result<String, ChatError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
