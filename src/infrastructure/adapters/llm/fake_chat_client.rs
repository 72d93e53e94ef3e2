//! Fake Chat Client - 用于测试的对话补全客户端
//!
//! 返回固定回复或固定错误，并记录调用次数

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{ChatCompletionPort, ChatError};

/// Fake Chat Client 配置
#[derive(Debug, Clone)]
pub struct FakeChatClientConfig {
    /// 固定回复
    pub reply: String,
    /// 设置后每次调用都返回 ServiceError
    pub error: Option<String>,
}

impl Default for FakeChatClientConfig {
    fn default() -> Self {
        Self {
            reply: "This is a canned reply.".to_string(),
            error: None,
        }
    }
}

/// Fake Chat Client
pub struct FakeChatClient {
    config: FakeChatClientConfig,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeChatClient {
    pub fn new(config: FakeChatClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new(FakeChatClientConfig {
            reply: reply.into(),
            error: None,
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FakeChatClientConfig {
            error: Some(message.into()),
            ..Default::default()
        })
    }

    /// 已发生的调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl ChatCompletionPort for FakeChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        tracing::debug!(prompt_len = prompt.len(), "FakeChatClient: returning canned reply");

        if let Some(message) = &self.config.error {
            return Err(ChatError::ServiceError(message.clone()));
        }
        if self.config.reply.trim().is_empty() {
            return Err(ChatError::EmptyResponse);
        }
        Ok(self.config.reply.clone())
    }
}
