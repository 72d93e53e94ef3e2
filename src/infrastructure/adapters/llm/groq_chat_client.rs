//! Groq Chat Client - 调用 OpenAI 兼容的对话补全接口
//!
//! 实现 ChatCompletionPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}]}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ChatCompletionPort, ChatError};

pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an AI assistant that provides short, concise and accurate responses.";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    /// 取第一个候选的文本，空白视为无回复
    fn into_reply(self) -> Result<String, ChatError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ChatError::EmptyResponse)
    }
}

/// Groq 客户端配置
#[derive(Debug, Clone)]
pub struct GroqChatClientConfig {
    /// API 基础 URL（不含 /chat/completions）
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    /// 回复最大 token 数，None 表示由服务端决定
    pub max_tokens: Option<u32>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GroqChatClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: None,
            timeout_secs: 30,
        }
    }
}

impl GroqChatClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Groq 对话补全客户端
pub struct GroqChatClient {
    client: Client,
    config: GroqChatClientConfig,
}

impl GroqChatClient {
    pub fn new(config: GroqChatClientConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletionPort for GroqChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout
                } else if e.is_connect() {
                    ChatError::NetworkError(format!("Cannot connect to chat service: {}", e))
                } else {
                    ChatError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ChatError::Timeout
            } else {
                ChatError::InvalidResponse(format!("Failed to decode completion: {}", e))
            }
        })?;

        let reply = body.into_reply()?;

        tracing::info!(
            model = %self.config.model,
            reply_len = reply.len(),
            "Chat completion finished"
        );

        Ok(reply)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.models_url())
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> GroqChatClient {
        GroqChatClient::new(GroqChatClientConfig::new(base_url, "test-key").with_timeout(5)).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = GroqChatClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_CHAT_BASE_URL);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = GroqChatClientConfig::new("http://localhost:9000/v1", "k")
            .with_model("llama-3.1-8b-instant")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let client = client_for("http://example.com/v1/");
        assert_eq!(client.completions_url(), "http://example.com/v1/chat/completions");
    }

    #[test]
    fn test_into_reply_trims_content() {
        let body: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": "  Hi!\n"}}]}))
                .unwrap();
        assert_eq!(body.into_reply().unwrap(), "Hi!");
    }

    #[test]
    fn test_into_reply_rejects_missing_content() {
        for value in [
            json!({}),
            json!({"choices": []}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": "   "}}]}),
        ] {
            let body: ChatCompletionResponse = serde_json::from_value(value).unwrap();
            assert!(matches!(body.into_reply(), Err(ChatError::EmptyResponse)));
        }
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_and_returns_reply() {
        let router = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer test-key");
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
                }
                assert_eq!(body["model"], DEFAULT_CHAT_MODEL);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "What is Rust?");
                (
                    StatusCode::OK,
                    Json(json!({"choices": [{"message": {"role": "assistant", "content": "A language."}}]})),
                )
            }),
        );
        let base_url = spawn_upstream(router).await;

        let reply = client_for(&base_url).complete("What is Rust?").await.unwrap();
        assert_eq!(reply, "A language.");
    }

    #[tokio::test]
    async fn test_complete_maps_http_error() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base_url = spawn_upstream(router).await;

        let err = client_for(&base_url).complete("hi").await.unwrap_err();
        match err {
            ChatError::ServiceError(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("slow down"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_malformed_body() {
        let router = Router::new().route("/chat/completions", post(|| async { "not json" }));
        let base_url = spawn_upstream(router).await;

        let err = client_for(&base_url).complete("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_maps_timeout() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"choices": [{"message": {"content": "too late"}}]}))
            }),
        );
        let base_url = spawn_upstream(router).await;

        let client =
            GroqChatClient::new(GroqChatClientConfig::new(&base_url, "test-key").with_timeout(1))
                .unwrap();
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Timeout));
    }

    #[tokio::test]
    async fn test_complete_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NetworkError(_)));
    }
}
