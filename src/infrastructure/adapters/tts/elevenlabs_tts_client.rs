//! ElevenLabs TTS Client - 调用外部流式语音合成服务
//!
//! 实现 SpeechSynthesisPort trait
//!
//! 外部 TTS API:
//! POST {base_url}/text-to-speech/{voice_id}/stream?output_format=mp3_44100_128
//! Header: xi-api-key
//! Request: {"text": "...", "model_id": "..."}  (JSON)
//! Response: 音频二进制流（chunked）

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::{header, Client};
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{AudioStream, SpeechRequest, SpeechSynthesisPort, TtsError};

pub const DEFAULT_TTS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// 根据 output_format 前缀推断 MIME 类型
pub fn content_type_for_format(output_format: &str) -> &'static str {
    match output_format.split('_').next().unwrap_or_default() {
        "mp3" => "audio/mpeg",
        "pcm" => "audio/pcm",
        "ulaw" => "audio/basic",
        "opus" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "audio/mpeg",
    }
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsTtsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    pub api_key: String,
    /// 合成模型
    pub model_id: String,
    /// 输出格式（如 mp3_44100_128）
    pub output_format: String,
    /// 连接超时（秒）
    ///
    /// 只限制建立连接，音频流本身不设总超时
    pub connect_timeout_secs: u64,
}

impl Default for ElevenLabsTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TTS_BASE_URL.to_string(),
            api_key: String::new(),
            model_id: DEFAULT_TTS_MODEL.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl ElevenLabsTtsClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }
}

/// ElevenLabs TTS 客户端
pub struct ElevenLabsTtsClient {
    client: Client,
    config: ElevenLabsTtsClientConfig,
}

impl ElevenLabsTtsClient {
    pub fn new(config: ElevenLabsTtsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取流式合成 URL
    fn stream_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{}/stream",
            self.config.base_url.trim_end_matches('/'),
            voice_id
        )
    }

    fn user_url(&self) -> String {
        format!("{}/user", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechSynthesisPort for ElevenLabsTtsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, TtsError> {
        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let url = self.stream_url(request.voice_id.as_str());
        let body = TtsHttpRequest {
            text: &request.text,
            model_id: &self.config.model_id,
        };

        tracing::debug!(
            url = %url,
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            output_format = %self.config.output_format,
            "Sending TTS stream request"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("output_format", self.config.output_format.as_str())])
            .header("xi-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 优先使用上游声明的音频类型
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for_format(&self.config.output_format).to_string());

        tracing::info!(
            voice_id = %request.voice_id,
            content_type = %content_type,
            "TTS stream opened"
        );

        let chunks = response
            .bytes_stream()
            .map_err(|e| TtsError::InvalidResponse(format!("Audio stream interrupted: {}", e)))
            .boxed();

        Ok(AudioStream {
            content_type,
            chunks,
        })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.user_url())
            .header("xi-api-key", &self.config.api_key)
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
    use axum::{
        body::Body,
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Response},
        routing::post,
        Json, Router,
    };
    use bytes::Bytes;
    use serde_json::Value;
    use std::collections::HashMap;

    use crate::domain::tone::VoiceId;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(text: &str) -> SpeechRequest {
        SpeechRequest {
            text: text.to_string(),
            voice_id: VoiceId::new("voice-123").unwrap(),
        }
    }

    fn client_for(base_url: &str) -> ElevenLabsTtsClient {
        ElevenLabsTtsClient::new(ElevenLabsTtsClientConfig::new(base_url, "xi-test")).unwrap()
    }

    async fn fake_stream(
        Path(voice_id): Path<String>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        if headers.get("xi-api-key").and_then(|v| v.to_str().ok()) != Some("xi-test") {
            return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
        }
        if voice_id != "voice-123" {
            return (StatusCode::NOT_FOUND, "voice not found").into_response();
        }
        if query.get("output_format").map(String::as_str) != Some(DEFAULT_OUTPUT_FORMAT) {
            return (StatusCode::BAD_REQUEST, "bad format").into_response();
        }
        if body["model_id"] != DEFAULT_TTS_MODEL || body["text"] != "Hello" {
            return (StatusCode::BAD_REQUEST, "bad body").into_response();
        }

        let chunks = vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"ID3")),
            Ok(Bytes::from_static(b"frame-1")),
            Ok(Bytes::from_static(b"frame-2")),
        ];
        Response::builder()
            .header("content-type", "audio/mpeg")
            .body(Body::from_stream(futures_util::stream::iter(chunks)))
            .unwrap()
    }

    #[test]
    fn test_content_type_for_format() {
        assert_eq!(content_type_for_format("mp3_44100_128"), "audio/mpeg");
        assert_eq!(content_type_for_format("pcm_16000"), "audio/pcm");
        assert_eq!(content_type_for_format("ulaw_8000"), "audio/basic");
        assert_eq!(content_type_for_format("something"), "audio/mpeg");
    }

    #[test]
    fn test_stream_url() {
        let client = client_for("https://api.example.com/v1/");
        assert_eq!(
            client.stream_url("abc"),
            "https://api.example.com/v1/text-to-speech/abc/stream"
        );
    }

    #[tokio::test]
    async fn test_synthesize_streams_audio() {
        let router = Router::new().route("/text-to-speech/:voice_id/stream", post(fake_stream));
        let base_url = spawn_upstream(router).await;

        let audio = client_for(&base_url).synthesize(request("Hello")).await.unwrap();
        assert_eq!(audio.content_type, "audio/mpeg");

        let data: Vec<Bytes> = audio.chunks.try_collect().await.unwrap();
        assert_eq!(data.concat(), b"ID3frame-1frame-2".to_vec());
    }

    #[tokio::test]
    async fn test_synthesize_maps_http_error() {
        let router = Router::new().route("/text-to-speech/:voice_id/stream", post(fake_stream));
        let base_url = spawn_upstream(router).await;

        let client = ElevenLabsTtsClient::new(ElevenLabsTtsClientConfig::new(&base_url, "wrong"))
            .unwrap();
        let err = client.synthesize(request("Hello")).await.unwrap_err();
        match err {
            TtsError::ServiceError(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_content_type_falls_back_to_output_format() {
        let router = Router::new().route(
            "/text-to-speech/:voice_id/stream",
            post(|| async {
                (
                    [("content-type", "application/octet-stream")],
                    Bytes::from_static(b"\x00\x01"),
                )
            }),
        );
        let base_url = spawn_upstream(router).await;

        let config =
            ElevenLabsTtsClientConfig::new(&base_url, "xi-test").with_output_format("pcm_16000");
        let client = ElevenLabsTtsClient::new(config).unwrap();

        let audio = client.synthesize(request("Hello")).await.unwrap();
        assert_eq!(audio.content_type, "audio/pcm");
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_text_before_request() {
        // 端口未监听：若发出请求会得到 NetworkError
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .synthesize(request("  "))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyText));
    }
}
