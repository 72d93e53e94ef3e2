//! Fake TTS Client - 用于测试的语音合成客户端
//!
//! 始终返回固定的音频块，不实际调用 TTS 服务

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{AudioStream, SpeechRequest, SpeechSynthesisPort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频块
    pub chunks: Vec<Bytes>,
    pub content_type: String,
    /// 设置后每次调用都返回 ServiceError
    pub error: Option<String>,
    /// 输出前 N 个音频块后以 InvalidResponse 中断流
    pub fail_after: Option<usize>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            chunks: vec![Bytes::from_static(b"ID3")],
            content_type: "audio/mpeg".to_string(),
            error: None,
            fail_after: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
    last_request: Mutex<Option<SpeechRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(chunks: Vec<Bytes>) -> Self {
        Self::new(FakeTtsClientConfig {
            chunks,
            ..Default::default()
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FakeTtsClientConfig {
            error: Some(message.into()),
            ..Default::default()
        })
    }

    pub fn failing_after(chunks: Vec<Bytes>, count: usize) -> Self {
        Self::new(FakeTtsClientConfig {
            chunks,
            fail_after: Some(count),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeTtsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning fixed audio"
        );

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(message) = &self.config.error {
            return Err(TtsError::ServiceError(message.clone()));
        }
        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let mut items: Vec<Result<Bytes, TtsError>> =
            self.config.chunks.iter().cloned().map(Ok).collect();
        if let Some(count) = self.config.fail_after {
            items.truncate(count);
            items.push(Err(TtsError::InvalidResponse(
                "audio stream interrupted".to_string(),
            )));
        }

        let chunks = futures_util::stream::iter(items);
        Ok(AudioStream {
            content_type: self.config.content_type.clone(),
            chunks: chunks.boxed(),
        })
    }
}
