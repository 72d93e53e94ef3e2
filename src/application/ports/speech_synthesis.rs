//! Speech Synthesis Port - 语音合成抽象
//!
//! 合成结果以字节块流的形式返回，不在内存中缓冲整段音频。
//! 丢弃流即终止上游传输。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::domain::tone::VoiceId;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No text provided for speech conversion")]
    EmptyText,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色标识
    pub voice_id: VoiceId,
}

/// 音频字节块流
pub type AudioChunks = BoxStream<'static, Result<Bytes, TtsError>>;

/// 合成得到的音频流
pub struct AudioStream {
    /// MIME 类型（如 audio/mpeg）
    pub content_type: String,
    /// 音频数据块
    pub chunks: AudioChunks,
}

impl std::fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioStream")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Speech Synthesis Port
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// 发起合成，上游响应头到达后立即返回流
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, TtsError>;

    async fn health_check(&self) -> bool {
        true
    }
}
