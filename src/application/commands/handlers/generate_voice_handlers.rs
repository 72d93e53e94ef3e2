//! Generate Voice Command Handler
//!
//! 用户文本 → 对话补全 → 语音合成 → 音频流
//!
//! 两次外部调用严格串行，任何一步失败都终止整个请求，不重试

use std::sync::Arc;

use crate::application::commands::{GenerateVoice, INVALID_VOICE_TYPE, TEXT_REQUIRED};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStream, ChatCompletionPort, SpeechRequest, SpeechSynthesisPort,
};
use crate::domain::tone::ToneCatalog;

/// 生成结果
#[derive(Debug)]
pub struct GeneratedVoice {
    /// 大模型回复（被合成的文本）
    pub reply_text: String,
    /// 未缓冲的音频流
    pub audio: AudioStream,
}

/// GenerateVoice Handler
pub struct GenerateVoiceHandler {
    catalog: Arc<ToneCatalog>,
    chat: Arc<dyn ChatCompletionPort>,
    tts: Arc<dyn SpeechSynthesisPort>,
}

impl GenerateVoiceHandler {
    pub fn new(
        catalog: Arc<ToneCatalog>,
        chat: Arc<dyn ChatCompletionPort>,
        tts: Arc<dyn SpeechSynthesisPort>,
    ) -> Self {
        Self { catalog, chat, tts }
    }

    pub async fn handle(&self, command: GenerateVoice) -> Result<GeneratedVoice, ApplicationError> {
        // 1. 输入校验，失败时不触发任何外部调用
        // 空白判断基于 trim 后的文本，转发给大模型的仍是原文
        let text = command
            .user_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApplicationError::validation(TEXT_REQUIRED))?;

        let tone = command.voice_type.as_deref().unwrap_or_default();
        let voice_id = self
            .catalog
            .resolve(tone)
            .cloned()
            .ok_or_else(|| ApplicationError::validation(INVALID_VOICE_TYPE))?;

        tracing::debug!(
            tone = %tone,
            voice_id = %voice_id,
            text_len = text.len(),
            "Generating voice"
        );

        // 2. 对话补全
        let reply_text = self.chat.complete(text).await.map_err(|e| {
            tracing::error!(error = %e, "Chat completion failed");
            ApplicationError::from(e)
        })?;

        // 3. 语音合成（仅建立流，不读取音频）
        let audio = self
            .tts
            .synthesize(SpeechRequest {
                text: reply_text.clone(),
                voice_id: voice_id.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice_id = %voice_id, "Speech synthesis failed");
                ApplicationError::from(e)
            })?;

        tracing::info!(
            tone = %tone,
            reply_len = reply_text.len(),
            content_type = %audio.content_type,
            "Voice stream ready"
        );

        Ok(GeneratedVoice { reply_text, audio })
    }
}
