//! Application State
//!
//! 所有请求共享的只读状态

use std::sync::Arc;

use crate::application::{
    ChatCompletionPort, GenerateVoiceHandler, ListTonesHandler, SpeechSynthesisPort,
};
use crate::domain::tone::ToneCatalog;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub chat: Arc<dyn ChatCompletionPort>,
    pub tts: Arc<dyn SpeechSynthesisPort>,

    // ========== Handlers ==========
    pub generate_voice_handler: GenerateVoiceHandler,
    pub list_tones_handler: ListTonesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        catalog: Arc<ToneCatalog>,
        chat: Arc<dyn ChatCompletionPort>,
        tts: Arc<dyn SpeechSynthesisPort>,
    ) -> Self {
        Self {
            chat: chat.clone(),
            tts: tts.clone(),

            generate_voice_handler: GenerateVoiceHandler::new(catalog.clone(), chat, tts),
            list_tones_handler: ListTonesHandler::new(catalog),
        }
    }
}
