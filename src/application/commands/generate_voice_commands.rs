//! Generate Voice Commands

/// 文本缺失时的提示
pub const TEXT_REQUIRED: &str = "Text input is required.";

/// 语气未知时的提示
pub const INVALID_VOICE_TYPE: &str = "Invalid voice type.";

/// 生成语音命令
///
/// 字段保持可选，缺失与空值统一在 handler 中校验
#[derive(Debug, Clone, Default)]
pub struct GenerateVoice {
    pub user_text: Option<String>,
    pub voice_type: Option<String>,
}

impl GenerateVoice {
    pub fn new(user_text: impl Into<String>, voice_type: impl Into<String>) -> Self {
        Self {
            user_text: Some(user_text.into()),
            voice_type: Some(voice_type.into()),
        }
    }
}
