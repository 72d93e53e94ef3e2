//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::GenerateVoice;

/// 生成语音请求
///
/// 字段缺失不在反序列化阶段报错，交由用例校验，保证错误信息一致
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVoiceRequest {
    #[serde(default)]
    pub user_text: Option<String>,
    #[serde(default)]
    pub voice_type: Option<String>,
}

impl From<GenerateVoiceRequest> for GenerateVoice {
    fn from(req: GenerateVoiceRequest) -> Self {
        Self {
            user_text: req.user_text,
            voice_type: req.voice_type,
        }
    }
}

/// 语气列表响应
#[derive(Debug, Serialize)]
pub struct TonesResponse {
    pub tones: Vec<String>,
}

/// 上游健康状态响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chat: bool,
    pub tts: bool,
}
