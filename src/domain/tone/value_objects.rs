//! Tone Context - Value Objects

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// 语气名称（如 formal、sarcastic）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToneName(String);

impl ToneName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("语气名称不能为空");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ToneName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语音合成服务使用的音色标识
///
/// 对本服务不透明，只做非空校验
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("音色标识不能为空");
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_name_rejects_blank() {
        assert!(ToneName::new("").is_err());
        assert!(ToneName::new("   ").is_err());
        assert_eq!(ToneName::new("formal").unwrap().as_str(), "formal");
    }

    #[test]
    fn test_voice_id_rejects_blank() {
        assert!(VoiceId::new("").is_err());
        assert_eq!(VoiceId::new("abc123").unwrap().to_string(), "abc123");
    }
}
