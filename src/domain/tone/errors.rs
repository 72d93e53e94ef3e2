//! Tone Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("无法读取语气目录 {path}: {message}")]
    Io { path: String, message: String },

    #[error("语气目录格式错误: {0}")]
    InvalidFormat(String),

    #[error("语气目录为空")]
    EmptyCatalog,

    #[error("无效的语气条目 '{tone}': {reason}")]
    InvalidEntry { tone: String, reason: &'static str },
}
