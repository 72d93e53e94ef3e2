//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 出站端口定义（ChatCompletion、SpeechSynthesis）
//! - commands: 生成语音命令及处理器
//! - queries: 语气查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::{
    handlers::{GenerateVoiceHandler, GeneratedVoice},
    GenerateVoice, INVALID_VOICE_TYPE, TEXT_REQUIRED,
};

pub use error::ApplicationError;

pub use ports::{
    AudioChunks, AudioStream, ChatCompletionPort, ChatError, SpeechRequest, SpeechSynthesisPort,
    TtsError,
};

pub use queries::{handlers::ListTonesHandler, ListTones};
