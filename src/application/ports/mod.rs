//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod chat_completion;
mod speech_synthesis;

pub use chat_completion::{ChatCompletionPort, ChatError};
pub use speech_synthesis::{AudioChunks, AudioStream, SpeechRequest, SpeechSynthesisPort, TtsError};
