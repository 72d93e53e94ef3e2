//! EchoMind - 语音回复中继服务
//!
//! 用户文本 → LLM 简短回复 → TTS 音频流 → 调用方
//!
//! 领域层 (domain/):
//! - Tone Context: 语气名称到音色标识的静态映射
//!
//! 应用层 (application/):
//! - Ports: ChatCompletion、SpeechSynthesis
//! - Commands: GenerateVoice
//! - Queries: ListTones
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 前端页面托管
//! - Adapters: Groq 对话补全客户端、ElevenLabs 流式 TTS 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
