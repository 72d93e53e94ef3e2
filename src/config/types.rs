//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::infrastructure::adapters::{
    DEFAULT_CHAT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_OUTPUT_FORMAT, DEFAULT_SYSTEM_PROMPT,
    DEFAULT_TTS_BASE_URL, DEFAULT_TTS_MODEL,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 对话补全（LLM）配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 语气目录配置
    #[serde(default)]
    pub tones: TonesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// 静态文件服务配置（前端页面）
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 启用时返回静态文件目录
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.static_files
            .enabled
            .then(|| self.static_files.dir.clone())
    }
}

/// 对话补全配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// OpenAI 兼容接口的基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API 密钥
    #[serde(default)]
    pub api_key: String,

    /// 模型名称
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 系统提示词
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// 回复最大 token 数
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    DEFAULT_CHAT_BASE_URL.to_string()
}

fn default_llm_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            system_prompt: default_system_prompt(),
            max_tokens: None,
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// API 密钥
    #[serde(default)]
    pub api_key: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    /// 输出格式
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 连接超时（秒）
    #[serde(default = "default_tts_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_tts_base_url() -> String {
    DEFAULT_TTS_BASE_URL.to_string()
}

fn default_tts_model() -> String {
    DEFAULT_TTS_MODEL.to_string()
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_tts_connect_timeout() -> u64 {
    10
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_tts_base_url(),
            api_key: String::new(),
            model_id: default_tts_model(),
            output_format: default_output_format(),
            connect_timeout_secs: default_tts_connect_timeout(),
        }
    }
}

/// 语气目录配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TonesConfig {
    /// 自定义目录文件（JSON），未设置时使用内置目录
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
