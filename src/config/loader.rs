//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`ECHOMIND_` 前缀）
//! 2. 配置文件（config.toml）
//! 3. 兼容旧部署的环境变量（`GROQ_API_KEY`、`ELEVENLABS_API_KEY`、`PORT`）
//! 4. 默认值

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 无前缀的兼容环境变量 → 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("GROQ_API_KEY", "llm.api_key"),
    ("ELEVENLABS_API_KEY", "tts.api_key"),
    ("PORT", "server.port"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `ECHOMIND_SERVER__PORT=8080`
/// - `ECHOMIND_LLM__API_KEY=gsk_...`
/// - `ECHOMIND_TTS__API_KEY=sk_...`
/// - `ECHOMIND_TONES__CATALOG_PATH=/etc/echomind/voices.json`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("llm.timeout_secs", 30)?
        .set_default("tts.connect_timeout_secs", 10)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 兼容旧部署的环境变量，仍低于配置文件
    builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;

    // 3. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 4. 环境变量（最高优先级）
    // 例如: ECHOMIND_LLM__API_KEY=...
    builder = builder.add_source(
        Environment::with_prefix("ECHOMIND")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 将兼容环境变量写入默认层
fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (env_key, config_key) in LEGACY_ENV_KEYS {
        let Some(value) = lookup(env_key).filter(|v| !v.trim().is_empty()) else {
            continue;
        };

        builder = if *config_key == "server.port" {
            let port: u16 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::ParseError(format!("Invalid {}: {}", env_key, value)))?;
            builder.set_default(*config_key, i64::from(port))?
        } else {
            builder.set_default(*config_key, value)?
        };
    }
    Ok(builder)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.llm.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    // 缺少任一密钥时拒绝启动
    if config.llm.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM API key is missing (set ECHOMIND_LLM__API_KEY or GROQ_API_KEY)".to_string(),
        ));
    }

    if config.tts.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS API key is missing (set ECHOMIND_TTS__API_KEY or ELEVENLABS_API_KEY)".to_string(),
        ));
    }

    if config.llm.timeout_secs == 0 || config.tts.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Timeouts must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    match config.server.static_dir() {
        Some(dir) => tracing::info!("Static Files: {:?}", dir),
        None => tracing::info!("Static Files: disabled"),
    }
    tracing::info!("LLM URL: {}", config.llm.base_url);
    tracing::info!("LLM Model: {}", config.llm.model);
    tracing::info!("LLM API Key: {}", mask_secret(&config.llm.api_key));
    tracing::info!("TTS URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {} ({})", config.tts.model_id, config.tts.output_format);
    tracing::info!("TTS API Key: {}", mask_secret(&config.tts.api_key));
    match &config.tones.catalog_path {
        Some(path) => tracing::info!("Tone Catalog: {:?}", path),
        None => tracing::info!("Tone Catalog: built-in"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

/// 只保留末尾 4 个字符
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
