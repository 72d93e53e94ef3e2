//! EchoMind - 语音回复中继服务

use std::sync::Arc;

use echomind::config::{load_config, print_config, AppConfig};
use echomind::domain::ToneCatalog;
use echomind::infrastructure::adapters::{
    ElevenLabsTtsClient, ElevenLabsTtsClientConfig, GroqChatClient, GroqChatClientConfig,
};
use echomind::infrastructure::http::{AppState, HttpServer, ServerConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},echomind={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("EchoMind - voice reply relay");
    print_config(&config);

    // 语气目录只加载一次
    let catalog = Arc::new(ToneCatalog::load(config.tones.catalog_path.as_deref())?);
    tracing::info!(tones = catalog.len(), "Tone catalog ready");

    // 对话补全客户端
    let chat_config = GroqChatClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        system_prompt: config.llm.system_prompt.clone(),
        max_tokens: config.llm.max_tokens,
        timeout_secs: config.llm.timeout_secs,
    };
    let chat = Arc::new(GroqChatClient::new(chat_config)?);

    // 流式 TTS 客户端
    let tts_config = ElevenLabsTtsClientConfig {
        base_url: config.tts.base_url.clone(),
        api_key: config.tts.api_key.clone(),
        model_id: config.tts.model_id.clone(),
        output_format: config.tts.output_format.clone(),
        connect_timeout_secs: config.tts.connect_timeout_secs,
    };
    let tts = Arc::new(ElevenLabsTtsClient::new(tts_config)?);

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes)
        .with_static_dir(config.server.static_dir());
    let state = AppState::new(catalog, chat, tts);

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
