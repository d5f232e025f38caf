//! Docvox - AI Doctor with Vision and Voice
//!
//! 流水线: 录音 → 转写 → 图片 + 问题 → 视觉模型 → 语音合成

use std::sync::Arc;
use std::time::Duration;

use docvox::application::{ConsultConfig, ConsultHandler, SpeechSynthesizerPort};
use docvox::config::{load_config, print_config, AppConfig, OutputMode, TtsProvider};
use docvox::infrastructure::adapters::{
    FileAudioOutput, FileImageLoader, GoogleTtsClient, GoogleTtsClientConfig, GroqVisionClient,
    GroqVisionClientConfig, GroqWhisperClient, GroqWhisperClientConfig, HttpTtsClient,
    HttpTtsClientConfig, OutputNaming, RetentionPolicy, UploadStaging,
};
use docvox::infrastructure::telemetry::init_tracing;
use docvox::infrastructure::{AppState, HttpServer, ServerConfig};

fn build_synthesizer(config: &AppConfig) -> anyhow::Result<Arc<dyn SpeechSynthesizerPort>> {
    let synthesizer: Arc<dyn SpeechSynthesizerPort> = match config.tts.provider {
        TtsProvider::Google => {
            let tts_config = GoogleTtsClientConfig {
                base_url: config.tts.url.clone(),
                lang: config.tts.lang.clone(),
                slow: config.tts.slow,
                timeout_secs: config.tts.timeout_secs,
            };
            Arc::new(GoogleTtsClient::new(tts_config)?)
        }
        TtsProvider::Http => {
            let tts_config = HttpTtsClientConfig {
                base_url: config.tts.url.clone(),
                api_key: config.api_key().to_string(),
                model: config.tts.model.clone(),
                voice: config.tts.voice.clone(),
                timeout_secs: config.tts.timeout_secs,
            };
            Arc::new(HttpTtsClient::new(tts_config)?)
        }
    };

    Ok(synthesizer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 中的 GROQ_API_KEY
    dotenvy::dotenv().ok();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值），缺少 API Key 直接退出
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Docvox - AI Doctor with Vision and Voice");
    print_config(&config);

    tokio::fs::create_dir_all(&config.storage.output_dir).await?;
    tokio::fs::create_dir_all(&config.storage.upload_dir).await?;

    // 外部服务客户端
    let transcriber = Arc::new(GroqWhisperClient::new(GroqWhisperClientConfig {
        base_url: config.groq.base_url.clone(),
        api_key: config.api_key().to_string(),
        timeout_secs: config.groq.timeout_secs,
        language: config.groq.language.clone(),
    })?);
    let vision_model = Arc::new(GroqVisionClient::new(
        GroqVisionClientConfig::new(&config.groq.base_url, config.api_key())
            .with_timeout(config.groq.timeout_secs),
    )?);
    let synthesizer = build_synthesizer(&config)?;

    if !synthesizer.health_check().await {
        tracing::warn!(url = %config.tts.url, "TTS service health check failed");
    }

    // 音频输出
    let naming = match config.storage.output_mode {
        OutputMode::PerRequest => OutputNaming::PerRequest,
        OutputMode::Fixed => OutputNaming::Fixed(config.storage.output_file_name.clone()),
    };
    let retention = RetentionPolicy {
        max_age: Some(config.storage.retention_max_age_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        max_files: Some(config.storage.retention_max_files).filter(|n| *n > 0),
    };
    let audio_output = Arc::new(
        FileAudioOutput::new(&config.storage.output_dir, naming).with_retention(retention),
    );

    let consult_handler = ConsultHandler::new(
        transcriber,
        Arc::new(FileImageLoader::new()),
        vision_model,
        synthesizer,
        audio_output.clone(),
        ConsultConfig {
            transcription_model: config.models.transcription.clone(),
            vision_model: config.models.vision.clone(),
        },
    );

    let state = AppState::new(
        consult_handler,
        audio_output,
        UploadStaging::new(&config.storage.upload_dir),
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.storage.max_upload_size as usize);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
