//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// API Key 的回退环境变量
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("{0} is missing! Please check your .env file.")]
    MissingCredential(&'static str),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `DOCVOX_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// API Key 未在上述来源中配置时，读取 `GROQ_API_KEY`。
///
/// # 环境变量示例
/// - `DOCVOX_SERVER__PORT=8080`
/// - `DOCVOX_TTS__PROVIDER=http`
/// - `DOCVOX_STORAGE__OUTPUT_MODE=fixed`
/// - `GROQ_API_KEY=gsk_...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值由 serde default 提供；配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 2. 环境变量（最高优先级）
    // 例如: DOCVOX_GROQ__BASE_URL=http://localhost:8080/v1
    builder = builder.add_source(
        Environment::with_prefix("DOCVOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    resolve_api_key(&mut app_config, std::env::var(API_KEY_ENV).ok());
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 配置中没有 API Key 时使用环境变量的值
fn resolve_api_key(config: &mut AppConfig, env_value: Option<String>) {
    let configured = config
        .groq
        .api_key
        .as_deref()
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    if !configured {
        config.groq.api_key = env_value.filter(|k| !k.trim().is_empty());
    }
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.groq.api_key.is_none() {
        return Err(ConfigError::MissingCredential(API_KEY_ENV));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.groq.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Groq base URL cannot be empty".to_string(),
        ));
    }

    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.storage.output_file_name.is_empty()
        || config.storage.output_file_name.contains(['/', '\\'])
    {
        return Err(ConfigError::ValidationError(format!(
            "Invalid output file name: {:?}",
            config.storage.output_file_name
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Groq URL: {}", config.groq.base_url);
    tracing::info!("Groq Timeout: {}s", config.groq.timeout_secs);
    tracing::info!("Vision Model: {}", config.models.vision);
    tracing::info!("Transcription Model: {}", config.models.transcription);
    tracing::info!("TTS Provider: {:?} ({})", config.tts.provider, config.tts.url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Output Directory: {:?}", config.storage.output_dir);
    tracing::info!("Output Mode: {:?}", config.storage.output_mode);
    tracing::info!(
        "Output Retention: {}s / {} files",
        config.storage.retention_max_age_secs,
        config.storage.retention_max_files
    );
    tracing::info!("Upload Directory: {:?}", config.storage.upload_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use std::io::Write;

    fn config_with_key() -> AppConfig {
        let mut config = AppConfig::default();
        config.groq.api_key = Some("gsk_test".to_string());
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&config_with_key()).is_ok());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let config = AppConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingCredential("GROQ_API_KEY"))
        ));
    }

    #[test]
    fn test_env_key_used_when_not_configured() {
        let mut config = AppConfig::default();
        resolve_api_key(&mut config, Some("gsk_env".to_string()));
        assert_eq!(config.api_key(), "gsk_env");
    }

    #[test]
    fn test_configured_key_wins_over_env() {
        let mut config = config_with_key();
        resolve_api_key(&mut config, Some("gsk_env".to_string()));
        assert_eq!(config.api_key(), "gsk_test");
    }

    #[test]
    fn test_blank_env_key_is_missing() {
        let mut config = AppConfig::default();
        resolve_api_key(&mut config, Some("   ".to_string()));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = config_with_key();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_output_name_with_separator() {
        let mut config = config_with_key();
        config.storage.output_file_name = "../out.mp3".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[groq]
api_key = "gsk_file"

[server]
port = 9000

[storage]
output_mode = "fixed"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.api_key(), "gsk_file");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.output_mode, OutputMode::Fixed);
        assert_eq!(config.models.vision, "meta-llama/llama-4-scout-17b-16e-instruct");
    }
}
