//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Groq API 配置（转写 + 视觉推理）
    #[serde(default)]
    pub groq: GroqConfig,

    /// 模型配置
    #[serde(default)]
    pub models: ModelsConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 已校验过的 API Key
    pub fn api_key(&self) -> &str {
        self.groq.api_key.as_deref().unwrap_or_default()
    }
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
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7860
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Groq API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    /// API Key，未配置时读取 `GROQ_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// OpenAI 兼容接口的基础 URL
    #[serde(default = "default_groq_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_groq_timeout")]
    pub timeout_secs: u64,

    /// 转写语言提示
    #[serde(default = "default_language")]
    pub language: Option<String>,
}

fn default_groq_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_timeout() -> u64 {
    120
}

fn default_language() -> Option<String> {
    Some("en".to_string())
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_groq_url(),
            timeout_secs: default_groq_timeout(),
            language: default_language(),
        }
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// 视觉语言模型
    #[serde(default = "default_vision_model")]
    pub vision: String,

    /// 语音识别模型
    #[serde(default = "default_transcription_model")]
    pub transcription: String,
}

fn default_vision_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_transcription_model() -> String {
    "whisper-large-v3".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            vision: default_vision_model(),
            transcription: default_transcription_model(),
        }
    }
}

/// TTS 提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TtsProvider {
    /// Google Translate translate_tts
    #[default]
    Google,
    /// OpenAI 兼容的 /audio/speech
    Http,
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: TtsProvider,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 朗读语言（google）
    #[serde(default = "default_tts_lang")]
    pub lang: String,

    /// 慢速朗读（google）
    #[serde(default)]
    pub slow: bool,

    /// TTS 模型（http）
    #[serde(default = "default_tts_model")]
    pub model: String,

    /// 音色（http）
    #[serde(default = "default_tts_voice")]
    pub voice: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_tts_lang() -> String {
    "en".to_string()
}

fn default_tts_model() -> String {
    "playai-tts".to_string()
}

fn default_tts_voice() -> String {
    "Fritz-PlayAI".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            url: default_tts_url(),
            lang: default_tts_lang(),
            slow: false,
            model: default_tts_model(),
            voice: default_tts_voice(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 输出音频命名方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// 每个请求独立文件
    #[default]
    PerRequest,
    /// 固定文件名，每次覆盖
    Fixed,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 合成音频输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub output_mode: OutputMode,

    /// fixed 模式下的文件名
    #[serde(default = "default_output_file_name")]
    pub output_file_name: String,

    /// per_request 模式下输出文件的最长保留时间（秒），0 表示不按时间清理
    #[serde(default = "default_retention_max_age_secs")]
    pub retention_max_age_secs: u64,

    /// per_request 模式下最多保留的输出文件数，0 表示不限
    #[serde(default = "default_retention_max_files")]
    pub retention_max_files: usize,

    /// 上传暂存目录
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 20MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

fn default_output_file_name() -> String {
    "assistant_response.mp3".to_string()
}

fn default_retention_max_age_secs() -> u64 {
    3600
}

fn default_retention_max_files() -> usize {
    100
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_max_upload_size() -> u64 {
    20 * 1024 * 1024 // 20 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            output_mode: OutputMode::default(),
            output_file_name: default_output_file_name(),
            retention_max_age_secs: default_retention_max_age_secs(),
            retention_max_files: default_retention_max_files(),
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 7860);
        assert_eq!(config.groq.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.models.transcription, "whisper-large-v3");
        assert_eq!(config.tts.provider, TtsProvider::Google);
        assert_eq!(config.storage.output_mode, OutputMode::PerRequest);
        assert_eq!(config.storage.output_file_name, "assistant_response.mp3");
        assert_eq!(config.storage.retention_max_age_secs, 3600);
        assert_eq!(config.storage.retention_max_files, 100);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:7860");
    }
}
