//! Google TTS Client - 调用 Google Translate 的 translate_tts 接口
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! GET {base_url}/translate_tts?ie=UTF-8&q=...&tl=en&total=N&idx=i&textlen=L&client=tw-ob&ttsspeed=1
//! Response: audio/mpeg binary
//!
//! 接口单次最多接受 100 个字符，长文本按空白切分后逐段请求，MP3 帧直接拼接

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::silence::silent_mp3;
use crate::application::ports::{SpeechError, SpeechSynthesizerPort, SynthesizedSpeech};

/// translate_tts 单次请求的最大字符数
pub const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 语言
    pub lang: String,
    /// 慢速朗读
    pub slow: bool,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".to_string(),
            lang: "en".to_string(),
            slow: false,
            timeout_secs: 60,
        }
    }
}

impl GoogleTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// 按空白把文本切成不超过 `max_chars` 个字符的片段
///
/// 单个超长词按字符硬切
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
}

impl GoogleTtsClient {
    pub fn new(config: GoogleTtsClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let speed = if self.config.slow { "0.24" } else { "1" };
        let total_str = total.to_string();
        let idx_str = idx.to_string();
        let len_str = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.config.lang.as_str()),
                ("total", total_str.as_str()),
                ("idx", idx_str.as_str()),
                ("textlen", len_str.as_str()),
                ("client", "tw-ob"),
                ("ttsspeed", speed),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(format!(
                "Empty audio for chunk {}",
                idx
            )));
        }

        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GoogleTtsClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedSpeech, SpeechError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            tracing::debug!("Empty text, returning silent clip");
            return Ok(SynthesizedSpeech {
                audio_data: silent_mp3(),
                request_count: 0,
            });
        }

        let total = chunks.len();
        let mut audio_data = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            tracing::debug!(idx, total, chunk_len = chunk.len(), "Requesting TTS chunk");
            audio_data.extend(self.fetch_chunk(chunk, idx, total).await?);
        }

        tracing::info!(
            chunks = total,
            audio_size = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedSpeech {
            audio_data,
            request_count: total,
        })
    }

    async fn health_check(&self) -> bool {
        self.fetch_chunk("ok", 0, 1).await.is_ok()
    }
}
