//! Transcription Adapter - 语音识别客户端

mod groq_whisper_client;

pub use groq_whisper_client::{GroqWhisperClient, GroqWhisperClientConfig};
