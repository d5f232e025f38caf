//! TTS Adapter - 语音合成客户端实现

mod google_tts_client;
mod http_tts_client;
mod silence;

pub use google_tts_client::{split_text, GoogleTtsClient, GoogleTtsClientConfig};
pub use http_tts_client::{HttpTtsClient, HttpTtsClientConfig};
pub use silence::silent_mp3;
