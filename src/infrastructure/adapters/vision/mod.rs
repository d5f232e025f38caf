//! Vision Adapter - 多模态 chat completion 客户端

mod groq_vision_client;

pub use groq_vision_client::{GroqVisionClient, GroqVisionClientConfig};
