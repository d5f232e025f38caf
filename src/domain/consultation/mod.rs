//! Consultation Context - 问诊限界上下文
//!
//! 职责:
//! - 图片编码（data URI）
//! - 提示词与占位文本
//! - 问诊三元输出

mod errors;
mod outcome;
pub mod prompt;
mod value_objects;

pub use errors::ConsultationError;
pub use outcome::ConsultationOutcome;
pub use prompt::{
    PromptMessage, ERROR_QUESTION, NO_AUDIO_PLACEHOLDER, NO_IMAGE_PLACEHOLDER, SYSTEM_PROMPT,
};
pub use value_objects::{EncodedImage, ImageMime};
