//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Consultation Context: 语音 + 图片问诊

pub mod consultation;

pub use consultation::{
    ConsultationError, ConsultationOutcome, EncodedImage, ImageMime, PromptMessage,
};
