//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod image;
pub mod storage;
pub mod transcription;
pub mod tts;
pub mod vision;

#[cfg(test)]
pub(crate) mod test_support;

pub use image::*;
pub use storage::*;
pub use transcription::*;
pub use tts::*;
pub use vision::*;
