//! Storage Adapter - 音频输出与上传暂存

mod file_audio_output;
mod upload_staging;

pub use file_audio_output::{FileAudioOutput, OutputNaming, RetentionPolicy};
pub use upload_staging::UploadStaging;
