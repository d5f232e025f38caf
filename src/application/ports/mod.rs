//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_output;
mod image_loader;
mod speech_synthesizer;
mod transcriber;
mod vision_model;

pub use audio_output::{AudioOutputError, AudioOutputPort};
pub use image_loader::{ImageCodecError, ImageLoaderPort};
pub use speech_synthesizer::{SpeechError, SpeechSynthesizerPort, SynthesizedSpeech};
pub use transcriber::{TranscriberPort, TranscriptionError, TranscriptionRequest};
pub use vision_model::{VisionError, VisionModelPort, VisionRequest};
