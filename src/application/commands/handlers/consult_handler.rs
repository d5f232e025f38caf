//! Consult Command Handler
//!
//! 问诊流水线编排：转写 → 编码 + 推理 → 合成语音
//!
//! 每个阶段返回 `Result<_, PipelineError>`，`run` 用 `?` 串联，
//! `handle` 将结果匹配为三元输出，不会向调用方抛出错误。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::Consult;
use crate::application::error::PipelineError;
use crate::application::ports::{
    AudioOutputPort, ImageLoaderPort, SpeechSynthesizerPort, TranscriberPort,
    TranscriptionRequest, VisionModelPort, VisionRequest,
};
use crate::domain::consultation::{
    ConsultationOutcome, PromptMessage, NO_AUDIO_PLACEHOLDER, NO_IMAGE_PLACEHOLDER,
};

/// 默认视觉语言模型
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// 默认语音识别模型
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// 编排配置
#[derive(Debug, Clone)]
pub struct ConsultConfig {
    pub transcription_model: String,
    pub vision_model: String,
}

impl Default for ConsultConfig {
    fn default() -> Self {
        Self {
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}

/// Consult Handler
pub struct ConsultHandler {
    transcriber: Arc<dyn TranscriberPort>,
    image_loader: Arc<dyn ImageLoaderPort>,
    vision_model: Arc<dyn VisionModelPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    audio_output: Arc<dyn AudioOutputPort>,
    config: ConsultConfig,
}

impl ConsultHandler {
    pub fn new(
        transcriber: Arc<dyn TranscriberPort>,
        image_loader: Arc<dyn ImageLoaderPort>,
        vision_model: Arc<dyn VisionModelPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        audio_output: Arc<dyn AudioOutputPort>,
        config: ConsultConfig,
    ) -> Self {
        Self {
            transcriber,
            image_loader,
            vision_model,
            synthesizer,
            audio_output,
            config,
        }
    }

    pub async fn handle(&self, command: Consult) -> ConsultationOutcome {
        let request_id = command.request_id;

        tracing::info!(
            request_id = %request_id,
            has_audio = command.audio_path.is_some(),
            has_image = command.image_path.is_some(),
            "Processing input"
        );

        match self.run(command).await {
            Ok(outcome) => {
                tracing::info!(request_id = %request_id, "Processing completed successfully");
                outcome
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    stage = e.stage(),
                    kind = ?e.kind(),
                    error = %e,
                    "Consultation failed"
                );
                ConsultationOutcome::failed(e)
            }
        }
    }

    async fn run(&self, command: Consult) -> Result<ConsultationOutcome, PipelineError> {
        let question = match &command.audio_path {
            Some(path) => self.transcribe(path).await?,
            None => NO_AUDIO_PLACEHOLDER.to_string(),
        };

        let answer = match &command.image_path {
            Some(path) => self.analyze(&question, path).await?,
            None => NO_IMAGE_PLACEHOLDER.to_string(),
        };

        // 清理失败不影响本次请求
        match self.audio_output.prune().await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "Removed expired response audio"),
            Err(e) => tracing::warn!(error = %e, "Failed to prune response audio"),
        }

        let output_path = self.audio_output.allocate_path(command.request_id);
        let audio_path = self.synthesize_to(&answer, output_path).await?;

        Ok(ConsultationOutcome::completed(question, answer, audio_path))
    }

    /// 转写录音
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String, PipelineError> {
        tracing::info!(path = %audio_path.display(), "Transcribing audio");

        let request = TranscriptionRequest {
            audio_path: audio_path.to_path_buf(),
            model: self.config.transcription_model.clone(),
        };

        Ok(self.transcriber.transcribe(request).await?)
    }

    /// 编码图片并交给视觉模型分析
    pub async fn analyze(&self, query: &str, image_path: &Path) -> Result<String, PipelineError> {
        tracing::info!(path = %image_path.display(), "Encoding image");
        let image = self.image_loader.load(image_path).await?;

        tracing::info!(
            model = %self.config.vision_model,
            image_size = image.len(),
            "Analyzing image"
        );

        let request = VisionRequest {
            prompt: PromptMessage::with_system_prompt(query),
            image,
            model: self.config.vision_model.clone(),
        };

        Ok(self.vision_model.infer(request).await?)
    }

    /// 合成语音并写入目标路径（覆盖）
    pub async fn synthesize_to(&self, text: &str, path: PathBuf) -> Result<PathBuf, PipelineError> {
        tracing::info!(path = %path.display(), text_len = text.len(), "Converting text to speech");

        let speech = self.synthesizer.synthesize(text).await?;
        self.audio_output.write(&path, &speech.audio_data).await?;

        Ok(path)
    }
}
