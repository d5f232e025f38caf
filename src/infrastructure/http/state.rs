//! Application State

use std::sync::Arc;

use crate::application::{AudioOutputPort, ConsultHandler};
use crate::infrastructure::adapters::UploadStaging;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub audio_output: Arc<dyn AudioOutputPort>,
    pub uploads: UploadStaging,

    // ========== Command Handlers ==========
    pub consult_handler: ConsultHandler,
}

impl AppState {
    pub fn new(
        consult_handler: ConsultHandler,
        audio_output: Arc<dyn AudioOutputPort>,
        uploads: UploadStaging,
    ) -> Self {
        Self {
            audio_output,
            uploads,
            consult_handler,
        }
    }
}
