//! Consultation Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("image is empty")]
    EmptyImage,

    #[error("invalid base64 payload: {0}")]
    InvalidEncoding(String),
}
