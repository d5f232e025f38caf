//! Consult HTTP Handler
//!
//! POST /api/consult (multipart: audio, image 均可选)

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::Consult;
use crate::infrastructure::http::dto::{ApiResponse, ConsultResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const AUDIO_EXTS: &[&str] = &["wav", "mp3", "m4a", "mp4", "ogg", "webm", "flac"];
const IMAGE_EXTS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic", "heif", "avif",
];

/// 已暂存的上传文件
#[derive(Debug, Default)]
struct StagedInputs {
    audio: Option<PathBuf>,
    image: Option<PathBuf>,
}

impl StagedInputs {
    fn paths(&self) -> Vec<PathBuf> {
        self.audio.iter().chain(self.image.iter()).cloned().collect()
    }
}

/// 根据文件名扩展名或 Content-Type 推断扩展名
fn field_extension(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    let from_name = file_name
        .and_then(|f| Path::new(f).extension())
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    from_name.or_else(|| {
        let ext = match content_type?.split(';').next()?.trim() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mpeg" => "mp3",
            "audio/mp4" => "m4a",
            "audio/ogg" => "ogg",
            "audio/webm" => "webm",
            "audio/flac" => "flac",
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => return None,
        };
        Some(ext.to_string())
    })
}

fn audio_extension(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    field_extension(file_name, content_type).filter(|e| AUDIO_EXTS.contains(&e.as_str()))
}

/// 图片不按扩展名白名单拒绝：任何 `image/*` 都交给后续的文件头识别
fn image_extension(file_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    if let Some(ext) =
        field_extension(file_name, content_type).filter(|e| IMAGE_EXTS.contains(&e.as_str()))
    {
        return Some(ext);
    }

    let subtype = content_type?.split(';').next()?.trim().strip_prefix("image/")?;
    let ext: String = subtype
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    Some(if ext.is_empty() { "img".to_string() } else { ext })
}

async fn stage_field(
    state: &AppState,
    request_id: Uuid,
    field: Field<'_>,
    kind: &'static str,
    extension: fn(Option<&str>, Option<&str>) -> Option<String>,
    allowed: &[&str],
) -> Result<Option<PathBuf>, ApiError> {
    let ext = extension(field.file_name(), field.content_type());

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", kind, e)))?;

    // 浏览器在未选择文件时也会提交一个空的 part
    if data.is_empty() {
        return Ok(None);
    }

    let ext = ext.ok_or_else(|| {
        ApiError::BadRequest(format!(
            "Unsupported {} format, allowed: {}",
            kind,
            allowed.join(", ")
        ))
    })?;

    let path = state
        .uploads
        .stage(request_id, kind, &ext, &data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to stage {}: {}", kind, e)))?;

    Ok(Some(path))
}

async fn collect_inputs(
    state: &AppState,
    request_id: Uuid,
    multipart: &mut Multipart,
    staged: &mut StagedInputs,
) -> Result<(), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        // 同名字段只取第一个
        match field_name.as_str() {
            "audio" if staged.audio.is_none() => {
                staged.audio =
                    stage_field(state, request_id, field, "audio", audio_extension, AUDIO_EXTS)
                        .await?;
            }
            "image" if staged.image.is_none() => {
                staged.image =
                    stage_field(state, request_id, field, "image", image_extension, IMAGE_EXTS)
                        .await?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// 提交问诊
pub async fn consult(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ConsultResponse>>, ApiError> {
    let request_id = Uuid::new_v4();
    let mut staged = StagedInputs::default();

    if let Err(e) = collect_inputs(&state, request_id, &mut multipart, &mut staged).await {
        state.uploads.cleanup(&staged.paths()).await;
        return Err(e);
    }

    let staged_paths = staged.paths();
    let command = Consult {
        request_id,
        audio_path: staged.audio,
        image_path: staged.image,
    };

    let outcome = state.consult_handler.handle(command).await;
    state.uploads.cleanup(&staged_paths).await;

    tracing::info!(
        request_id = %request_id,
        failed = outcome.is_failure(),
        "Consultation served"
    );

    Ok(Json(ApiResponse::success(ConsultResponse::from_outcome(
        request_id.to_string(),
        outcome,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extension_prefers_file_name() {
        assert_eq!(
            field_extension(Some("Scan.PNG"), Some("image/jpeg")).as_deref(),
            Some("png")
        );
    }

    #[test]
    fn test_field_extension_from_content_type() {
        assert_eq!(
            field_extension(Some("blob"), Some("audio/webm;codecs=opus")).as_deref(),
            Some("webm")
        );
        assert_eq!(field_extension(None, Some("text/plain")), None);
    }

    #[test]
    fn test_image_extension_accepts_any_image_type() {
        assert_eq!(
            image_extension(Some("rash.heic"), None).as_deref(),
            Some("heic")
        );
        assert_eq!(
            image_extension(Some("blob"), Some("image/x-portable-pixmap")).as_deref(),
            Some("xportablepixmap")
        );
        assert_eq!(image_extension(Some("notes.txt"), Some("text/plain")), None);
    }

    #[test]
    fn test_audio_extension_rejects_unknown_format() {
        assert_eq!(audio_extension(Some("q.webm"), None).as_deref(), Some("webm"));
        assert_eq!(audio_extension(Some("q.txt"), Some("text/plain")), None);
    }
}
