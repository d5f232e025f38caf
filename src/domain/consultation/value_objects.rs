//! Consultation Context - Value Objects

use base64::{engine::general_purpose, Engine as _};

use super::ConsultationError;

/// 图片 MIME 类型
///
/// 通过文件头魔数识别，无法识别时回退为 JPEG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMime {
    #[default]
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageMime {
    /// 根据文件头识别图片类型
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Self::Png
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Self::Gif
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Self::Webp
        } else {
            Self::Jpeg
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

/// Base64 编码后的图片
///
/// 不变量：`decode()` 必须还原出原始字节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    payload: String,
    mime: ImageMime,
}

impl EncodedImage {
    /// 从原始字节编码（空图片视为无效输入）
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConsultationError> {
        if bytes.is_empty() {
            return Err(ConsultationError::EmptyImage);
        }

        Ok(Self {
            payload: general_purpose::STANDARD.encode(bytes),
            mime: ImageMime::sniff(bytes),
        })
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    /// 渲染为 data URI，嵌入 JSON 请求体
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime.as_mime(), self.payload)
    }

    /// 解码回原始字节
    pub fn decode(&self) -> Result<Vec<u8>, ConsultationError> {
        general_purpose::STANDARD
            .decode(&self.payload)
            .map_err(|e| ConsultationError::InvalidEncoding(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_restores_original_bytes() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1031).collect();
        let encoded = EncodedImage::from_bytes(&bytes).unwrap();
        assert_eq!(encoded.decode().unwrap(), bytes);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            EncodedImage::from_bytes(&[]),
            Err(ConsultationError::EmptyImage)
        ));
    }

    #[test]
    fn test_data_uri_uses_sniffed_mime() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        let encoded = EncodedImage::from_bytes(&png).unwrap();
        assert!(encoded.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_sniff_falls_back_to_jpeg() {
        assert_eq!(ImageMime::sniff(b"not an image"), ImageMime::Jpeg);
        assert_eq!(ImageMime::sniff(b"GIF89a...."), ImageMime::Gif);
        assert_eq!(ImageMime::sniff(b"RIFF\0\0\0\0WEBPVP8 "), ImageMime::Webp);
    }
}
