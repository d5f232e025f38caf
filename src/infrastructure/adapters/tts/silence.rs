//! 静音 MP3 片段，空文本时代替实际合成

/// MPEG-1 Layer III, 128kbps, 44.1kHz, mono, 无 CRC
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];

/// 144 * 128000 / 44100，无 padding
const FRAME_LEN: usize = 417;

/// 每帧约 26ms
const SILENT_FRAMES: usize = 10;

/// 生成一段静音 MP3（side info 与主数据全零）
pub fn silent_mp3() -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_LEN * SILENT_FRAMES);
    for _ in 0..SILENT_FRAMES {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    data
}
