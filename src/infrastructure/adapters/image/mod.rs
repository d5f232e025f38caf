//! Image Adapter - 本地图片读取

mod file_image_loader;

pub use file_image_loader::FileImageLoader;
