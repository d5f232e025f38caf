//! Index Handler
//!
//! 内嵌的单页表单：录音 + 上传图片，展示问题、回答与回答音频

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../../web/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
