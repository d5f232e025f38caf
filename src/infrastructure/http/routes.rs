//! HTTP Routes
//!
//! API Endpoints:
//! - /                         GET   单页表单
//! - /api/ping                 GET   健康检查
//! - /api/consult              POST  提交问诊（multipart: audio, image）
//! - /api/audio/{file_name}    GET   下载回答音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/consult", post(handlers::consult))
        .route("/audio/:file_name", get(handlers::download_audio))
}
