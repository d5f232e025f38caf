//! Telemetry - tracing 订阅器初始化

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

/// 默认过滤规则：应用日志使用配置级别，tower_http 为 debug
pub fn default_filter(config: &LogConfig) -> String {
    format!(
        "{},docvox={},tower_http=debug",
        config.level, config.level
    )
}

/// 初始化全局日志；`RUST_LOG` 优先于配置
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    if config.json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}
