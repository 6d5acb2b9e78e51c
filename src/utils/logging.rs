//! 日志工具模块
//!
//! 提供 tracing 订阅器的初始化

use tracing_subscriber::EnvFilter;

/// 初始化日志输出
///
/// 默认级别 info，可通过 RUST_LOG 环境变量覆盖。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
