// 日志系统模块

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤级别
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// 初始化日志系统
/// 支持通过 RUST_LOG 环境变量控制日志级别，默认为 warn。
/// 日志只写到 stderr，stdout 留给检查点的渲染输出。
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    debug!("logging initialized");
    Ok(())
}
