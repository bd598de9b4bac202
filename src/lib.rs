//! ckpt-inspect
//!
//! 读取工作流引擎写出的检查点文件，解压、反序列化后以缩进文本输出。
//! 主要模块：
//! - checkpoint：文件读取、解压和 pickle 解码
//! - render：递归渲染为可读文本
//! - config：可选的 TOML 配置
//! - utils：错误类型和日志

// 模块声明
pub mod checkpoint; // 检查点解码模块
pub mod config; // 配置系统模块
pub mod render; // 文本渲染模块
pub mod utils; // 工具和错误处理模块

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

pub use checkpoint::{load_checkpoint, Checkpoint, CheckpointError, CheckpointLoader, Value};
pub use config::InspectConfig;
pub use render::{RenderOptions, Renderer};
pub use utils::error::{AppError, AppResult};

/// 加载一个检查点并把渲染结果写到 `out`
///
/// 解码在渲染之前完成，解码失败时不会写出任何内容。
pub fn inspect<W: Write>(path: &Path, config: &InspectConfig, out: &mut W) -> AppResult<()> {
    let loader = CheckpointLoader::new(config.decode.clone());
    let checkpoint = loader.load(path)?;
    debug!(
        "rendering {} ({}, {} bytes)",
        checkpoint.path.display(),
        checkpoint.compression,
        checkpoint.payload_len
    );

    let renderer = Renderer::new(config.render.clone());
    renderer
        .write_checkpoint(&checkpoint, out)
        .context("Failed to write rendering")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}
