/*!
 * 检查点解码模块
 *
 * 读取工作流引擎写出的检查点文件（gzip 压缩的 pickle 流，
 * 可选一行 JSON 版本信息），解码为通用的 `Value` 树。
 */

pub mod error;
pub mod loader;
pub mod value;

// 重新导出核心类型和函数
pub use error::{CheckpointError, CheckpointResult};
pub use loader::{
    load_checkpoint, Checkpoint, CheckpointLoader, Compression, CompressionMode, DecodeOptions,
};
pub use value::{Number, SeqKind, Value};

/// 压缩检查点的文件扩展名
pub const COMPRESSED_EXTENSION: &str = "pklz";

/// gzip 魔数
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// 解压后负载的默认上限
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 256 * 1024 * 1024; // 256MB
