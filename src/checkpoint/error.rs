use std::path::PathBuf;

use serde_pickle::Error as PickleError;
use thiserror::Error;

pub type CheckpointResult<T> = Result<T, CheckpointError>;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("I/O error while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decompress {path}: {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Checkpoint payload too large: more than {max} bytes (read {size})")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("Checkpoint file is empty: {path}")]
    Empty { path: PathBuf },
    #[error("Failed to decode checkpoint {path}{}: {source}", written_by(.version))]
    Decode {
        path: PathBuf,
        /// 元数据行中记录的写出版本
        version: Option<String>,
        #[source]
        source: PickleError,
    },
}

impl CheckpointError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckpointError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decompress(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckpointError::Decompress {
            path: path.into(),
            source,
        }
    }

    pub fn decode(
        path: impl Into<PathBuf>,
        version: Option<String>,
        source: PickleError,
    ) -> Self {
        CheckpointError::Decode {
            path: path.into(),
            version,
            source,
        }
    }

    /// I/O 类错误（文件不存在、不可读）与内容类错误（解压、解码）的区分
    pub fn is_io(&self) -> bool {
        matches!(self, CheckpointError::Io { .. })
    }
}

fn written_by(version: &Option<String>) -> String {
    match version {
        Some(v) => format!(" (written by version {})", v),
        None => String::new(),
    }
}
