use crate::checkpoint::error::{CheckpointError, CheckpointResult};
use crate::checkpoint::value::Value;
use crate::checkpoint::{COMPRESSED_EXTENSION, DEFAULT_MAX_PAYLOAD_SIZE, GZIP_MAGIC};

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use serde_pickle::DeOptions;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 配置中的压缩模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// 根据扩展名或 gzip 魔数判断
    #[default]
    Auto,
    Gzip,
    #[serde(rename = "none", alias = "plain")]
    Plain,
}

/// 实际使用的压缩方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Plain,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::Gzip => write!(f, "gzip"),
            Compression::Plain => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub compression: CompressionMode,
    pub decode_strings: bool,
    pub replace_unresolved_globals: bool,
    pub max_payload_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Auto,
            decode_strings: true,
            replace_unresolved_globals: true,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

impl DecodeOptions {
    fn pickle_options(&self) -> DeOptions {
        let mut options = DeOptions::new().replace_recursive_structures();
        if self.decode_strings {
            options = options.decode_strings();
        }
        if self.replace_unresolved_globals {
            options = options.replace_unresolved_globals();
        }
        options
    }
}

/// 一次加载的结果，渲染完即丢弃
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub path: PathBuf,
    pub compression: Compression,
    /// pickle 流之前的一行 JSON 版本信息
    pub metadata: Option<Value>,
    pub root: Value,
    /// 解压后的字节数
    pub payload_len: usize,
}

/// 负责检查点文件的读取、解压和反序列化
pub struct CheckpointLoader {
    options: DecodeOptions,
}

impl CheckpointLoader {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> CheckpointResult<Checkpoint> {
        let path = path.as_ref();
        debug!("loading checkpoint: {}", path.display());

        // 只读打开，句柄在离开作用域时释放
        let file = File::open(path).map_err(|e| CheckpointError::io(path, e))?;
        let mut reader = BufReader::new(file);

        let compression = self.detect_compression(path, &mut reader)?;
        debug!("compression: {}", compression);

        let payload = match compression {
            Compression::Gzip => self.read_payload(GzDecoder::new(reader), path, compression)?,
            Compression::Plain => self.read_payload(reader, path, compression)?,
        };
        if payload.is_empty() {
            return Err(CheckpointError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!("payload size: {} bytes", payload.len());

        let (metadata, pickle) = split_metadata(&payload);
        if let Some(meta) = &metadata {
            debug!("found metadata header: {}", meta);
        }

        let raw = serde_pickle::value_from_slice(pickle, self.options.pickle_options())
            .map_err(|e| {
                let version = metadata.as_ref().and_then(writer_version);
                if let Some(v) = &version {
                    warn!("{} was written by version {}", path.display(), v);
                }
                CheckpointError::decode(path, version, e)
            })?;
        let root = Value::from(raw);
        debug!("decoded {} nodes", root.node_count());

        Ok(Checkpoint {
            path: path.to_path_buf(),
            compression,
            metadata: metadata.map(Value::from),
            root,
            payload_len: payload.len(),
        })
    }

    fn detect_compression<R: BufRead>(
        &self,
        path: &Path,
        reader: &mut R,
    ) -> CheckpointResult<Compression> {
        // 只查看缓冲区，不消费字节
        let head = reader.fill_buf().map_err(|e| CheckpointError::io(path, e))?;
        if head.is_empty() {
            return Err(CheckpointError::Empty {
                path: path.to_path_buf(),
            });
        }

        let compression = match self.options.compression {
            CompressionMode::Gzip => Compression::Gzip,
            CompressionMode::Plain => Compression::Plain,
            CompressionMode::Auto => {
                if has_compressed_extension(path) || head.starts_with(&GZIP_MAGIC) {
                    Compression::Gzip
                } else {
                    Compression::Plain
                }
            }
        };

        if self.options.compression == CompressionMode::Auto
            && has_compressed_extension(path)
            && !head.starts_with(&GZIP_MAGIC)
        {
            warn!(
                "{} has a .{} extension but no gzip header",
                path.display(),
                COMPRESSED_EXTENSION
            );
        }

        Ok(compression)
    }

    fn read_payload<R: Read>(
        &self,
        reader: R,
        path: &Path,
        compression: Compression,
    ) -> CheckpointResult<Vec<u8>> {
        let max = self.options.max_payload_size;
        let limit = (max as u64).saturating_add(1);

        let mut payload = Vec::new();
        reader
            .take(limit)
            .read_to_end(&mut payload)
            .map_err(|e| match compression {
                Compression::Gzip => CheckpointError::decompress(path, e),
                Compression::Plain => CheckpointError::io(path, e),
            })?;

        if payload.len() > max {
            return Err(CheckpointError::PayloadTooLarge {
                size: payload.len(),
                max,
            });
        }

        Ok(payload)
    }
}

/// 使用默认选项加载检查点
pub fn load_checkpoint(path: impl AsRef<Path>) -> CheckpointResult<Checkpoint> {
    CheckpointLoader::new(DecodeOptions::default()).load(path)
}

fn has_compressed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(COMPRESSED_EXTENSION))
}

/// 元数据中的 `version` 字段
fn writer_version(meta: &serde_json::Value) -> Option<String> {
    match meta.get("version")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 拆分可选的版本信息行
///
/// 第一行能解析为 JSON 对象时视为元数据，其余字节才是 pickle 流。
/// pickle 的任何协议都不会以 `{` 开头，所以只检查这一种情况。
pub fn split_metadata(payload: &[u8]) -> (Option<serde_json::Value>, &[u8]) {
    if payload.first() != Some(&b'{') {
        return (None, payload);
    }

    let Some(newline) = payload.iter().position(|&b| b == b'\n') else {
        return (None, payload);
    };

    match serde_json::from_slice::<serde_json::Value>(&payload[..newline]) {
        Ok(meta @ serde_json::Value::Object(_)) => (Some(meta), &payload[newline + 1..]),
        Ok(_) | Err(_) => {
            warn!("first line looks like metadata but is not a JSON object, ignoring");
            (None, payload)
        }
    }
}
