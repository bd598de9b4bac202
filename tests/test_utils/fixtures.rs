/*!
 * 测试固定数据和辅助函数
 *
 * 提供标准化的检查点数据：
 * - 简单嵌套映射 {"a": 1, "b": [1, 2, 3]}
 * - 模拟工作流节点输入的映射
 * - 写入 .pklz / .pkl 文件的辅助函数
 */

use flate2::{write::GzEncoder, Compression};
use serde_pickle::{HashableValue, SerOptions, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 版本信息行
pub const METADATA_LINE: &[u8] = b"{\"version\": \"1.5.0\"}\n";

/// Python 2 写出的 SHORT_BINSTRING 'abc'
pub const PY2_STRING_PICKLE: &[u8] = b"\x80\x02U\x03abcq\x00.";

/// 协议 2 写出的 {'in_file': '/x.nii', 'args': _Undefined(), 'b': Bunch(a=1, c=[1, 2])}
///
/// `args` 通过 GLOBAL + REDUCE 构造，`b` 通过 NEWOBJ + BUILD 构造，
/// 两个类都来自解码端无法解析的 `__main__`
pub const OBJECT_PICKLE: &[u8] = b"\x80\x02}(\
X\x07\x00\x00\x00in_file\
X\x06\x00\x00\x00/x.nii\
X\x04\x00\x00\x00args\
c__main__\n_Undefined\n)R\
X\x01\x00\x00\x00b\
c__main__\nBunch\n)\x81\
}(X\x01\x00\x00\x00aK\x01X\x01\x00\x00\x00c](K\x01K\x02eub\
u.";

/// 不是任何合法格式的字节
pub const GARBAGE_BYTES: &[u8] = &[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x02];

fn key(s: &str) -> HashableValue {
    HashableValue::String(s.to_string())
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

/// {"a": 1, "b": [1, 2, 3]}
pub fn simple_mapping() -> Value {
    let mut map = BTreeMap::new();
    map.insert(key("a"), Value::I64(1));
    map.insert(
        key("b"),
        Value::List(vec![Value::I64(1), Value::I64(2), Value::I64(3)]),
    );
    Value::Dict(map)
}

/// 模拟一个节点的输入快照
pub fn node_inputs() -> Value {
    let mut environ = BTreeMap::new();
    environ.insert(key("FSLOUTPUTTYPE"), text("NIFTI_GZ"));

    let mut map = BTreeMap::new();
    map.insert(key("args"), Value::None);
    map.insert(key("dof"), Value::I64(6));
    map.insert(key("environ"), Value::Dict(environ));
    map.insert(key("frac"), Value::F64(0.5));
    map.insert(key("in_file"), text("/data/sub-01/dwi.nii.gz"));
    map.insert(key("mask"), Value::Bool(true));
    map.insert(
        key("searchr_x"),
        Value::List(vec![Value::I64(-4), Value::I64(4)]),
    );
    map.insert(
        key("shape"),
        Value::Tuple(vec![Value::I64(96), Value::I64(96), Value::I64(60)]),
    );
    Value::Dict(map)
}

/// 集合、字节串和嵌套元组
pub fn mixed_containers() -> Value {
    let mut set = BTreeSet::new();
    set.insert(HashableValue::I64(3));
    set.insert(HashableValue::I64(1));
    set.insert(HashableValue::I64(2));

    Value::List(vec![
        Value::Set(set),
        Value::Bytes(b"\x00ab".to_vec()),
        Value::Tuple(vec![Value::Tuple(vec![])]),
        Value::FrozenSet(BTreeSet::new()),
    ])
}

pub fn pickle_bytes(value: &Value) -> Vec<u8> {
    serde_pickle::value_to_vec(value, SerOptions::new()).unwrap()
}

pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// 写入 gzip 压缩的 .pklz 检查点
pub fn write_pklz(dir: &Path, name: &str, value: &Value) -> PathBuf {
    write_file(dir, name, &gzip_bytes(&pickle_bytes(value)))
}

/// 写入带版本信息行的 .pklz 检查点
pub fn write_pklz_with_metadata(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let mut payload = METADATA_LINE.to_vec();
    payload.extend(pickle_bytes(value));
    write_file(dir, name, &gzip_bytes(&payload))
}

/// 写入 gzip 压缩、带版本信息行的原始 pickle 字节
pub fn write_raw_pklz_with_metadata(dir: &Path, name: &str, pickle: &[u8]) -> PathBuf {
    let mut payload = METADATA_LINE.to_vec();
    payload.extend_from_slice(pickle);
    write_file(dir, name, &gzip_bytes(&payload))
}

/// `depth` 层嵌套的空列表 `[[[...]]]`，直接拼接操作码
pub fn nested_list_pickle(depth: usize) -> Vec<u8> {
    let mut bytes = b"\x80\x02".to_vec();
    for _ in 0..depth {
        bytes.extend_from_slice(b"](");
    }
    bytes.push(b']');
    bytes.extend(std::iter::repeat(b'e').take(depth));
    bytes.push(b'.');
    bytes
}
