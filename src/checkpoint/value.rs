/*!
 * 检查点解码后的通用数据树
 *
 * 与 serde_pickle 的内部类型解耦：渲染器只认识这里的 `Value`。
 */

use serde_pickle::{HashableValue, Value as PickleValue};

/// 数值
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    /// 超出 i64 范围的整数，保存十进制字符串
    BigInt(String),
    Float(f64),
}

/// 有序序列的种类，决定渲染时使用的括号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Tuple,
    Set,
    FrozenSet,
}

/// 解码后的对象树
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Seq(SeqKind, Vec<Value>),
    /// 保持解码器给出的键顺序
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::Seq(SeqKind::List, items)
    }

    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// 按字符串键查找映射中的值
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                Value::String(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    /// 树中节点总数（含自身）
    pub fn node_count(&self) -> usize {
        match self {
            Value::Seq(_, items) => 1 + items.iter().map(Value::node_count).sum::<usize>(),
            Value::Map(entries) => {
                1 + entries
                    .iter()
                    .map(|(k, v)| k.node_count() + v.node_count())
                    .sum::<usize>()
            }
            _ => 1,
        }
    }
}

impl From<PickleValue> for Value {
    fn from(value: PickleValue) -> Self {
        match value {
            PickleValue::None => Value::Null,
            PickleValue::Bool(b) => Value::Bool(b),
            PickleValue::I64(n) => Value::Number(Number::Int(n)),
            PickleValue::Int(n) => Value::Number(Number::BigInt(n.to_string())),
            PickleValue::F64(f) => Value::Number(Number::Float(f)),
            PickleValue::Bytes(b) => Value::Bytes(b),
            PickleValue::String(s) => Value::String(s),
            PickleValue::List(items) => {
                Value::Seq(SeqKind::List, items.into_iter().map(Value::from).collect())
            }
            PickleValue::Tuple(items) => {
                Value::Seq(SeqKind::Tuple, items.into_iter().map(Value::from).collect())
            }
            PickleValue::Set(items) => {
                Value::Seq(SeqKind::Set, items.into_iter().map(Value::from).collect())
            }
            PickleValue::FrozenSet(items) => Value::Seq(
                SeqKind::FrozenSet,
                items.into_iter().map(Value::from).collect(),
            ),
            PickleValue::Dict(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<HashableValue> for Value {
    fn from(value: HashableValue) -> Self {
        match value {
            HashableValue::None => Value::Null,
            HashableValue::Bool(b) => Value::Bool(b),
            HashableValue::I64(n) => Value::Number(Number::Int(n)),
            HashableValue::Int(n) => Value::Number(Number::BigInt(n.to_string())),
            HashableValue::F64(f) => Value::Number(Number::Float(f)),
            HashableValue::Bytes(b) => Value::Bytes(b),
            HashableValue::String(s) => Value::String(s),
            HashableValue::Tuple(items) => {
                Value::Seq(SeqKind::Tuple, items.into_iter().map(Value::from).collect())
            }
            HashableValue::FrozenSet(items) => Value::Seq(
                SeqKind::FrozenSet,
                items.into_iter().map(Value::from).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Int(i))
                } else if n.is_u64() {
                    Value::Number(Number::BigInt(n.to_string()))
                } else {
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(SeqKind::List, items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
