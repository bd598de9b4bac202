/*!
 * 渲染模块
 *
 * 把解码后的 `Value` 树递归渲染为带缩进的可读文本。
 * 容器能在剩余宽度内放下时写成一行，否则每个元素单独一行。
 */

pub mod repr;

use crate::checkpoint::{Checkpoint, SeqKind, Value};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// 默认缩进宽度
pub const DEFAULT_INDENT: usize = 2;
/// 默认行宽
pub const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub indent: usize,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            width: DEFAULT_WIDTH,
        }
    }
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.render_value(value, 0, 0, 0, &mut out);
        out
    }

    pub fn write_value<W: Write>(&self, value: &Value, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(value).as_bytes())?;
        out.write_all(b"\n")
    }

    /// 元数据（如果有）写在第一行，然后是对象树
    pub fn write_checkpoint<W: Write>(&self, checkpoint: &Checkpoint, out: &mut W) -> io::Result<()> {
        if let Some(meta) = &checkpoint.metadata {
            writeln!(out, "# metadata: {}", render_inline(meta))?;
        }
        self.write_value(&checkpoint.root, out)
    }

    /// `column` 是当前行已占用的列数，`trailing` 是值后面还要跟的字符数（逗号）
    fn render_value(
        &self,
        value: &Value,
        depth: usize,
        column: usize,
        trailing: usize,
        out: &mut String,
    ) {
        let budget = self
            .options
            .width
            .saturating_sub(column)
            .saturating_sub(trailing);

        if let Some(inline) = inline_within(value, budget) {
            out.push_str(&inline);
            return;
        }

        match value {
            Value::Seq(kind, items) if !items.is_empty() => {
                self.render_seq(*kind, items, depth, out)
            }
            Value::Map(entries) if !entries.is_empty() => self.render_map(entries, depth, out),
            // 标量和空容器放不下也只能写成一行
            other => out.push_str(&render_inline(other)),
        }
    }

    fn render_seq(&self, kind: SeqKind, items: &[Value], depth: usize, out: &mut String) {
        let (open, close) = delimiters(kind);
        let child_column = (depth + 1) * self.options.indent;
        let last = items.len().saturating_sub(1);

        out.push_str(open);
        out.push('\n');
        for (i, item) in items.iter().enumerate() {
            // 单元素元组保留逗号
            let comma = i < last || (kind == SeqKind::Tuple && items.len() == 1);
            push_indent(out, child_column);
            self.render_value(item, depth + 1, child_column, usize::from(comma), out);
            if comma {
                out.push(',');
            }
            out.push('\n');
        }
        push_indent(out, depth * self.options.indent);
        out.push_str(close);
    }

    fn render_map(&self, entries: &[(Value, Value)], depth: usize, out: &mut String) {
        let child_column = (depth + 1) * self.options.indent;
        let last = entries.len().saturating_sub(1);

        out.push_str("{\n");
        for (i, (key, value)) in entries.iter().enumerate() {
            let comma = i < last;
            push_indent(out, child_column);
            let key = render_inline(key);
            out.push_str(&key);
            out.push_str(": ");
            self.render_value(
                value,
                depth + 1,
                child_column + key.chars().count() + 2,
                usize::from(comma),
                out,
            );
            if comma {
                out.push(',');
            }
            out.push('\n');
        }
        push_indent(out, depth * self.options.indent);
        out.push('}');
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// 不限宽度的单行渲染
pub fn render_inline(value: &Value) -> String {
    let mut buf = String::new();
    write_inline(value, &mut buf, usize::MAX);
    buf
}

/// 单行渲染，超过 `limit` 列时提前放弃
fn inline_within(value: &Value, limit: usize) -> Option<String> {
    let mut buf = String::new();
    write_inline(value, &mut buf, limit).then_some(buf)
}

fn write_inline(value: &Value, buf: &mut String, limit: usize) -> bool {
    match value {
        Value::Null => buf.push_str(repr::repr_none()),
        Value::Bool(b) => buf.push_str(repr::repr_bool(*b)),
        Value::Number(n) => buf.push_str(&repr::repr_number(n)),
        Value::String(s) => buf.push_str(&repr::repr_str(s)),
        Value::Bytes(b) => buf.push_str(&repr::repr_bytes(b)),
        Value::Seq(kind, items) if items.is_empty() => buf.push_str(empty_repr(*kind)),
        Value::Seq(kind, items) => {
            let (open, close) = delimiters(*kind);
            buf.push_str(open);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                if !write_inline(item, buf, limit) {
                    return false;
                }
            }
            if *kind == SeqKind::Tuple && items.len() == 1 {
                buf.push(',');
            }
            buf.push_str(close);
        }
        Value::Map(entries) => {
            buf.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                if !write_inline(key, buf, limit) {
                    return false;
                }
                buf.push_str(": ");
                if !write_inline(value, buf, limit) {
                    return false;
                }
            }
            buf.push('}');
        }
    }
    buf.len() <= limit || buf.chars().count() <= limit
}

fn delimiters(kind: SeqKind) -> (&'static str, &'static str) {
    match kind {
        SeqKind::List => ("[", "]"),
        SeqKind::Tuple => ("(", ")"),
        SeqKind::Set => ("{", "}"),
        SeqKind::FrozenSet => ("frozenset({", "})"),
    }
}

fn empty_repr(kind: SeqKind) -> &'static str {
    match kind {
        SeqKind::List => "[]",
        SeqKind::Tuple => "()",
        SeqKind::Set => "set()",
        SeqKind::FrozenSet => "frozenset()",
    }
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::Map(vec![
            (Value::string("a"), Value::int(1)),
            (
                Value::string("b"),
                Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]),
            ),
        ])
    }

    #[test]
    fn test_inline_when_it_fits() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&sample()), "{'a': 1, 'b': [1, 2, 3]}");
    }

    #[test]
    fn test_breaks_map_when_too_wide() {
        let renderer = Renderer::new(RenderOptions {
            indent: 2,
            width: 20,
        });
        let value = Value::Map(vec![
            (
                Value::string("a"),
                Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]),
            ),
            (Value::string("bb"), Value::string("xyz")),
        ]);
        assert_eq!(
            renderer.render(&value),
            "{\n  'a': [1, 2, 3],\n  'bb': 'xyz'\n}"
        );
    }

    #[test]
    fn test_nested_break_uses_depth_indent() {
        let renderer = Renderer::new(RenderOptions {
            indent: 4,
            width: 12,
        });
        let value = Value::Map(vec![(
            Value::string("key"),
            Value::list(vec![Value::string("alpha"), Value::string("beta")]),
        )]);
        assert_eq!(
            renderer.render(&value),
            "{\n    'key': [\n        'alpha',\n        'beta'\n    ]\n}"
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(render_inline(&Value::list(vec![])), "[]");
        assert_eq!(render_inline(&Value::Seq(SeqKind::Tuple, vec![])), "()");
        assert_eq!(render_inline(&Value::Seq(SeqKind::Set, vec![])), "set()");
        assert_eq!(
            render_inline(&Value::Seq(SeqKind::FrozenSet, vec![])),
            "frozenset()"
        );
        assert_eq!(render_inline(&Value::Map(vec![])), "{}");
    }

    #[test]
    fn test_tuple_and_set_delimiters() {
        let one = Value::Seq(SeqKind::Tuple, vec![Value::int(1)]);
        assert_eq!(render_inline(&one), "(1,)");
        let pair = Value::Seq(SeqKind::Tuple, vec![Value::int(1), Value::Null]);
        assert_eq!(render_inline(&pair), "(1, None)");
        let set = Value::Seq(SeqKind::Set, vec![Value::int(1), Value::int(2)]);
        assert_eq!(render_inline(&set), "{1, 2}");
        let frozen = Value::Seq(SeqKind::FrozenSet, vec![Value::Bool(true)]);
        assert_eq!(render_inline(&frozen), "frozenset({True})");
    }

    #[test]
    fn test_single_tuple_multiline_keeps_comma() {
        let renderer = Renderer::new(RenderOptions {
            indent: 2,
            width: 10,
        });
        let value = Value::Seq(SeqKind::Tuple, vec![Value::string("long string")]);
        assert_eq!(renderer.render(&value), "(\n  'long string',\n)");
    }

    #[test]
    fn test_empty_container_stays_inline_without_room() {
        let renderer = Renderer::new(RenderOptions {
            indent: 2,
            width: 0,
        });
        let value = Value::list(vec![Value::list(vec![Value::list(vec![])])]);
        assert_eq!(renderer.render(&value), "[\n  [\n    []\n  ]\n]");
    }

    #[test]
    fn test_write_value_appends_newline() {
        let mut out = Vec::new();
        Renderer::default().write_value(&sample(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{'a': 1, 'b': [1, 2, 3]}\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = Renderer::new(RenderOptions {
            indent: 1,
            width: 10,
        });
        assert_eq!(renderer.render(&sample()), renderer.render(&sample()));
    }
}
