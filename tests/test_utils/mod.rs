/*!
 * 测试辅助模块
 *
 * 生成 pickle 负载、gzip 压缩并写入临时目录。
 */

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
