/*!
 * 错误处理模块
 *
 * 基于 anyhow 的应用层错误类型，模块内部的结构化错误
 * （checkpoint::error、config::error）通过 `?` 自动转换进来。
 */

use anyhow::Result as AnyhowResult;

/// 统一的应用程序结果类型
pub type AppResult<T> = AnyhowResult<T>;

/// 统一的应用程序错误类型
pub type AppError = anyhow::Error;

/// 把错误链格式化为单行，供命令行输出使用
/// 上层消息里已经包含的 source 不再重复追加
pub fn describe_error(err: &AppError) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
