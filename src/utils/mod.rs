// 工具模块

pub mod error;
pub mod logging;

pub use error::{describe_error, AppError, AppResult};
pub use logging::init_logging;
