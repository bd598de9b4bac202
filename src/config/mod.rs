/*!
 * 配置系统模块
 *
 * 可选的 TOML 配置文件，提供解码和渲染选项。
 */

pub mod error;
pub mod paths;
pub mod reader;
pub mod types;

pub use error::{ConfigError, ConfigResult};
pub use paths::ConfigPaths;
pub use reader::ConfigReader;
pub use types::InspectConfig;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "CKPT_INSPECT_CONFIG";

/// 用户配置目录下的应用目录名
pub const APP_DIR_NAME: &str = "ckpt-inspect";

/// 配置文件名称
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// 按默认路径解析并加载配置
pub fn load_config() -> ConfigResult<InspectConfig> {
    ConfigReader::new(ConfigPaths::resolve()).load_config()
}
