/*!
 * 配置文件路径解析
 *
 * 优先使用环境变量指定的路径，否则落到用户配置目录下。
 */

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// 无法确定用户目录时为 None
    config_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// 根据环境变量和当前平台确定配置文件位置
    pub fn resolve() -> Self {
        Self::from_env_value(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }

    /// 使用指定的配置文件路径（主要用于测试）
    pub fn with_config_file<P: AsRef<Path>>(config_file: P) -> Self {
        Self {
            config_file: Some(config_file.as_ref().to_path_buf()),
        }
    }

    fn from_env_value(value: Option<PathBuf>) -> Self {
        if let Some(path) = value.filter(|p| !p.as_os_str().is_empty()) {
            debug!("config path from {}: {}", CONFIG_ENV_VAR, path.display());
            return Self {
                config_file: Some(path),
            };
        }

        Self {
            config_file: Self::default_config_file(),
        }
    }

    fn default_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}
