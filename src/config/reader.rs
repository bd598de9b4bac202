/*!
 * TOML配置读取器
 *
 * 负责从文件系统读取和解析配置文件，文件不存在时使用默认配置
 */

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::paths::ConfigPaths;
use crate::config::types::InspectConfig;

pub struct ConfigReader {
    paths: ConfigPaths,
}

impl ConfigReader {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    /// 加载配置
    /// 文件不存在返回默认配置；读取、解析或校验失败返回错误
    pub fn load_config(&self) -> ConfigResult<InspectConfig> {
        let Some(config_path) = self.paths.config_file() else {
            debug!("no config directory available, using defaults");
            return Ok(InspectConfig::default());
        };

        if !config_path.exists() {
            debug!("config file not found: {}", config_path.display());
            return Ok(InspectConfig::default());
        }

        let content =
            fs::read_to_string(config_path).map_err(|e| ConfigError::read(config_path, e))?;
        let config = Self::parse_toml_content(config_path, &content)?;
        config.validate()?;

        info!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// 解析TOML内容为配置结构
    pub fn parse_toml_content(path: &Path, content: &str) -> ConfigResult<InspectConfig> {
        toml::from_str::<InspectConfig>(content).map_err(|e| ConfigError::parse(path, e))
    }
}
