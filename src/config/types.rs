/*!
 * 配置类型定义
 */

use serde::{Deserialize, Serialize};

use crate::checkpoint::DecodeOptions;
use crate::config::error::{ConfigError, ConfigResult};
use crate::render::RenderOptions;

/// 缩进宽度上限
pub const MAX_INDENT: usize = 16;
/// 行宽下限
pub const MIN_WIDTH: usize = 20;

/// 配置文件的完整结构，所有字段都可省略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub decode: DecodeOptions,
    pub render: RenderOptions,
}

impl InspectConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.render.indent > MAX_INDENT {
            return Err(ConfigError::invalid(format!(
                "render.indent must be at most {}, got {}",
                MAX_INDENT, self.render.indent
            )));
        }
        if self.render.width < MIN_WIDTH {
            return Err(ConfigError::invalid(format!(
                "render.width must be at least {}, got {}",
                MIN_WIDTH, self.render.width
            )));
        }
        if self.decode.max_payload_size == 0 {
            return Err(ConfigError::invalid(
                "decode.max_payload_size must be greater than 0",
            ));
        }
        Ok(())
    }
}
