//! 配置管理模块
//!
//! ```toml
//! window_size = 20
//! window_type = "variable"   # 默认 fixed
//! operation = "any"          # 默认 sum
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::operation::Operation;
use crate::window::{WindowSize, WindowType};
use crate::{Result, RollingError};

/// 滚动聚合配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingConfig {
    /// 窗口大小 (必须 > 0)
    pub window_size: usize,

    #[serde(default)]
    pub window_type: WindowType,

    #[serde(default)]
    pub operation: Operation,
}

impl RollingConfig {
    pub fn new(window_size: usize, window_type: WindowType, operation: Operation) -> Self {
        Self {
            window_size,
            window_type,
            operation,
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RollingError::IOError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded rolling config from {}: window={}, type={}, op={}",
            path.display(),
            config.window_size,
            config.window_type,
            config.operation
        );
        Ok(config)
    }

    /// 解析 TOML 并校验
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            RollingError::ConfigError(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验窗口大小
    pub fn validate(&self) -> Result<WindowSize> {
        WindowSize::new(self.window_size)
    }
}
