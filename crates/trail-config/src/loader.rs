use anyhow::{anyhow, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

use crate::AppConfig;

/// 环境变量前缀，例如 `SMART_TRAILS__APNS__KEY_ID`
pub const ENV_PREFIX: &str = "SMART_TRAILS";

/// 配置加载器：TOML 文件（可选）+ 环境变量覆盖
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// 创建配置加载器
    pub fn new<P: AsRef<Path>>(config_path: P) -> Self {
        Self {
            config_path: Some(config_path.as_ref().to_path_buf()),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// 只从环境变量加载
    pub fn from_env() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 加载配置；文件不存在时使用默认值
    pub fn load(&self) -> Result<AppConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            builder = builder.add_source(
                File::new(
                    path.to_str().ok_or_else(|| anyhow!("Invalid config path"))?,
                    FileFormat::Toml,
                )
                .required(false),
            );
        }

        let config = builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 加载并校验
    pub fn load_validated(&self) -> Result<AppConfig> {
        let config = self.load()?;
        config.validate()?;
        Ok(config)
    }
}
