use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trail_notify::ApnsConfig;

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub apns: ApnsConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 推送调度配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// 单次推送超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

// 默认值函数
fn default_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DispatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// 校验推送所需的配置
    pub fn validate(&self) -> Result<()> {
        if self.apns.key_id.trim().is_empty() {
            return Err(anyhow!("apns.key_id must be set"));
        }

        if self.apns.team_id.trim().is_empty() {
            return Err(anyhow!("apns.team_id must be set"));
        }

        if self.apns.bundle_id.trim().is_empty() {
            return Err(anyhow!("apns.bundle_id must be set"));
        }

        if self.dispatch.timeout_secs == 0 {
            return Err(anyhow!("dispatch.timeout_secs must be greater than 0"));
        }

        Ok(())
    }

    /// 输出当前生效配置
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.dispatch.timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.apns.use_sandbox);
    }

    #[test]
    fn test_validate_requires_identifiers() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.apns.key_id = "ABC123DEFG".to_string();
        config.apns.team_id = "TEAM123456".to_string();
        assert!(config.validate().is_ok());

        config.dispatch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[apns]"));
        assert!(rendered.contains("timeout_secs = 5"));
        assert!(rendered.contains("format = \"text\""));
    }
}
