use serde::{Deserialize, Serialize};
use std::fmt;

/// 推送平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Watchos,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Watchos => write!(f, "watchos"),
        }
    }
}

/// 推送目标设备
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTarget {
    /// 设备推送 token
    pub token: String,

    /// 平台
    pub platform: Platform,

    /// 应用 bundle id
    pub bundle_id: String,

    /// 是否启用
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// 订阅的站点
    #[serde(default)]
    pub station_id: Option<String>,
}

fn default_active() -> bool {
    true
}

impl DeviceTarget {
    pub fn new(token: impl Into<String>, platform: Platform, bundle_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            platform,
            bundle_id: bundle_id.into(),
            is_active: true,
            station_id: None,
        }
    }

    pub fn with_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 日志里只输出 token 前缀
    pub fn short_token(&self) -> &str {
        let end = self
            .token
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.token.len());
        &self.token[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_defaults() {
        let device: DeviceTarget = serde_json::from_str(
            r#"{"token": "abc", "platform": "watchos", "bundle_id": "com.example.app"}"#,
        )
        .unwrap();

        assert!(device.is_active);
        assert_eq!(device.platform, Platform::Watchos);
        assert_eq!(device.station_id, None);
    }

    #[test]
    fn test_short_token() {
        let device = DeviceTarget::new("0123456789abcdef", Platform::Ios, "com.example.app");
        assert_eq!(device.short_token(), "01234567");

        let device = DeviceTarget::new("abc", Platform::Ios, "com.example.app");
        assert_eq!(device.short_token(), "abc");
    }
}
