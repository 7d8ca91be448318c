use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trail_alert::Alert;

/// 推送通知分类标签（客户端据此展示操作按钮）
pub const ALERT_CATEGORY_TAG: &str = "TRAIL_ALERT";

/// 告警通知附带的图片
pub const ALERT_IMAGE_URL: &str = "https://smart-trails.com/static/st_background.jpg";

/// 待推送的通知内容（告警或临时消息）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// 标题
    pub title: String,

    /// 内容
    pub body: String,

    /// 合并到推送负载顶层的附加字段
    #[serde(default)]
    pub data: Map<String, Value>,

    /// 富媒体图片
    #[serde(default)]
    pub image_url: Option<String>,

    /// 通知分类标签
    #[serde(default)]
    pub category: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: Map::new(),
            image_url: None,
            category: None,
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 由告警生成通知，附带级别和分类
    pub fn from_alert(alert: &Alert) -> Self {
        Self::new(alert.title.clone(), alert.body.clone())
            .with_data("severity", alert.severity.as_str())
            .with_data("category", alert.category.as_str())
            .with_category(ALERT_CATEGORY_TAG)
    }

    /// 手动测试用告警通知
    pub fn test_alert(alert: &Alert) -> Self {
        Self::from_alert(alert)
            .with_data("test", true)
            .with_image_url(ALERT_IMAGE_URL)
    }

    /// 推送连通性测试
    pub fn connectivity_test() -> Self {
        Self::new("Smart Trails Test", "Push notifications are working! 🏔️ yeah! ")
            .with_data("test", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_alert::Hazard;

    #[test]
    fn test_from_alert() {
        let alert = Hazard::StormWatch.alert("Valle Oropa", 945);
        let notification = Notification::from_alert(&alert);

        assert_eq!(notification.title, "🌧️ Storm Watch");
        assert_eq!(notification.data["severity"], "warning");
        assert_eq!(notification.data["category"], "weather");
        assert_eq!(notification.category.as_deref(), Some(ALERT_CATEGORY_TAG));
        assert!(notification.image_url.is_none());
        assert!(!notification.data.contains_key("test"));
    }

    #[test]
    fn test_test_alert_flags() {
        let alert = Hazard::DangerousAir.alert("Refuge", 5200);
        let notification = Notification::test_alert(&alert);

        assert_eq!(notification.data["test"], true);
        assert_eq!(notification.data["severity"], "danger");
        assert_eq!(notification.data["category"], "air_quality");
        assert_eq!(notification.image_url.as_deref(), Some(ALERT_IMAGE_URL));
    }

    #[test]
    fn test_connectivity_message() {
        let notification = Notification::connectivity_test();
        assert_eq!(notification.title, "Smart Trails Test");
        assert_eq!(notification.data.len(), 1);
        assert!(notification.category.is_none());
    }
}
