use crate::message::Notification;
use serde::Serialize;
use serde_json::{json, Map, Value};
use trail_types::DeviceTarget;

/// 单台设备的推送请求，发送前临时构建，不落库
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryRequest {
    pub token: String,
    pub bundle_id: String,
    pub title: String,
    pub body: String,
    pub data: Map<String, Value>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl DeliveryRequest {
    pub fn new(target: &DeviceTarget, notification: &Notification) -> Self {
        Self {
            token: target.token.clone(),
            bundle_id: target.bundle_id.clone(),
            title: notification.title.clone(),
            body: notification.body.clone(),
            data: notification.data.clone(),
            image_url: notification.image_url.clone(),
            category: notification.category.clone(),
        }
    }

    /// 推送负载
    ///
    /// `aps` 段固定包含标题、正文、默认提示音和角标 +1；附加字段平铺在顶层，
    /// 图片地址单独放在顶层 `image_url`。
    pub fn payload(&self) -> Value {
        let mut aps = json!({
            "alert": {
                "title": self.title,
                "body": self.body,
            },
            "sound": "default",
            "badge": 1,
        });

        if let Some(category) = &self.category {
            aps["category"] = Value::String(category.clone());
        }

        let mut message = Map::new();
        message.insert("aps".to_string(), aps);

        for (key, value) in &self.data {
            message.insert(key.clone(), value.clone());
        }

        if let Some(url) = &self.image_url {
            message.insert("image_url".to_string(), Value::String(url.clone()));
        }

        Value::Object(message)
    }
}
