use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未提供站点名称时消息中使用的默认标签
pub const DEFAULT_STATION_LABEL: &str = "this trail";

/// 传感器快照
///
/// 单个监测站在某一时刻的读数集合。除 `motion_count` 外所有字段都可以缺失，
/// 缺失表示"没有该读数"，与读数为 0 含义不同。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// 站点 ID
    #[serde(default)]
    pub station_id: Option<String>,

    /// 站点显示名称
    #[serde(default)]
    pub station_label: Option<String>,

    /// 采集时间
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// 温度（°C）
    #[serde(default)]
    pub temperature: Option<f64>,

    /// 相对湿度（%）
    #[serde(default)]
    pub humidity: Option<f64>,

    /// 气压（hPa）
    #[serde(default)]
    pub pressure: Option<f64>,

    /// 紫外线指数
    #[serde(default)]
    pub uv_index: Option<f64>,

    /// 光照（lux）
    #[serde(default)]
    pub lux: Option<u32>,

    /// 正在下雨（None 表示未知）
    #[serde(default)]
    pub is_raining: Option<bool>,

    /// 最近一小时内下过雨（None 表示未知）
    #[serde(default)]
    pub rained_recently: Option<bool>,

    /// CO2 浓度（ppm）
    #[serde(default)]
    pub co2_ppm: Option<u32>,

    /// 最近一小时检测到的人数
    #[serde(default)]
    pub motion_count: u32,

    /// 土壤湿度（%），仅透传
    #[serde(default)]
    pub soil_moisture: Option<f64>,

    /// 人流统计周期（分钟），仅透传
    #[serde(default)]
    pub period_minutes: Option<u32>,
}

impl SensorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.station_label = Some(label.into());
        self
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = Some(percent);
        self
    }

    pub fn with_pressure(mut self, hpa: f64) -> Self {
        self.pressure = Some(hpa);
        self
    }

    pub fn with_uv_index(mut self, uv: f64) -> Self {
        self.uv_index = Some(uv);
        self
    }

    pub fn with_lux(mut self, lux: u32) -> Self {
        self.lux = Some(lux);
        self
    }

    pub fn with_raining(mut self, raining: bool) -> Self {
        self.is_raining = Some(raining);
        self
    }

    pub fn with_rained_recently(mut self, rained: bool) -> Self {
        self.rained_recently = Some(rained);
        self
    }

    pub fn with_co2(mut self, ppm: u32) -> Self {
        self.co2_ppm = Some(ppm);
        self
    }

    pub fn with_motion_count(mut self, count: u32) -> Self {
        self.motion_count = count;
        self
    }

    /// 只有明确为 true 才算在下雨
    pub fn raining(&self) -> bool {
        self.is_raining == Some(true)
    }

    pub fn recently_rained(&self) -> bool {
        self.rained_recently == Some(true)
    }

    /// 用于告警文本的站点名称
    pub fn label(&self) -> &str {
        self.station_label
            .as_deref()
            .or(self.station_id.as_deref())
            .unwrap_or(DEFAULT_STATION_LABEL)
    }

    /// 从监测站上报的数据包构建快照
    pub fn from_payload(payload: &SensorPayload) -> Self {
        let sensors = &payload.sensors;
        let atmospheric = sensors.atmospheric.clone().unwrap_or_default();
        let light = sensors.light.clone().unwrap_or_default();
        let precipitation = sensors.precipitation.clone().unwrap_or_default();
        let activity = sensors.trail_activity.clone().unwrap_or_default();

        Self {
            station_id: Some(payload.station_id.clone()),
            station_label: payload.name.clone(),
            timestamp: payload.timestamp,
            temperature: atmospheric.temperature,
            humidity: atmospheric.humidity,
            pressure: atmospheric.pressure,
            uv_index: light.uv_index,
            lux: light.lux,
            is_raining: precipitation.is_raining,
            rained_recently: precipitation.rain_detected_last_hour,
            co2_ppm: sensors.air_quality.as_ref().and_then(|a| a.co2_ppm),
            motion_count: activity.motion_count.unwrap_or(0),
            soil_moisture: sensors.soil.as_ref().and_then(|s| s.moisture_percent),
            period_minutes: activity.period_minutes,
        }
    }
}

/// 监测站上报的数据包
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorPayload {
    pub station_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sensors: SensorGroups,
}

/// 按传感器类型分组的读数，每组都可以缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorGroups {
    #[serde(default)]
    pub atmospheric: Option<AtmosphericGroup>,
    #[serde(default)]
    pub light: Option<LightGroup>,
    #[serde(default)]
    pub soil: Option<SoilGroup>,
    #[serde(default)]
    pub air_quality: Option<AirQualityGroup>,
    #[serde(default)]
    pub precipitation: Option<PrecipitationGroup>,
    #[serde(default)]
    pub trail_activity: Option<TrailActivityGroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtmosphericGroup {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightGroup {
    #[serde(default)]
    pub uv_index: Option<f64>,
    #[serde(default)]
    pub lux: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilGroup {
    #[serde(default)]
    pub moisture_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityGroup {
    #[serde(default)]
    pub co2_ppm: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrecipitationGroup {
    #[serde(default)]
    pub is_raining: Option<bool>,
    #[serde(default)]
    pub rain_detected_last_hour: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailActivityGroup {
    #[serde(default)]
    pub motion_count: Option<u32>,
    #[serde(default)]
    pub period_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_defaults() {
        let snapshot = SensorSnapshot::new();
        assert_eq!(snapshot.temperature, None);
        assert_eq!(snapshot.motion_count, 0);
        assert!(!snapshot.raining());
        assert_eq!(snapshot.label(), DEFAULT_STATION_LABEL);
    }

    #[test]
    fn test_label_falls_back_to_station_id() {
        let snapshot = SensorSnapshot::new().with_station("mombarone-san-carlo");
        assert_eq!(snapshot.label(), "mombarone-san-carlo");

        let snapshot = snapshot.with_label("Mombarone");
        assert_eq!(snapshot.label(), "Mombarone");
    }

    #[test]
    fn test_from_full_payload() {
        let json = r#"{
            "station_id": "mombarone-san-carlo",
            "name": "Mombarone",
            "timestamp": "2024-11-22T14:30:00Z",
            "sensors": {
                "atmospheric": {"temperature": 12.5, "humidity": 65.0, "pressure": 875.3},
                "light": {"uv_index": 3.2, "lux": 45000},
                "soil": {"moisture_percent": 45.5},
                "air_quality": {"co2_ppm": 420},
                "precipitation": {"is_raining": false, "rain_detected_last_hour": true},
                "trail_activity": {"motion_count": 12, "period_minutes": 60}
            }
        }"#;

        let payload: SensorPayload = serde_json::from_str(json).unwrap();
        let snapshot = SensorSnapshot::from_payload(&payload);

        assert_eq!(snapshot.label(), "Mombarone");
        assert_eq!(snapshot.temperature, Some(12.5));
        assert_eq!(snapshot.pressure, Some(875.3));
        assert_eq!(snapshot.lux, Some(45000));
        assert_eq!(snapshot.co2_ppm, Some(420));
        assert_eq!(snapshot.is_raining, Some(false));
        assert!(snapshot.recently_rained());
        assert_eq!(snapshot.motion_count, 12);
        assert_eq!(snapshot.soil_moisture, Some(45.5));
        assert!(snapshot.timestamp.is_some());
    }

    #[test]
    fn test_from_partial_payload_keeps_absence() {
        let json = r#"{
            "station_id": "valle-oropa",
            "sensors": {
                "atmospheric": {"temperature": 0.0},
                "precipitation": {}
            }
        }"#;

        let payload: SensorPayload = serde_json::from_str(json).unwrap();
        let snapshot = SensorSnapshot::from_payload(&payload);

        assert_eq!(snapshot.temperature, Some(0.0));
        assert_eq!(snapshot.humidity, None);
        assert_eq!(snapshot.uv_index, None);
        assert_eq!(snapshot.co2_ppm, None);
        assert_eq!(snapshot.is_raining, None);
        assert_eq!(snapshot.motion_count, 0);
        assert_eq!(snapshot.label(), "valle-oropa");
    }
}
