use serde::{Deserialize, Serialize};
use std::fmt;

/// 告警级别（Danger 最紧急）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Warning,
    Info,
}

impl Severity {
    /// 排序值，越小越紧急
    pub fn rank(&self) -> u32 {
        match self {
            Severity::Danger => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "danger" => Some(Severity::Danger),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 告警分类，只用于展示，不参与排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Temperature,
    Weather,
    AirQuality,
    Trail,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Temperature => "temperature",
            Category::Weather => "weather",
            Category::AirQuality => "air_quality",
            Category::Trail => "trail",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 危险类型，每种对应一项检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    ExtremeCold,
    SevereCold,
    Freezing,
    Hot,
    ExtremeHeat,
    Hypothermia,
    SevereWeather,
    StormWatch,
    ActiveRainfall,
    ExtremeUv,
    VeryHighUv,
    HighUv,
    PoorVisibility,
    LowLight,
    DangerousAir,
    PoorAir,
    StuffyAir,
    HighTraffic,
    ModerateTraffic,
    SlipperyTrail,
}

impl Hazard {
    pub const ALL: [Hazard; 20] = [
        Hazard::ExtremeCold,
        Hazard::SevereCold,
        Hazard::Freezing,
        Hazard::Hot,
        Hazard::ExtremeHeat,
        Hazard::Hypothermia,
        Hazard::SevereWeather,
        Hazard::StormWatch,
        Hazard::ActiveRainfall,
        Hazard::ExtremeUv,
        Hazard::VeryHighUv,
        Hazard::HighUv,
        Hazard::PoorVisibility,
        Hazard::LowLight,
        Hazard::DangerousAir,
        Hazard::PoorAir,
        Hazard::StuffyAir,
        Hazard::HighTraffic,
        Hazard::ModerateTraffic,
        Hazard::SlipperyTrail,
    ];

    pub fn severity(&self) -> Severity {
        use Hazard::*;
        match self {
            ExtremeCold | SevereCold | ExtremeHeat | Hypothermia | SevereWeather | ExtremeUv
            | DangerousAir => Severity::Danger,
            Freezing | Hot | StormWatch | ActiveRainfall | VeryHighUv | PoorVisibility
            | PoorAir | SlipperyTrail => Severity::Warning,
            HighUv | LowLight | StuffyAir | HighTraffic | ModerateTraffic => Severity::Info,
        }
    }

    pub fn category(&self) -> Category {
        use Hazard::*;
        match self {
            ExtremeCold | SevereCold | Freezing | Hot | ExtremeHeat => Category::Temperature,
            Hypothermia | SevereWeather | StormWatch | ActiveRainfall | ExtremeUv | VeryHighUv
            | HighUv | PoorVisibility | LowLight => Category::Weather,
            DangerousAir | PoorAir | StuffyAir => Category::AirQuality,
            HighTraffic | ModerateTraffic | SlipperyTrail => Category::Trail,
        }
    }

    pub fn emoji(&self) -> &'static str {
        use Hazard::*;
        match self {
            ExtremeCold | Hypothermia => "🥶",
            SevereCold | Freezing => "❄️",
            ExtremeHeat => "🔥",
            Hot | ExtremeUv | VeryHighUv | HighUv => "☀️",
            SevereWeather => "⛈️",
            StormWatch | ActiveRainfall => "🌧️",
            PoorVisibility => "🌫️",
            LowLight => "🌙",
            DangerousAir | PoorAir | StuffyAir => "💨",
            HighTraffic | ModerateTraffic => "👥",
            SlipperyTrail => "⚠️",
        }
    }

    fn headline(&self) -> &'static str {
        use Hazard::*;
        match self {
            ExtremeCold => "EXTREME COLD WARNING",
            SevereCold => "Severe Cold Alert",
            Freezing => "Freezing Conditions",
            Hot => "Hot Conditions",
            ExtremeHeat => "Extreme Heat Warning",
            Hypothermia => "Hypothermia Risk",
            SevereWeather => "Severe Weather Warning",
            StormWatch => "Storm Watch",
            ActiveRainfall => "Active Rainfall",
            ExtremeUv => "EXTREME UV",
            VeryHighUv => "Very High UV",
            HighUv => "High UV",
            PoorVisibility => "Poor Visibility",
            LowLight => "Low Light",
            DangerousAir => "DANGEROUS AIR QUALITY",
            PoorAir => "Poor Air Quality",
            StuffyAir => "Stuffy Air",
            HighTraffic => "High Trail Traffic",
            ModerateTraffic => "Moderate Traffic",
            SlipperyTrail => "Slippery Trail",
        }
    }

    /// 带图标前缀的标题
    pub fn title(&self) -> String {
        format!("{} {}", self.emoji(), self.headline())
    }

    /// 消息正文；`reading` 为观测值，不引用观测值的类型会忽略它
    pub fn body(&self, station: &str, reading: &str) -> String {
        use Hazard::*;
        match self {
            ExtremeCold => format!(
                "{station}: {reading}°C. Frostbite possible in minutes. Exposed skin at risk."
            ),
            SevereCold => format!(
                "{station}: {reading}°C. Frostbite risk. Ensure proper clothing and limit exposure."
            ),
            Freezing => format!(
                "{station}: {reading}°C. Ice likely on trail. Use traction devices if available."
            ),
            Hot => format!("{station}: {reading}°C. Stay hydrated. Seek shade during midday."),
            ExtremeHeat => format!(
                "{station}: {reading}°C. Heat exhaustion risk. Carry extra water, take frequent breaks."
            ),
            Hypothermia => format!(
                "{station}: Cold ({reading}°C) + wet conditions. Hypothermia can occur quickly. Stay dry or turn back."
            ),
            SevereWeather => format!(
                "{station}: Pressure at {reading} hPa. Severe weather likely. Descend or seek shelter."
            ),
            StormWatch => format!(
                "{station}: Low pressure ({reading} hPa). Weather may deteriorate. Monitor conditions."
            ),
            ActiveRainfall => format!(
                "{station}: Rain detected. Trail may be slippery. Watch footing on rocks and roots."
            ),
            ExtremeUv => format!(
                "{station}: UV {reading}. Sunburn in 10-15 minutes. Wear protection, limit exposure."
            ),
            VeryHighUv => format!(
                "{station}: UV {reading}. Apply sunscreen (SPF 30+). Wear hat and sunglasses."
            ),
            HighUv => format!("{station}: UV {reading}. Sun protection recommended."),
            PoorVisibility => format!(
                "{station}: Low light + fog/rain. Visibility reduced. Use headlamp and stay on marked trail."
            ),
            LowLight => format!("{station}: Limited daylight. Headlamp recommended."),
            DangerousAir => format!(
                "{station}: CO2 {reading} ppm. Exit immediately if breathing difficulty or dizziness."
            ),
            PoorAir => format!(
                "{station}: CO2 {reading} ppm. Headache or drowsiness possible. Improve ventilation."
            ),
            StuffyAir => format!(
                "{station}: CO2 {reading} ppm. Ventilation limited. Open window if possible."
            ),
            HighTraffic => format!(
                "{station}: {reading} hikers detected in last hour. Expect crowds and delays."
            ),
            ModerateTraffic => {
                format!("{station}: {reading} hikers in last hour. Trail moderately busy.")
            }
            SlipperyTrail => format!(
                "{station}: Recent rain + cold temps. Ice or mud likely. Use caution."
            ),
        }
    }

    /// 生成告警，观测值按原精度输出
    pub fn alert(&self, station: &str, reading: impl fmt::Display) -> Alert {
        Alert {
            hazard: *self,
            severity: self.severity(),
            title: self.title(),
            body: self.body(station, &reading.to_string()),
            emoji: self.emoji().to_string(),
            category: self.category(),
        }
    }
}

/// 告警
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// 危险类型
    pub hazard: Hazard,

    /// 级别
    pub severity: Severity,

    /// 标题
    pub title: String,

    /// 正文
    pub body: String,

    /// 图标
    pub emoji: String,

    /// 分类
    pub category: Category,
}
