//! 示例告警目录，只用于手动测试推送链路，与规则评估无关

use crate::model::{Alert, Hazard};
use rand::seq::SliceRandom;

/// 每种危险类型一条示例告警
pub fn catalog() -> Vec<Alert> {
    vec![
        Hazard::ExtremeCold.alert("Mombarone", -18),
        Hazard::SevereCold.alert("Valle Oropa", -12),
        Hazard::Freezing.alert("San Carlo", -3),
        Hazard::Hot.alert("San Carlo", 32),
        Hazard::ExtremeHeat.alert("Valle Oropa", 37),
        Hazard::Hypothermia.alert("Mombarone", 2),
        Hazard::SevereWeather.alert("San Carlo", 915),
        Hazard::StormWatch.alert("Valle Oropa", 945),
        Hazard::ActiveRainfall.alert("Mombarone", ""),
        Hazard::ExtremeUv.alert("San Carlo", 12),
        Hazard::VeryHighUv.alert("Valle Oropa", 9),
        Hazard::HighUv.alert("Mombarone", 7),
        Hazard::PoorVisibility.alert("Mombarone", ""),
        Hazard::LowLight.alert("San Carlo", ""),
        Hazard::DangerousAir.alert("Refuge", 5200),
        Hazard::PoorAir.alert("Refuge", 2100),
        Hazard::StuffyAir.alert("Refuge", 1400),
        Hazard::HighTraffic.alert("Valle Oropa", 35),
        Hazard::ModerateTraffic.alert("San Carlo", 20),
        Hazard::SlipperyTrail.alert("Mombarone", ""),
    ]
}

/// 随机挑选一条示例告警
pub fn random_alert() -> Alert {
    let alerts = catalog();
    alerts
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| Hazard::ActiveRainfall.alert("Mombarone", ""))
}
