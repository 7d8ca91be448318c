use crate::model::{Alert, Hazard};
use crate::thresholds::*;
use tracing::debug;
use trail_types::SensorSnapshot;

/// 单项危险检查
///
/// 每项检查只读取快照，最多产生一条告警；引用的读数缺失时直接跳过。
pub trait HazardCheck: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert>;
}

/// 温度分段
pub struct TemperatureCheck;

impl HazardCheck for TemperatureCheck {
    fn name(&self) -> &str {
        "temperature"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let temp = snapshot.temperature?;

        let hazard = if temp < TEMP_EXTREME_COLD {
            Hazard::ExtremeCold
        } else if temp < TEMP_VERY_COLD {
            Hazard::SevereCold
        } else if temp < TEMP_FREEZING {
            Hazard::Freezing
        } else if temp > TEMP_EXTREME_HEAT {
            Hazard::ExtremeHeat
        } else if temp > TEMP_HOT {
            Hazard::Hot
        } else {
            return None;
        };

        Some(hazard.alert(station, temp))
    }
}

/// 低温 + 潮湿
pub struct HypothermiaCheck;

impl HazardCheck for HypothermiaCheck {
    fn name(&self) -> &str {
        "hypothermia"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let temp = snapshot.temperature?;
        if temp >= TEMP_HYPOTHERMIA {
            return None;
        }

        let humid = snapshot
            .humidity
            .map_or(false, |h| h > HUMIDITY_VERY_HIGH);

        (snapshot.raining() || humid).then(|| Hazard::Hypothermia.alert(station, temp))
    }
}

/// 气压分段
pub struct PressureCheck;

impl HazardCheck for PressureCheck {
    fn name(&self) -> &str {
        "pressure"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let pressure = snapshot.pressure?;

        if pressure < PRESSURE_VERY_LOW {
            Some(Hazard::SevereWeather.alert(station, pressure))
        } else if pressure < PRESSURE_LOW {
            Some(Hazard::StormWatch.alert(station, pressure))
        } else {
            None
        }
    }
}

/// 正在降雨
pub struct RainfallCheck;

impl HazardCheck for RainfallCheck {
    fn name(&self) -> &str {
        "rainfall"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        snapshot
            .raining()
            .then(|| Hazard::ActiveRainfall.alert(station, ""))
    }
}

/// 紫外线分段
pub struct UvCheck;

impl HazardCheck for UvCheck {
    fn name(&self) -> &str {
        "uv"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let uv = snapshot.uv_index?;

        let hazard = if uv >= UV_EXTREME {
            Hazard::ExtremeUv
        } else if uv >= UV_VERY_HIGH {
            Hazard::VeryHighUv
        } else if uv >= UV_HIGH {
            Hazard::HighUv
        } else {
            return None;
        };

        Some(hazard.alert(station, uv))
    }
}

/// 能见度；雾雨低能见度与弱光互斥
pub struct VisibilityCheck;

impl HazardCheck for VisibilityCheck {
    fn name(&self) -> &str {
        "visibility"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let lux = snapshot.lux?;
        if lux >= LUX_DARK {
            return None;
        }

        let foggy = snapshot.humidity.map_or(false, |h| h > HUMIDITY_HIGH);

        if snapshot.raining() || foggy {
            Some(Hazard::PoorVisibility.alert(station, lux))
        } else if lux < LUX_VERY_DARK {
            Some(Hazard::LowLight.alert(station, lux))
        } else {
            None
        }
    }
}

/// CO2 分段
pub struct AirQualityCheck;

impl HazardCheck for AirQualityCheck {
    fn name(&self) -> &str {
        "air_quality"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let co2 = snapshot.co2_ppm?;

        let hazard = if co2 > CO2_DANGEROUS {
            Hazard::DangerousAir
        } else if co2 > CO2_POOR {
            Hazard::PoorAir
        } else if co2 > CO2_STUFFY {
            Hazard::StuffyAir
        } else {
            return None;
        };

        Some(hazard.alert(station, co2))
    }
}

/// 步道人流
pub struct TrafficCheck;

impl HazardCheck for TrafficCheck {
    fn name(&self) -> &str {
        "traffic"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let motion = snapshot.motion_count;

        if motion > TRAFFIC_HIGH {
            Some(Hazard::HighTraffic.alert(station, motion))
        } else if motion > TRAFFIC_MODERATE {
            Some(Hazard::ModerateTraffic.alert(station, motion))
        } else {
            None
        }
    }
}

/// 雨后低温路滑
pub struct SlipperyTrailCheck;

impl HazardCheck for SlipperyTrailCheck {
    fn name(&self) -> &str {
        "slippery_trail"
    }

    fn check(&self, snapshot: &SensorSnapshot, station: &str) -> Option<Alert> {
        let temp = snapshot.temperature?;

        (snapshot.recently_rained() && temp < TEMP_SLIPPERY)
            .then(|| Hazard::SlipperyTrail.alert(station, temp))
    }
}

/// 危险规则评估器
///
/// 按固定顺序运行全部检查，无状态，可在任意线程并发调用。
pub struct HazardEvaluator {
    checks: Vec<Box<dyn HazardCheck>>,
}

impl HazardEvaluator {
    pub fn new() -> Self {
        Self {
            checks: vec![
                Box::new(TemperatureCheck),
                Box::new(HypothermiaCheck),
                Box::new(PressureCheck),
                Box::new(RainfallCheck),
                Box::new(UvCheck),
                Box::new(VisibilityCheck),
                Box::new(AirQualityCheck),
                Box::new(TrafficCheck),
                Box::new(SlipperyTrailCheck),
            ],
        }
    }

    /// 评估快照，返回按检查顺序排列的告警
    pub fn evaluate(&self, snapshot: &SensorSnapshot, station: &str) -> Vec<Alert> {
        let alerts: Vec<Alert> = self
            .checks
            .iter()
            .filter_map(|check| check.check(snapshot, station))
            .collect();

        debug!(station = %station, count = alerts.len(), "Snapshot evaluated");
        alerts
    }
}

impl Default for HazardEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认检查集评估快照
pub fn evaluate(snapshot: &SensorSnapshot, station: &str) -> Vec<Alert> {
    HazardEvaluator::new().evaluate(snapshot, station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    fn hazards(snapshot: &SensorSnapshot) -> Vec<Hazard> {
        evaluate(snapshot, "Test").into_iter().map(|a| a.hazard).collect()
    }

    #[test]
    fn test_empty_snapshot_produces_nothing() {
        assert!(evaluate(&SensorSnapshot::new(), "Mombarone").is_empty());
    }

    #[test]
    fn test_zero_readings_are_not_absent() {
        // 0°C 不在任何温度区间内，但 0 lux 属于弱光
        let snapshot = SensorSnapshot::new()
            .with_temperature(0.0)
            .with_lux(0)
            .with_co2(0)
            .with_uv_index(0.0);
        assert_eq!(hazards(&snapshot), vec![Hazard::LowLight]);
    }

    #[test]
    fn test_temperature_boundaries() {
        let at = |t: f64| hazards(&SensorSnapshot::new().with_temperature(t));

        assert_eq!(at(-15.1), vec![Hazard::ExtremeCold]);
        assert_eq!(at(-15.0), vec![Hazard::SevereCold]);
        assert_eq!(at(-10.0), vec![Hazard::Freezing]);
        assert_eq!(at(-0.5), vec![Hazard::Freezing]);
        assert!(at(0.0).is_empty());
        assert!(at(30.0).is_empty());
        assert_eq!(at(30.5), vec![Hazard::Hot]);
        assert_eq!(at(35.0), vec![Hazard::Hot]);
        assert_eq!(at(35.1), vec![Hazard::ExtremeHeat]);
    }

    #[test]
    fn test_hypothermia_via_humidity() {
        let snapshot = SensorSnapshot::new()
            .with_temperature(2.0)
            .with_humidity(95.0)
            .with_raining(false);
        let alerts = evaluate(&snapshot, "Mombarone");

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard, Hazard::Hypothermia);
        assert_eq!(alerts[0].severity, Severity::Danger);
        assert_eq!(
            alerts[0].body,
            "Mombarone: Cold (2°C) + wet conditions. Hypothermia can occur quickly. Stay dry or turn back."
        );
    }

    #[test]
    fn test_hypothermia_needs_wet_conditions() {
        let snapshot = SensorSnapshot::new().with_temperature(2.0).with_humidity(90.0);
        assert!(hazards(&snapshot).is_empty());

        let snapshot = SensorSnapshot::new().with_temperature(10.0).with_raining(true);
        assert_eq!(hazards(&snapshot), vec![Hazard::ActiveRainfall]);
    }

    #[test]
    fn test_pressure_bands() {
        let at = |p: f64| hazards(&SensorSnapshot::new().with_pressure(p));

        assert_eq!(at(915.0), vec![Hazard::SevereWeather]);
        assert_eq!(at(920.0), vec![Hazard::StormWatch]);
        assert_eq!(at(949.9), vec![Hazard::StormWatch]);
        assert!(at(950.0).is_empty());
    }

    #[test]
    fn test_unknown_rain_state_is_not_rain() {
        let snapshot = SensorSnapshot::new().with_temperature(2.0);
        assert!(snapshot.is_raining.is_none());
        assert!(hazards(&snapshot).is_empty());
    }

    #[test]
    fn test_uv_bands() {
        let at = |uv: f64| hazards(&SensorSnapshot::new().with_uv_index(uv));

        assert!(at(5.9).is_empty());
        assert_eq!(at(6.0), vec![Hazard::HighUv]);
        assert_eq!(at(8.0), vec![Hazard::VeryHighUv]);
        assert_eq!(at(11.0), vec![Hazard::ExtremeUv]);
    }

    #[test]
    fn test_poor_visibility_excludes_low_light() {
        let snapshot = SensorSnapshot::new().with_lux(50).with_raining(true);
        assert_eq!(
            hazards(&snapshot),
            vec![Hazard::ActiveRainfall, Hazard::PoorVisibility]
        );

        let snapshot = SensorSnapshot::new().with_lux(5).with_raining(true);
        assert_eq!(
            hazards(&snapshot),
            vec![Hazard::ActiveRainfall, Hazard::PoorVisibility]
        );
    }

    #[test]
    fn test_low_light_when_dry() {
        let snapshot = SensorSnapshot::new()
            .with_lux(5)
            .with_raining(false)
            .with_humidity(0.0);
        assert_eq!(hazards(&snapshot), vec![Hazard::LowLight]);

        // 10..100 lux 且干燥：不告警
        let snapshot = SensorSnapshot::new().with_lux(50).with_humidity(0.0);
        assert!(hazards(&snapshot).is_empty());
    }

    #[test]
    fn test_fog_triggers_poor_visibility() {
        let snapshot = SensorSnapshot::new().with_lux(80).with_humidity(86.0);
        assert_eq!(hazards(&snapshot), vec![Hazard::PoorVisibility]);

        // 湿度阈值是严格大于
        let snapshot = SensorSnapshot::new().with_lux(5).with_humidity(85.0);
        assert_eq!(hazards(&snapshot), vec![Hazard::LowLight]);

        let snapshot = SensorSnapshot::new().with_lux(100).with_humidity(99.0);
        assert!(hazards(&snapshot).is_empty());
    }

    #[test]
    fn test_air_quality_bands() {
        let snapshot = SensorSnapshot::new().with_co2(5200);
        let alerts = evaluate(&snapshot, "Refuge");
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard, Hazard::DangerousAir);
        assert_eq!(alerts[0].severity, Severity::Danger);
        assert_eq!(
            alerts[0].body,
            "Refuge: CO2 5200 ppm. Exit immediately if breathing difficulty or dizziness."
        );

        let at = |ppm: u32| hazards(&SensorSnapshot::new().with_co2(ppm));
        assert_eq!(at(5000), vec![Hazard::PoorAir]);
        assert_eq!(at(2000), vec![Hazard::StuffyAir]);
        assert!(at(1000).is_empty());
    }

    #[test]
    fn test_traffic_bands() {
        let at = |count: u32| hazards(&SensorSnapshot::new().with_motion_count(count));

        assert!(at(15).is_empty());
        assert_eq!(at(16), vec![Hazard::ModerateTraffic]);
        assert_eq!(at(30), vec![Hazard::ModerateTraffic]);
        assert_eq!(at(31), vec![Hazard::HighTraffic]);

        let alerts = evaluate(&SensorSnapshot::new().with_motion_count(35), "Valle Oropa");
        assert_eq!(
            alerts[0].body,
            "Valle Oropa: 35 hikers detected in last hour. Expect crowds and delays."
        );
    }

    #[test]
    fn test_slippery_trail() {
        let snapshot = SensorSnapshot::new()
            .with_temperature(4.0)
            .with_rained_recently(true);
        assert_eq!(hazards(&snapshot), vec![Hazard::SlipperyTrail]);

        let snapshot = SensorSnapshot::new()
            .with_temperature(5.0)
            .with_rained_recently(true);
        assert!(hazards(&snapshot).is_empty());

        // 没有温度读数时不判断路滑
        let snapshot = SensorSnapshot::new().with_rained_recently(true);
        assert!(hazards(&snapshot).is_empty());
    }

    #[test]
    fn test_emission_order() {
        let snapshot = SensorSnapshot::new()
            .with_temperature(-12.0)
            .with_humidity(95.0)
            .with_pressure(930.0)
            .with_raining(true)
            .with_uv_index(7.0)
            .with_lux(20)
            .with_co2(1500)
            .with_motion_count(40)
            .with_rained_recently(true);

        assert_eq!(
            hazards(&snapshot),
            vec![
                Hazard::SevereCold,
                Hazard::Hypothermia,
                Hazard::StormWatch,
                Hazard::ActiveRainfall,
                Hazard::HighUv,
                Hazard::PoorVisibility,
                Hazard::StuffyAir,
                Hazard::HighTraffic,
                Hazard::SlipperyTrail,
            ]
        );
    }
}
