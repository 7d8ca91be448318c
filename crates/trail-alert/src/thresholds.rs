//! 告警阈值

// 温度（°C）
pub const TEMP_EXTREME_COLD: f64 = -15.0;
pub const TEMP_VERY_COLD: f64 = -10.0;
pub const TEMP_FREEZING: f64 = 0.0;
pub const TEMP_HOT: f64 = 30.0;
pub const TEMP_EXTREME_HEAT: f64 = 35.0;
pub const TEMP_HYPOTHERMIA: f64 = 10.0;
pub const TEMP_SLIPPERY: f64 = 5.0;

// 气压（hPa）
pub const PRESSURE_VERY_LOW: f64 = 920.0;
pub const PRESSURE_LOW: f64 = 950.0;

// 湿度（%）
pub const HUMIDITY_VERY_HIGH: f64 = 90.0;
pub const HUMIDITY_HIGH: f64 = 85.0;

// CO2（ppm）
pub const CO2_STUFFY: u32 = 1000;
pub const CO2_POOR: u32 = 2000;
pub const CO2_DANGEROUS: u32 = 5000;

// 紫外线指数
pub const UV_HIGH: f64 = 6.0;
pub const UV_VERY_HIGH: f64 = 8.0;
pub const UV_EXTREME: f64 = 11.0;

// 光照（lux）
pub const LUX_DARK: u32 = 100;
pub const LUX_VERY_DARK: u32 = 10;

// 人流（人/小时）
pub const TRAFFIC_MODERATE: u32 = 15;
pub const TRAFFIC_HIGH: u32 = 30;
