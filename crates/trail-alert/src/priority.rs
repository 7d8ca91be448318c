use crate::model::{Alert, Severity};

/// 未知级别的排序值，排在最后
const UNKNOWN_RANK: u32 = 999;

/// 按级别名称取排序值，未知名称排最后
pub fn rank_of_label(label: &str) -> u32 {
    Severity::from_label(label).map_or(UNKNOWN_RANK, |s| s.rank())
}

/// 选出最紧急的告警；同级别时取最先出现的一条
pub fn pick_most_severe(alerts: &[Alert]) -> Option<&Alert> {
    alerts.iter().min_by_key(|alert| alert.severity.rank())
}

/// 按紧急程度稳定排序
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by_key(|alert| alert.severity.rank());
}
