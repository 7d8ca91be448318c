use std::sync::Arc;
use tracing::{debug, info};
use trail_alert::{pick_most_severe, Alert, HazardEvaluator};
use trail_notify::{DeliveryReport, Notification, PushDispatcher};
use trail_types::{DeviceDirectory, SensorSnapshot};

/// 一次快照处理的结果
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// 评估出的全部告警（按检查顺序）
    pub alerts: Vec<Alert>,

    /// 实际推送的告警
    pub chosen: Option<Alert>,

    /// 推送结果
    pub report: DeliveryReport,
}

/// 快照 → 告警 → 最紧急告警 → 推送到订阅设备
pub struct AlertPipeline {
    evaluator: HazardEvaluator,
    dispatcher: Arc<PushDispatcher>,
    directory: Arc<dyn DeviceDirectory>,
}

impl AlertPipeline {
    pub fn new(dispatcher: Arc<PushDispatcher>, directory: Arc<dyn DeviceDirectory>) -> Self {
        Self {
            evaluator: HazardEvaluator::new(),
            dispatcher,
            directory,
        }
    }

    /// 处理一份快照；没有告警时不发送任何推送
    pub fn process(&self, snapshot: &SensorSnapshot, label: &str) -> PipelineOutcome {
        let alerts = self.evaluator.evaluate(snapshot, label);
        let chosen = pick_most_severe(&alerts).cloned();

        let report = match &chosen {
            Some(alert) => {
                let targets = self.directory.active_targets(snapshot.station_id.as_deref());
                info!(
                    station = %label,
                    title = %alert.title,
                    severity = %alert.severity,
                    targets = targets.len(),
                    "Dispatching hazard alert"
                );
                self.dispatcher
                    .deliver_all(&targets, &Notification::from_alert(alert))
            }
            None => {
                debug!(station = %label, "No hazard alerts");
                DeliveryReport::default()
            }
        };

        PipelineOutcome {
            alerts,
            chosen,
            report,
        }
    }
}
