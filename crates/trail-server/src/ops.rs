//! 运维手动触发：随机示例告警与推送连通性测试

use tracing::info;
use trail_alert::{random_alert, Alert};
use trail_notify::{DeliveryReport, Notification, PushDispatcher};
use trail_types::DeviceTarget;

/// 测试告警结果
#[derive(Debug, Clone)]
pub struct TestAlertOutcome {
    pub alert: Alert,
    pub report: DeliveryReport,
}

impl TestAlertOutcome {
    /// 给操作人员看的结果摘要
    pub fn summary(&self) -> String {
        format!(
            "Sent to {} devices. Failed: {}. Alert: {}",
            self.report.sent, self.report.failed, self.alert.title
        )
    }
}

/// 随机选一条示例告警推送到指定设备
pub fn send_test_alert(dispatcher: &PushDispatcher, targets: &[DeviceTarget]) -> TestAlertOutcome {
    let alert = random_alert();
    info!(title = %alert.title, targets = targets.len(), "Sending random test alert");

    let report = dispatcher.deliver_all(targets, &Notification::test_alert(&alert));
    TestAlertOutcome { alert, report }
}

/// 推送连通性测试
pub fn send_connectivity_test(dispatcher: &PushDispatcher, target: &DeviceTarget) -> bool {
    dispatcher.deliver(target, &Notification::connectivity_test())
}
