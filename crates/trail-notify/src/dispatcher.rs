use crate::error::PushError;
use crate::gateway::{GatewayFactory, PushGateway};
use crate::message::Notification;
use crate::request::DeliveryRequest;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};
use trail_types::DeviceTarget;

/// 单次推送默认超时
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// 批量推送结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn total(&self) -> usize {
        self.sent + self.failed
    }

    pub fn all_sent(&self) -> bool {
        self.failed == 0
    }
}

/// 推送调度器
///
/// 持有唯一的网关客户端，首次使用时创建。对外提供阻塞接口：每次发送在专用
/// 运行时上跑一个异步任务直到网关确认、失败或超时。客户端的创建和每次发送都在同
/// 一把锁内完成，所以同一时刻只有一个请求在途。
///
/// `deliver` 会阻塞当前线程。在 Tokio 运行时内部调用时直接返回 false；异步代码请
/// 通过 `spawn_blocking` 使用。
pub struct PushDispatcher {
    factory: Box<dyn GatewayFactory>,
    client: Mutex<Option<Arc<dyn PushGateway>>>,
    runtime: Runtime,
    timeout: Duration,
}

impl PushDispatcher {
    pub fn new(
        factory: impl GatewayFactory + 'static,
        timeout: Duration,
    ) -> Result<Self, PushError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .thread_name("push-dispatcher")
            .build()
            .map_err(|e| PushError::Runtime(e.to_string()))?;

        Ok(Self {
            factory: Box::new(factory),
            client: Mutex::new(None),
            runtime,
            timeout,
        })
    }

    /// 锁中毒时继续使用内部状态，避免一次 panic 让后续发送全部失败
    fn lock_client(&self) -> MutexGuard<'_, Option<Arc<dyn PushGateway>>> {
        self.client.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn gateway(
        &self,
        slot: &mut Option<Arc<dyn PushGateway>>,
    ) -> Result<Arc<dyn PushGateway>, PushError> {
        if let Some(gateway) = slot.as_ref() {
            return Ok(gateway.clone());
        }

        let gateway = self.factory.build()?;
        info!(gateway = %gateway.name(), "Push gateway initialized");
        *slot = Some(gateway.clone());
        Ok(gateway)
    }

    /// 立即创建网关客户端，配置错误在这里返回
    pub fn connect(&self) -> Result<(), PushError> {
        let mut slot = self.lock_client();
        self.gateway(&mut slot).map(|_| ())
    }

    /// 网关客户端是否已创建
    pub fn is_connected(&self) -> bool {
        self.lock_client().is_some()
    }

    /// 在专用运行时上完成一次发送
    ///
    /// 发送放在独立任务里，网关 panic 只会变成 JoinError。在其他运行时内部调用时
    /// `block_on` 会在轮询前 panic，这里捕获后按运行时错误返回。
    fn drive(
        &self,
        gateway: Arc<dyn PushGateway>,
        request: DeliveryRequest,
    ) -> Result<(), PushError> {
        let timeout = self.timeout;
        let send = async move {
            match tokio::time::timeout(timeout, gateway.send(&request)).await {
                Ok(result) => result,
                Err(_) => Err(PushError::Timeout),
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.runtime.block_on(async move { tokio::spawn(send).await })
        }));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(PushError::Runtime(e.to_string())),
            Err(_) => Err(PushError::Runtime(
                "cannot block on delivery from inside an async runtime".to_string(),
            )),
        }
    }

    fn try_deliver(
        &self,
        target: &DeviceTarget,
        notification: &Notification,
    ) -> Result<(), PushError> {
        let request = DeliveryRequest::new(target, notification);

        let mut slot = self.lock_client();
        let gateway = self.gateway(&mut slot)?;
        self.drive(gateway, request)
    }

    /// 推送到单台设备，任何错误都只记录日志并返回 false
    pub fn deliver(&self, target: &DeviceTarget, notification: &Notification) -> bool {
        match self.try_deliver(target, notification) {
            Ok(()) => {
                info!(
                    token = %target.short_token(),
                    title = %notification.title,
                    "Notification sent"
                );
                true
            }
            Err(e @ (PushError::Timeout | PushError::Rejected { .. })) => {
                warn!(
                    token = %target.short_token(),
                    kind = e.kind(),
                    error = %e,
                    "Notification not delivered"
                );
                false
            }
            Err(e) => {
                error!(
                    token = %target.short_token(),
                    kind = e.kind(),
                    error = %e,
                    "Notification failed"
                );
                false
            }
        }
    }

    /// 逐台推送，单台失败不影响其余设备
    pub fn deliver_all(
        &self,
        targets: &[DeviceTarget],
        notification: &Notification,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for target in targets {
            if self.deliver(target, notification) {
                report.sent += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            sent = report.sent,
            failed = report.failed,
            title = %notification.title,
            "Batch delivery finished"
        );

        report
    }
}
