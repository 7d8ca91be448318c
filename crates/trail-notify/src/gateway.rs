use crate::error::PushError;
use crate::request::DeliveryRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// 推送网关 trait
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// 发送一条推送，网关确认成功才返回 Ok
    async fn send(&self, request: &DeliveryRequest) -> Result<(), PushError>;

    /// 网关名称
    fn name(&self) -> &str;
}

/// 网关构建器，调度器首次发送时调用一次
pub trait GatewayFactory: Send + Sync {
    fn build(&self) -> Result<Arc<dyn PushGateway>, PushError>;
}

impl<F> GatewayFactory for F
where
    F: Fn() -> Result<Arc<dyn PushGateway>, PushError> + Send + Sync,
{
    fn build(&self) -> Result<Arc<dyn PushGateway>, PushError> {
        self()
    }
}
