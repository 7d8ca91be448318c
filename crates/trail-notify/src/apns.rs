use crate::error::PushError;
use crate::gateway::{GatewayFactory, PushGateway};
use crate::request::DeliveryRequest;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

const PRODUCTION_HOST: &str = "https://api.push.apple.com";
const SANDBOX_HOST: &str = "https://api.sandbox.push.apple.com";

/// 签名 token 最长可用 60 分钟，提前刷新
const TOKEN_REFRESH_SECS: i64 = 50 * 60;

// ============================================================================
// 配置
// ============================================================================

/// APNs 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApnsConfig {
    /// .p8 私钥路径
    pub key_path: PathBuf,

    /// 密钥 ID
    pub key_id: String,

    /// 开发者团队 ID
    pub team_id: String,

    /// 应用 bundle id（请求未指定时作为 apns-topic）
    pub bundle_id: String,

    /// 使用沙箱环境
    pub use_sandbox: bool,
}

impl Default for ApnsConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from("AuthKey.p8"),
            key_id: String::new(),
            team_id: String::new(),
            bundle_id: "com.kateDmitrieva.SmartTrails".to_string(),
            use_sandbox: true,
        }
    }
}

impl ApnsConfig {
    pub fn host(&self) -> &'static str {
        if self.use_sandbox {
            SANDBOX_HOST
        } else {
            PRODUCTION_HOST
        }
    }
}

// ============================================================================
// 网关
// ============================================================================

#[derive(Serialize)]
struct ProviderClaims<'a> {
    iss: &'a str,
    iat: i64,
}

struct ProviderToken {
    value: String,
    issued_at: i64,
}

#[derive(Deserialize)]
struct ApnsErrorBody {
    reason: String,
}

/// Apple Push Notification service 网关
pub struct ApnsGateway {
    config: ApnsConfig,
    host: String,
    key: EncodingKey,
    client: reqwest::Client,
    token: Mutex<Option<ProviderToken>>,
}

impl ApnsGateway {
    /// 读取私钥并创建客户端；密钥不可用时直接报错
    pub fn from_config(config: ApnsConfig, timeout: Duration) -> Result<Self, PushError> {
        if config.key_id.is_empty() || config.team_id.is_empty() {
            return Err(PushError::config("key_id and team_id are required"));
        }

        let pem = std::fs::read(&config.key_path).map_err(|e| {
            PushError::config(format!(
                "cannot read signing key {}: {}",
                config.key_path.display(),
                e
            ))
        })?;
        let key = EncodingKey::from_ec_pem(&pem)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PushError::config(format!("cannot build HTTP client: {}", e)))?;

        let gateway = Self {
            host: config.host().to_string(),
            config,
            key,
            client,
            token: Mutex::new(None),
        };

        // 先签一次，确认私钥可用
        gateway.provider_token()?;

        info!(
            key_id = %gateway.config.key_id,
            sandbox = gateway.config.use_sandbox,
            "APNs client created"
        );

        Ok(gateway)
    }

    /// 改用指定的 APNs 地址（代理或本地测试服务）
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    fn sign(&self, issued_at: i64) -> Result<String, PushError> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.config.key_id.clone());

        let claims = ProviderClaims {
            iss: &self.config.team_id,
            iat: issued_at,
        };

        Ok(encode(&header, &claims, &self.key)?)
    }

    /// 获取签名 token，过期前复用
    fn provider_token(&self) -> Result<String, PushError> {
        let mut cached = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now().timestamp();

        if let Some(token) = cached.as_ref() {
            if now - token.issued_at < TOKEN_REFRESH_SECS {
                return Ok(token.value.clone());
            }
        }

        let value = self.sign(now)?;
        debug!("APNs provider token refreshed");
        *cached = Some(ProviderToken {
            value: value.clone(),
            issued_at: now,
        });

        Ok(value)
    }

    fn topic<'a>(&'a self, request: &'a DeliveryRequest) -> &'a str {
        if request.bundle_id.is_empty() {
            &self.config.bundle_id
        } else {
            &request.bundle_id
        }
    }
}

#[async_trait]
impl PushGateway for ApnsGateway {
    async fn send(&self, request: &DeliveryRequest) -> Result<(), PushError> {
        let body = serde_json::to_vec(&request.payload())?;
        let token = self.provider_token()?;
        let url = format!("{}/3/device/{}", self.host, request.token);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("apns-topic", self.topic(request))
            .header("apns-push-type", "alert")
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason = match response.json::<ApnsErrorBody>().await {
            Ok(body) => body.reason,
            Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
        };

        Err(PushError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }

    fn name(&self) -> &str {
        "apns"
    }
}

/// 按配置构建 APNs 网关
pub struct ApnsFactory {
    config: ApnsConfig,
    timeout: Duration,
}

impl ApnsFactory {
    pub fn new(config: ApnsConfig, timeout: Duration) -> Self {
        Self { config, timeout }
    }
}

impl GatewayFactory for ApnsFactory {
    fn build(&self) -> Result<Arc<dyn PushGateway>, PushError> {
        let gateway = ApnsGateway::from_config(self.config.clone(), self.timeout)?;
        Ok(Arc::new(gateway))
    }
}
