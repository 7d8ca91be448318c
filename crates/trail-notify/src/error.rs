use thiserror::Error;

/// 推送错误
///
/// 调度器对外只返回成功/失败，这里的分类用于日志。
#[derive(Error, Debug)]
pub enum PushError {
    /// 配置错误（密钥缺失、无法读取或格式不对）
    #[error("Configuration error: {0}")]
    Config(String),

    /// 网络/传输错误
    #[error("Transport error: {0}")]
    Transport(String),

    /// 网关响应超时
    #[error("Gateway did not respond in time")]
    Timeout,

    /// 网关拒绝
    #[error("Rejected by gateway ({status}): {reason}")]
    Rejected { status: u16, reason: String },

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 运行时错误
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl PushError {
    pub fn config(msg: impl Into<String>) -> Self {
        PushError::Config(msg.into())
    }

    /// 用于日志的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            PushError::Config(_) => "config",
            PushError::Transport(_) => "transport",
            PushError::Timeout => "timeout",
            PushError::Rejected { .. } => "rejected",
            PushError::Serialization(_) => "serialization",
            PushError::Runtime(_) => "runtime",
        }
    }
}

impl From<reqwest::Error> for PushError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PushError::Timeout
        } else {
            PushError::Transport(e.to_string())
        }
    }
}

impl From<jsonwebtoken::errors::Error> for PushError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        PushError::Config(format!("invalid signing key: {}", e))
    }
}
