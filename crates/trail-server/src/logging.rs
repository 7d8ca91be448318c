use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;
use trail_config::{LogFormat, LoggingConfig};

/// 初始化日志；设置了 RUST_LOG 时以环境变量为准
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow!("invalid log level {}: {}", config.level, e))?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
