pub mod app;
pub mod loader;

pub use app::{AppConfig, DispatchConfig, LogFormat, LoggingConfig};
pub use loader::{ConfigLoader, ENV_PREFIX};
