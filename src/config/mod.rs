pub mod env;
mod loader;

pub use env::{AppConfig, ConfigError, DirectoryConfig, LoggingConfig, ReportConfig, TrendConfig};
pub use loader::load_config;
