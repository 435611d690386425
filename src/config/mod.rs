pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{AppConfig, AuthConfig, DatabaseConfig, Environment, GeneralConfig, LoggingConfig};
pub use envconfig::EnvConfig;
