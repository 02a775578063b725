use config::{Config as ConfigLib, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the upstream follow service, including any path prefix.
    pub follow_service_url: String,
    /// Default log filter; `RUST_LOG` wins when set.
    pub log_level: String,
}

impl AppConfig {
    pub fn address(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Failed to parse server address")
    }

    pub fn new() -> Result<Self, ConfigError> {
        let s = ConfigLib::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 4000)?
            .set_default("follow_service_url", "http://localhost:3000/api/v1")?
            .set_default("log_level", "info")?
            // Optional file overrides, then plain environment variables:
            // PORT, HOST, FOLLOW_SERVICE_URL, LOG_LEVEL.
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::default())
            .build()?;

        s.try_deserialize()
    }
}

// Global application configuration instance
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::new().expect("Failed to load application configuration")
});
