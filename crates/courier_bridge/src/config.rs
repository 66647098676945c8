use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // NATS configuration
    /// NATS server URL
    #[serde(default = "default_nats_url")]
    pub nats_url: String,

    /// Queue topic carrying work item payloads
    #[serde(default = "default_queue_topic")]
    pub queue_topic: String,

    // Remote service configuration
    /// Endpoint of the remote streaming service
    #[serde(default = "default_remote_endpoint")]
    pub remote_endpoint: String,

    /// Startup timeout for connection establishment in seconds
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_nats_url() -> String {
    "nats://localhost:4222".to_string()
}

fn default_queue_topic() -> String {
    "my_queue".to_string()
}

fn default_remote_endpoint() -> String {
    "http://localhost:8088".to_string()
}

fn default_startup_timeout_secs() -> u64 {
    30
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("COURIER"))
            .build()?
            .try_deserialize()
    }
}
