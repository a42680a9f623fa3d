//! Email provider configuration

use serde::{Deserialize, Serialize};

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("resend" or "mock")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Provider API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Sender address, e.g. `RoomRent <no-reply@roomrent.app>`
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Provider API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum send attempts per message
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (doubles per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            from_address: default_from_address(),
            base_url: default_base_url(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_from_address() -> String {
    String::from("RoomRent <no-reply@roomrent.app>")
}

fn default_base_url() -> String {
    String::from("https://api.resend.com")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}
