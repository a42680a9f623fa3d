//! User directory configuration

use serde::{Deserialize, Serialize};

/// User directory backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Provider name ("appwrite" or "memory")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Appwrite API endpoint, including the `/v1` suffix
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Appwrite project identifier
    #[serde(default)]
    pub project_id: String,

    /// Appwrite server API key
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Accounts the memory provider creates at startup
    #[serde(default)]
    pub seed_users: Vec<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: default_endpoint(),
            project_id: String::new(),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            seed_users: Vec::new(),
        }
    }
}

fn default_provider() -> String {
    String::from("memory")
}

fn default_endpoint() -> String {
    String::from("https://cloud.appwrite.io/v1")
}

fn default_request_timeout_secs() -> u64 {
    10
}
