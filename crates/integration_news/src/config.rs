//! News search configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Chronicling America client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// API base URL (default: <https://chroniclingamerica.loc.gov>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://chroniclingamerica.loc.gov".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
