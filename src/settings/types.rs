// Standard library
use std::path::PathBuf;
use std::sync::Arc;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::RwLock;

// Project imports
use crate::gate::RateLimitConfig;
use crate::providers::crpt::types::CrptConfig;

// Current module imports
use super::constants::{default_log_level, default_max_requests, default_window_secs};

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Submission {
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub documents: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default = "default_rate_limit")]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub crpt: CrptConfig,
    #[serde(default)]
    pub submission: Submission,
}

fn default_rate_limit() -> RateLimitConfig {
    RateLimitConfig {
        max_requests: default_max_requests(),
        window_secs: default_window_secs(),
    }
}

/// Settings that passed validation.
#[derive(Debug)]
pub struct ValidatedSettings(pub(super) Settings);

/// Manages the application settings, allowing for loading and reloading configurations.
pub struct ConfigManager {
    pub settings: Arc<RwLock<Settings>>,
    pub config_path: PathBuf,
}
