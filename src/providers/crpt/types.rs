// Standard library
use std::sync::Arc;

// 3rd party crates
use reqwest::Client;
use serde::Deserialize;

// Project imports
use crate::gate::RateLimitedGate;
use crate::providers::DocumentTransport;

// Current module imports
use super::constants::{default_timeout_secs, default_url};

/// Configuration for CRPT API interactions.
#[derive(Debug, Deserialize, Clone)]
pub struct CrptConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Optional bearer token sent with every submission.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Skip TLS certificate and hostname verification.
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// HTTP transport posting documents to the CRPT API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    pub url: String,
    pub client: Client,
}

/// Rate limited client for the CRPT API.
#[derive(Clone)]
pub struct CrptApi {
    pub gate: Arc<RateLimitedGate>,
    pub transport: Arc<dyn DocumentTransport>,
}
