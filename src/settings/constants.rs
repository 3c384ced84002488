/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Maximum number of document submissions per window
[rate_limit]
max_requests = 10
window_secs = 1

# CRPT API configuration
[crpt]
url = "https://ismp.crpt.ru/api/v3/lk/documents/create"
# Optional bearer token
# api_token = "your_api_token"
# Skip TLS certificate verification (only for test stands)
accept_invalid_certs = false
timeout_secs = 30

# Documents to submit on startup
[submission]
signature = "your_signature"
# Paths to JSON document files
documents = []
"#;

pub const CONFIG_PATH_ENV: &str = "CRPT_CONFIG_PATH";

pub const ENV_PREFIX: &str = "CRPT";

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_max_requests() -> u32 {
    10
}

pub fn default_window_secs() -> u64 {
    1
}
