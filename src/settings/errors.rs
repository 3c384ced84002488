// 3rd party crates
use thiserror::Error;

// Project imports
use crate::providers::crpt::errors::CrptValidationError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
    #[error("Rate limit max_requests must be greater than 0")]
    InvalidMaxRequests,
    #[error("Rate limit window_secs must be greater than 0")]
    InvalidWindow,
    #[error("A signature is required when documents are configured")]
    MissingSignature,
    #[error("CRPT configuration error: {0}")]
    CrptConfig(#[from] CrptValidationError),
}
