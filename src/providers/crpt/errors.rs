// Standard library
use std::path::PathBuf;

// 3rd party crates
use reqwest::StatusCode;
use thiserror::Error;

/// Custom error type for CRPT operations.
#[derive(Debug, Error)]
pub enum CrptError {
    #[error("HTTP client error: {0}")]
    HttpClientBuild(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Document signature is empty")]
    MissingSignature,

    #[error("Failed to send document '{doc_id}': {message}")]
    RequestFailed { doc_id: String, message: String },

    #[error("Unauthorized to create document '{0}'")]
    Unauthorized(String),

    #[error("Rate limit exceeded by the API for document '{0}'")]
    RateLimited(String),

    #[error("Unexpected response status for document '{doc_id}': HTTP {status} - {body}")]
    UnexpectedStatus {
        doc_id: String,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse response for document '{doc_id}': {message}")]
    InvalidResponse { doc_id: String, message: String },

    #[error("Failed to load document from {path:?}: {message}")]
    DocumentLoad { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum CrptValidationError {
    #[error("Invalid API url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("API url must use https or http, got '{0}'")]
    UnsupportedScheme(String),
    #[error("Request timeout must be greater than 0")]
    InvalidTimeout,
    #[error("API token is set but empty")]
    EmptyApiToken,
}
