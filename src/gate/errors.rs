// Standard library
use std::error::Error as StdError;
use std::time::Duration;

// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Request limit must be greater than 0, got {0}")]
    InvalidLimit(u32),

    #[error("Window must be greater than 0, got {0:?}")]
    InvalidWindow(Duration),

    /// The protected action failed; the original cause is kept as the source.
    #[error("Operation failed: {0}")]
    OperationFailed(#[source] Box<dyn StdError + Send + Sync>),
}
