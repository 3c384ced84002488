//! Time-windowed admission gate.
//!
//! A [`RateLimitedGate`] admits at most `max_requests` callers per window and
//! runs every admitted action under one exclusive lock, so no two protected
//! actions ever overlap. Callers over the limit park until the background
//! ticker resets the counter at the next window boundary.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use crpt_api::gate::RateLimitedGate;
//!
//! # async fn example() -> Result<(), crpt_api::gate::GateError> {
//! let gate = RateLimitedGate::new(Duration::from_secs(1), 3)?;
//! let answer = gate
//!     .run_gated(|| async { Ok::<_, std::io::Error>(42) })
//!     .await?;
//! assert_eq!(answer, 42);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod impls;
pub mod types;

pub use errors::GateError;
pub use types::{GateSlot, RateLimitConfig, RateLimitedGate};
