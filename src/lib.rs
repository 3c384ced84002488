//! Rate limited client for the CRPT document registration API.
//!
//! Every document submission passes through one
//! [`RateLimitedGate`](gate::RateLimitedGate): at most `max_requests`
//! submissions are admitted per window, later callers wait for the next
//! window, and submissions never run concurrently.

pub mod functions;
pub mod gate;
pub mod providers;
pub mod settings;
