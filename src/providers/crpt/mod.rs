//! Client for the CRPT document registration API.
//!
//! [`types::CrptApi`] submits a [`models::Document`] through the shared
//! [`RateLimitedGate`](crate::gate::RateLimitedGate), so every submission is
//! counted against the configured window and no two submissions are in
//! flight at once.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod models;
pub mod types;
