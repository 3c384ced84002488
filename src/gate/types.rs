// Standard library
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use serde::Deserialize;
use tokio::sync::{Mutex, Notify, OnceCell};
use tokio::task::JoinHandle;

/// Rate limiting configuration for the gate
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of admissions per time window
    pub max_requests: u32,
    /// Time window in seconds
    pub window_secs: u64,
}

/// Counter state guarded by the gate lock.
#[derive(Debug, Default)]
pub(crate) struct GateState {
    pub counter: u32,
    /// Bumped on every reset; parked callers wait for it to change.
    pub generation: u64,
}

#[derive(Debug)]
pub(crate) struct GateShared {
    pub state: Mutex<GateState>,
    pub reset: Notify,
    pub request_limit: u32,
    pub window: Duration,
}

/// Admission gate bounding a protected action to `request_limit` calls per
/// `window`, with all actions serialized under one lock.
///
/// Dropping the gate stops its reset ticker.
#[derive(Debug)]
pub struct RateLimitedGate {
    pub(crate) shared: Arc<GateShared>,
    pub(crate) ticker: JoinHandle<()>,
}

/// Holds the one gate of an application, constructing it on first use.
#[derive(Debug, Default)]
pub struct GateSlot {
    pub(crate) cell: OnceCell<Arc<RateLimitedGate>>,
}
