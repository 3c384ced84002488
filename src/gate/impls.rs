// Standard library
use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use tokio::sync::{Mutex, Notify};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

// Current module imports
use super::errors::GateError;
use super::types::{GateShared, GateSlot, GateState, RateLimitConfig, RateLimitedGate};

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl RateLimitedGate {
    /// Creates a gate admitting `request_limit` callers per `window` and
    /// starts its reset ticker.
    ///
    /// The construction instant counts as the first reset; the ticker then
    /// fires every `window`. Must be called from within a tokio runtime.
    pub fn new(window: Duration, request_limit: u32) -> Result<Self, GateError> {
        if request_limit == 0 {
            return Err(GateError::InvalidLimit(request_limit));
        }
        if window.is_zero() {
            return Err(GateError::InvalidWindow(window));
        }

        let shared = Arc::new(GateShared {
            state: Mutex::new(GateState::default()),
            reset: Notify::new(),
            request_limit,
            window,
        });

        let ticker = tokio::spawn(run_ticker(Arc::clone(&shared)));

        info!(
            limit = request_limit,
            window_ms = window.as_millis() as u64,
            "Rate limited gate started"
        );

        Ok(Self { shared, ticker })
    }

    pub fn from_config(config: &RateLimitConfig) -> Result<Self, GateError> {
        Self::new(config.window(), config.max_requests)
    }

    /// Admits the caller and runs `action` under the gate lock.
    ///
    /// The counter is incremented first; a caller pushing it past the limit
    /// parks until the next reset and is then admitted without counting
    /// again. The lock is held while `action` runs, so actions never overlap.
    /// A failed action is reported as [`GateError::OperationFailed`] and its
    /// admission is not refunded.
    pub async fn run_gated<F, Fut, T, E>(&self, action: F) -> Result<T, GateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let mut state = self.shared.state.lock().await;
        state.counter = state.counter.saturating_add(1);

        if state.counter > self.shared.request_limit {
            let generation = state.generation;
            debug!(
                counter = state.counter,
                limit = self.shared.request_limit,
                "Request limit reached, awaiting window reset"
            );

            // Register for the wake-up before unlocking so a reset between
            // the unlock and the await cannot be missed.
            while state.generation == generation {
                let notified = self.shared.reset.notified();
                tokio::pin!(notified);
                notified.as_mut().enable();
                drop(state);
                notified.await;
                state = self.shared.state.lock().await;
            }

            trace!("Admitted after window reset");
        }

        let result = action().await;
        drop(state);

        result.map_err(|e| GateError::OperationFailed(e.into()))
    }

    /// Number of admissions counted in the current window.
    pub async fn current_count(&self) -> u32 {
        self.shared.state.lock().await.counter
    }

    pub fn request_limit(&self) -> u32 {
        self.shared.request_limit
    }

    pub fn window(&self) -> Duration {
        self.shared.window
    }
}

impl Drop for RateLimitedGate {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

impl GateShared {
    /// Zeroes the counter and wakes every parked caller.
    async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.counter = 0;
        state.generation = state.generation.wrapping_add(1);
        self.reset.notify_waiters();
        trace!(generation = state.generation, "Request limits refreshed");
    }
}

/// Resets the gate at every window boundary until the gate is dropped.
async fn run_ticker(shared: Arc<GateShared>) {
    let mut interval = interval_at(Instant::now() + shared.window, shared.window);
    // A tick that could not take the lock in time is delayed, not bursted.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        shared.reset().await;
    }
}

impl GateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the gate, constructing it from `config` on the first call.
    ///
    /// Later calls ignore `config` and hand out the same gate without
    /// touching its window. A failed construction leaves the slot empty.
    pub async fn get_or_init(
        &self,
        config: &RateLimitConfig,
    ) -> Result<Arc<RateLimitedGate>, GateError> {
        self.cell
            .get_or_try_init(|| async { RateLimitedGate::from_config(config).map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<RateLimitedGate>> {
        self.cell.get().cloned()
    }
}
