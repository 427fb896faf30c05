//! Leading-edge debounce for high-frequency events.
//!
//! The first call fires immediately. Each call, fired or not, restarts the
//! quiet window; the next call fires only once `wait_ms` has passed since the
//! previous call. A steady stream of scroll events closer together than the
//! window therefore fires once, at its start.
//!
//! Time is passed in rather than read, so the same logic runs against the
//! browser clock and against a test clock.

#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: f64,
    last_call: Option<f64>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: f64::from(wait_ms),
            last_call: None,
        }
    }

    /// Record a call at `now_ms` and report whether it should run.
    pub fn should_fire(&mut self, now_ms: f64) -> bool {
        let fire = match self.last_call {
            None => true,
            Some(last) => now_ms - last >= self.wait_ms,
        };
        self.last_call = Some(now_ms);
        fire
    }
}
