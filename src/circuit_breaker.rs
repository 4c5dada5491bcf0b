//! # Circuit Breaker Module
//!
//! Stops sending requests to an outbound service after repeated failures, so
//! a burst of concurrent lookups against a dead service fails fast instead of
//! waiting on every timeout.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::RecoveryConfig;

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Circuit breaker shared by all requests of one client
///
/// - **Closed**: requests pass through
/// - **Open**: `circuit_breaker_threshold` consecutive failures were recorded;
///   requests are rejected until `circuit_breaker_reset_secs` have elapsed
/// - after the reset period the breaker closes again and the next failure
///   count starts from zero
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// ```rust
    /// use pantry::circuit_breaker::CircuitBreaker;
    /// use pantry::config::RecoveryConfig;
    ///
    /// let breaker = CircuitBreaker::new(&RecoveryConfig::default());
    /// assert!(!breaker.is_open());
    /// ```
    pub fn new(config: &RecoveryConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold: config.circuit_breaker_threshold.max(1),
            reset_after: Duration::from_secs(config.circuit_breaker_reset_secs),
        }
    }

    /// Whether requests should currently be rejected
    pub fn is_open(&self) -> bool {
        let mut state = self.lock();
        match state.opened_at {
            Some(opened_at) if opened_at.elapsed() < self.reset_after => true,
            Some(_) => {
                info!("Circuit breaker reset period elapsed, closing");
                *state = BreakerState::default();
                false
            }
            None => false,
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.lock();
        state.consecutive_failures += 1;
        if state.consecutive_failures >= self.threshold && state.opened_at.is_none() {
            warn!(failures = state.consecutive_failures, "Circuit breaker opened");
            state.opened_at = Some(Instant::now());
        }
    }

    pub fn record_success(&self) {
        *self.lock() = BreakerState::default();
    }

    // A poisoned lock only means another request panicked mid-update; the
    // counters are still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, reset_secs: u64) -> CircuitBreaker {
        CircuitBreaker::new(&RecoveryConfig {
            circuit_breaker_threshold: threshold,
            circuit_breaker_reset_secs: reset_secs,
            ..Default::default()
        })
    }

    #[test]
    fn test_opens_after_threshold() {
        let breaker = breaker(2, 60);
        assert!(!breaker.is_open());

        breaker.record_failure();
        assert!(!breaker.is_open());

        breaker.record_failure();
        assert!(breaker.is_open());
    }

    #[test]
    fn test_success_resets_failures() {
        let breaker = breaker(2, 60);
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        assert!(!breaker.is_open());
    }

    #[test]
    fn test_closes_after_reset_period() {
        let breaker = breaker(1, 0);
        breaker.record_failure();
        assert!(!breaker.is_open());
    }
}
