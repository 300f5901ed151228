use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Milliseconds a redraw waits after the last accepted keystroke.
pub const DEFAULT_DEBOUNCE_MS: f64 = 250.0;

/// Trailing-edge debounce over an explicit clock.
///
/// Every `arm` pushes the deadline out again, so only the last edit in a
/// burst triggers work. `fire` reports true exactly once per armed
/// deadline; the owner supplies `now_ms` on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebounceTimer {
    delay_ms: f64,
    deadline_ms: Option<f64>,
}

impl DebounceTimer {
    pub fn new(delay_ms: f64) -> EngineResult<Self> {
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(EngineError::InvalidData(format!(
                "debounce delay {delay_ms} must be finite and >= 0"
            )));
        }
        Ok(Self {
            delay_ms,
            deadline_ms: None,
        })
    }

    /// Schedules (or reschedules) the deadline at `now_ms + delay`.
    pub fn arm(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    #[must_use]
    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// True when the deadline has passed; disarms on fire.
    pub fn fire(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DebounceTimer;

    #[test]
    fn fires_once_after_the_deadline() {
        let mut timer = DebounceTimer::new(250.0).expect("timer");
        timer.arm(1000.0);

        assert!(!timer.fire(1100.0));
        assert!(timer.fire(1250.0));
        assert!(!timer.fire(1300.0));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearming_pushes_the_deadline_out() {
        let mut timer = DebounceTimer::new(250.0).expect("timer");
        timer.arm(0.0);
        timer.arm(200.0);

        assert!(!timer.fire(250.0));
        assert!(timer.fire(450.0));
    }

    #[test]
    fn cancel_disarms() {
        let mut timer = DebounceTimer::new(250.0).expect("timer");
        timer.arm(0.0);
        timer.cancel();
        assert!(!timer.fire(10_000.0));
    }

    #[test]
    fn zero_delay_fires_on_the_same_tick() {
        let mut timer = DebounceTimer::new(0.0).expect("timer");
        timer.arm(42.0);
        assert!(timer.fire(42.0));
    }

    #[test]
    fn negative_or_nan_delay_is_rejected() {
        assert!(DebounceTimer::new(-1.0).is_err());
        assert!(DebounceTimer::new(f64::NAN).is_err());
    }
}
