use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::motion::easing::lerp;

/// Clamped hold-then-linear ramp.
///
/// Holds `start_value` until `hold_until_ms`, interpolates linearly to
/// `end_value` at `end_ms`, and stays there. Both readout ramps use this
/// shape so the numbers only start moving once their bars do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRamp {
    start_value: f64,
    end_value: f64,
    hold_until_ms: f64,
    end_ms: f64,
}

impl LinearRamp {
    pub fn new(
        start_value: f64,
        end_value: f64,
        hold_until_ms: f64,
        end_ms: f64,
    ) -> EngineResult<Self> {
        let finite = start_value.is_finite()
            && end_value.is_finite()
            && hold_until_ms.is_finite()
            && end_ms.is_finite();
        if !finite || hold_until_ms < 0.0 || end_ms < hold_until_ms {
            return Err(EngineError::InvalidData(format!(
                "ramp timing must satisfy 0 <= hold ({hold_until_ms}) <= end ({end_ms})"
            )));
        }
        Ok(Self {
            start_value,
            end_value,
            hold_until_ms,
            end_ms,
        })
    }

    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.end_ms
    }

    /// Ramp value at `elapsed_ms`, clamped to the plateau on both sides.
    #[must_use]
    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        if elapsed_ms <= self.hold_until_ms {
            return self.start_value;
        }
        if elapsed_ms >= self.end_ms {
            return self.end_value;
        }
        let t = (elapsed_ms - self.hold_until_ms) / (self.end_ms - self.hold_until_ms);
        lerp(self.start_value, self.end_value, t)
    }
}
