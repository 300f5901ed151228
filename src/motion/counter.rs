use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::motion::ramp::LinearRamp;

/// Seed values for a counter run, carried over from whatever the readout
/// showed when the previous run was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CounterStart {
    pub value: f64,
    pub annotation: f64,
}

/// Instantaneous readout numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterSample {
    pub value: f64,
    pub annotation: f64,
    pub annotation_visible: bool,
}

/// Number animation that tracks the bar choreography.
///
/// Two ramps share one clock: the answer itself and its profit annotation.
/// A redraw replaces the whole animation, so at most one run owns the
/// readout at a time; its start is whatever the old run last showed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterAnimation {
    value_ramp: LinearRamp,
    annotation_ramp: LinearRamp,
}

impl CounterAnimation {
    pub fn new(
        start: CounterStart,
        target_value: f64,
        target_annotation: f64,
        hold_ms: f64,
        total_ms: f64,
    ) -> EngineResult<Self> {
        Ok(Self {
            value_ramp: LinearRamp::new(start.value, target_value, hold_ms, total_ms)?,
            annotation_ramp: LinearRamp::new(
                start.annotation,
                target_annotation,
                hold_ms,
                total_ms,
            )?,
        })
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.value_ramp.end_ms()
    }

    #[must_use]
    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.total_ms()
    }

    /// Samples both ramps. The annotation is floored at zero and hidden
    /// when nothing positive remains (loan targets ramp it negative).
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> CounterSample {
        let annotation = self.annotation_ramp.value_at(elapsed_ms).max(0.0);
        CounterSample {
            value: self.value_ramp.value_at(elapsed_ms),
            annotation,
            annotation_visible: annotation > 0.0,
        }
    }
}
