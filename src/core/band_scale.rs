use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Discrete band scale assigning one slot per period index.
///
/// Follows the d3 `scaleBand` layout model: the range splits into uniform
/// steps, bands cover `1 - padding_inner` of each step, and `align` places
/// the leftover outer space (0.5 centers the bands).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> EngineResult<Self> {
        if count == 0 {
            return Err(EngineError::InvalidData(
                "band scale needs at least one band".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(EngineError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            count,
            range_start: range.0,
            range_end: range.1,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        })
    }

    /// Sets inner and outer padding to the same ratio (d3 `.padding(p)`).
    pub fn with_padding(mut self, padding: f64) -> EngineResult<Self> {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(EngineError::InvalidData(
                "band padding must be in [0, 1)".to_owned(),
            ));
        }
        self.padding_inner = padding;
        self.padding_outer = padding;
        Ok(self)
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn step(self) -> f64 {
        let slots = (self.count as f64 - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        (self.range_end - self.range_start) / slots
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn origin(self) -> f64 {
        let extent = self.range_end - self.range_start;
        let used = self.step() * (self.count as f64 - self.padding_inner);
        self.range_start + (extent - used) * self.align
    }

    /// Left edge of the band for `index`.
    pub fn position(self, index: usize) -> EngineResult<f64> {
        if index >= self.count {
            return Err(EngineError::InvalidData(format!(
                "band index {index} out of range (count {})",
                self.count
            )));
        }
        Ok(self.origin() + self.step() * index as f64)
    }

    /// Horizontal center of the band for `index` (tick label anchor).
    pub fn center(self, index: usize) -> EngineResult<f64> {
        Ok(self.position(index)? + self.bandwidth() / 2.0)
    }
}
