use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Linear mapping from a value domain onto an explicit output range.
///
/// The range is explicit (rather than derived from a viewport) so one domain
/// can drive both bar heights (`[0, plot_height]`) and the inverted axis
/// rendering (`[plot_height, 0]`).
///
/// An empty-span domain is allowed and maps every value to the range
/// midpoint, matching the original charting library's behavior for constant
/// sequences (e.g. simple interest at 0%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> EngineResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(EngineError::InvalidData(format!(
                    "scale {name} must be finite"
                )));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Same domain with the range ends swapped (axis orientation flip).
    #[must_use]
    pub fn inverted(self) -> Self {
        Self {
            range_start: self.range_end,
            range_end: self.range_start,
            ..self
        }
    }

    pub fn map(self, value: f64) -> EngineResult<f64> {
        if !value.is_finite() {
            return Err(EngineError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn unmap(self, position: f64) -> EngineResult<f64> {
        if !position.is_finite() {
            return Err(EngineError::InvalidData(
                "position must be finite".to_owned(),
            ));
        }

        let extent = self.range_end - self.range_start;
        if extent == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (position - self.range_start) / extent;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values covering the domain, roughly `target_count` of them.
    ///
    /// Steps are powers of ten refined by 1/2/5, so labels stay short.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        if lo == hi {
            return vec![lo];
        }

        let step = tick_step(lo, hi, target_count.max(1));
        if step <= 0.0 || !step.is_finite() {
            return vec![lo, hi];
        }

        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        let mut ticks = Vec::new();
        let mut index = first;
        while index <= last {
            ticks.push(index * step);
            index += 1.0;
        }
        ticks
    }
}

fn tick_step(lo: f64, hi: f64, target_count: usize) -> f64 {
    let span = hi - lo;
    let raw = span / target_count as f64;
    let magnitude = 10.0f64.powf(raw.log10().floor());
    let residual = raw / magnitude;

    // Same 1/2/5/10 refinement ladder d3 uses (sqrt thresholds).
    let factor = if residual >= 7.071 {
        10.0
    } else if residual >= 3.162 {
        5.0
    } else if residual >= 1.414 {
        2.0
    } else {
        1.0
    };
    magnitude * factor
}
