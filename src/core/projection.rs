use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::linear_scale::LinearScale;
use crate::error::{EngineError, EngineResult};

/// Plot-space rectangle for one period bar.
///
/// `index` is the period the bar represents; it doubles as the join key
/// when two plans are diffed, so it survives resizes and data edits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Same bar collapsed onto the baseline, used as the start of an
    /// enter tween and the end of an exit tween.
    #[must_use]
    pub fn collapsed(&self, plot_height: f64) -> Self {
        Self {
            index: self.index,
            x: self.x,
            y: plot_height,
            width: self.width,
            height: 0.0,
        }
    }
}

/// Maps one value per period onto bar rectangles.
///
/// `y_scale` is expected to run top-down (range `[plot_height, 0]`), so a
/// value at the domain start yields a zero-height bar on the baseline and a
/// value at the domain end fills the plot.
pub fn project_bars(
    values: &[f64],
    band: &BandScale,
    y_scale: &LinearScale,
    plot_height: f64,
) -> EngineResult<Vec<BarGeometry>> {
    if band.count() != values.len() {
        return Err(EngineError::InvalidData(format!(
            "band scale covers {} slots but {} values were supplied",
            band.count(),
            values.len()
        )));
    }
    if !plot_height.is_finite() || plot_height <= 0.0 {
        return Err(EngineError::InvalidData(format!(
            "plot height {plot_height} must be finite and > 0"
        )));
    }

    let width = band.bandwidth();
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !value.is_finite() {
                return Err(EngineError::InvalidData(format!(
                    "value at period {index} is not finite"
                )));
            }
            let top = y_scale.map(value)?;
            Ok(BarGeometry {
                index,
                x: band.position(index)?,
                y: top,
                width,
                height: plot_height - top,
            })
        })
        .collect()
}
