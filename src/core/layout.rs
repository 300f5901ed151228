use serde::{Deserialize, Serialize};

use crate::core::types::{Margins, Viewport};
use crate::error::{EngineError, EngineResult};

pub const GOLDEN_RATIO: f64 = 1.618;

const DEFAULT_BOX_WIDTH: f64 = 900.0;
const DEFAULT_MARGINS: Margins = Margins::new(20.0, 40.0, 20.0, 20.0);

/// Fixed chart-box geometry shared by every task instance.
///
/// The box height follows from the width via the golden ratio; the plot area
/// is the box minus the axis margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default = "default_box_width")]
    pub box_width: f64,
    #[serde(default = "default_margins")]
    pub margins: Margins,
}

fn default_box_width() -> f64 {
    DEFAULT_BOX_WIDTH
}

fn default_margins() -> Margins {
    DEFAULT_MARGINS
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            box_width: DEFAULT_BOX_WIDTH,
            margins: DEFAULT_MARGINS,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn with_box_width(mut self, box_width: f64) -> Self {
        self.box_width = box_width;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn box_height(self) -> f64 {
        self.box_width / GOLDEN_RATIO
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.box_width, self.box_height())
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.box_width - (self.margins.left + self.margins.right)
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.box_height() - (self.margins.top + self.margins.bottom)
    }

    pub fn validate(self) -> EngineResult<()> {
        if !self.viewport().is_valid() {
            return Err(EngineError::InvalidViewport {
                width: self.box_width,
                height: self.box_height(),
            });
        }
        if !self.margins.is_valid() {
            return Err(EngineError::InvalidData(
                "layout margins must be finite and >= 0".to_owned(),
            ));
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(EngineError::InvalidData(
                "layout margins leave no plot area".to_owned(),
            ));
        }
        Ok(())
    }
}
