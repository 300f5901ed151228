use serde::{Deserialize, Serialize};

use crate::input::validation::scan_readout_numbers;
use crate::motion::counter::CounterSample;

/// The numeric line under the answer label: a value plus a profit
/// annotation like `1150.00 (+150.00$)`.
///
/// The canonical `text` always carries both numbers so a readout can be
/// parsed back losslessly; `display_text` drops the annotation while it
/// has nothing positive to show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub value: f64,
    pub annotation: f64,
    pub annotation_visible: bool,
}

impl Readout {
    /// State before any counter has run: zeros, annotation hidden.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            value: 0.0,
            annotation: 0.0,
            annotation_visible: false,
        }
    }

    #[must_use]
    pub fn value_text(&self) -> String {
        format!("{:.2}", self.value)
    }

    #[must_use]
    pub fn annotation_text(&self) -> String {
        format!(" (+{:.2}$)", self.annotation)
    }

    /// Full readout line, annotation included even when hidden.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}{}", self.value_text(), self.annotation_text())
    }

    /// What a host should actually show.
    #[must_use]
    pub fn display_text(&self) -> String {
        if self.annotation_visible {
            self.text()
        } else {
            self.value_text()
        }
    }

    /// Recovers the two numbers from rendered readout text; anything
    /// missing falls back to zero.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let numbers = scan_readout_numbers(text);
        let value = numbers.first().copied().unwrap_or(0.0);
        let annotation = numbers.get(1).copied().unwrap_or(0.0);
        Self {
            value,
            annotation,
            annotation_visible: annotation > 0.0,
        }
    }
}

impl From<CounterSample> for Readout {
    fn from(sample: CounterSample) -> Self {
        Self {
            value: sample.value,
            annotation: sample.annotation,
            annotation_visible: sample.annotation_visible,
        }
    }
}
