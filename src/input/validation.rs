use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::decimal_to_f64;
use crate::error::{EngineError, EngineResult};

static STRICT_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+([.,]\d+)?$").expect("regex strict decimal"));
static PARTIAL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*([.,]\d*)?$").expect("regex partial decimal"));
static STRICT_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("regex strict integer"));
static PARTIAL_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*$").expect("regex partial integer"));
static NUMBER_SCAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+([.,]\d+)?").expect("regex number scan"));

/// What a form field accepts. Two gates per kind: a lax per-keystroke
/// pattern so values can be typed through intermediate states ("12.",
/// ""), and a strict full-field pattern that must hold before a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Unsigned decimal, comma or dot separator ("12.5", "12,5").
    Decimal,
    /// Unsigned whole number.
    Integer,
}

impl FieldKind {
    /// Whether `text` is an acceptable in-progress value. Rejected
    /// keystrokes are dropped by the form without surfacing an error.
    #[must_use]
    pub fn accepts_keystroke(&self, text: &str) -> bool {
        match self {
            Self::Decimal => PARTIAL_DECIMAL.is_match(text),
            Self::Integer => PARTIAL_INTEGER.is_match(text),
        }
    }

    /// Whether `text` is a finished value a draw may consume.
    #[must_use]
    pub fn is_complete(&self, text: &str) -> bool {
        match self {
            Self::Decimal => STRICT_DECIMAL.is_match(text),
            Self::Integer => STRICT_INTEGER.is_match(text),
        }
    }

    /// Parses a complete value, normalizing "," to "." first. Goes
    /// through `Decimal` so money text keeps its exact digits until the
    /// final conversion.
    pub fn parse(&self, text: &str) -> EngineResult<f64> {
        if !self.is_complete(text) {
            return Err(EngineError::InvalidData(format!(
                "`{text}` is not a complete {} value",
                self.name()
            )));
        }
        let normalized = text.replace(',', ".");
        let decimal: Decimal = normalized.parse().map_err(|err| {
            EngineError::InvalidData(format!("`{text}` does not fit a decimal: {err}"))
        })?;
        decimal_to_f64(decimal, "field value")
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Integer => "integer",
        }
    }
}

/// Pulls every number out of rendered readout text, in order.
///
/// A readout line like `"1150.00 (+150.00$)"` yields `[1150.0, 150.0]`;
/// text with no numbers yields an empty vector and callers fall back to 0.
#[must_use]
pub fn scan_readout_numbers(text: &str) -> SmallVec<[f64; 2]> {
    NUMBER_SCAN
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .collect()
}
