use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::layout::ChartLayout;
use crate::core::projection::BarGeometry;
use crate::error::{EngineError, EngineResult};
use crate::render::Renderer;

use super::engine::{EngineMode, TaskEngine};
use super::readout::Readout;

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
///
/// Everything time-dependent (bars, readout, `animating`) is sampled at the
/// `now_ms` the snapshot was taken with, so two snapshots at the same clock
/// compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub task: String,
    pub mode: EngineMode,
    pub layout: ChartLayout,
    pub draw_count: u64,
    pub fields: IndexMap<String, String>,
    pub sequence: Vec<f64>,
    pub bars: Vec<BarGeometry>,
    pub readout: Option<Readout>,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> EngineResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            EngineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> EngineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            EngineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(EngineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> TaskEngine<R> {
    /// Captures deterministic engine state at `now_ms`.
    #[must_use]
    pub fn snapshot(&self, now_ms: f64) -> EngineSnapshot {
        let sequence = self
            .scales()
            .map(|scales| scales.sequence.clone())
            .unwrap_or_default();
        let readout = match self.mode() {
            EngineMode::Interactive => Some(self.current_readout(now_ms)),
            EngineMode::ChartOnly => None,
        };
        EngineSnapshot {
            task: self.spec().name.clone(),
            mode: self.mode(),
            layout: self.config().layout,
            draw_count: self.draw_count(),
            fields: self
                .form()
                .iter()
                .map(|(key, text)| (key.to_owned(), text.to_owned()))
                .collect(),
            sequence,
            bars: self.surface().rendered_bars(now_ms),
            readout,
            animating: self.is_animating(now_ms),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self, now_ms: f64) -> EngineResult<String> {
        self.snapshot(now_ms).to_json_contract_v1_pretty()
    }
}
