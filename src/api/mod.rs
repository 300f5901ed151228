//! Engine surface: task definitions, the per-task engine, and the shell
//! that navigates between them.
//!
//! `TaskEngine` ties the layers together: form text goes in through the
//! validation gate, a debounced draw turns it into a transition plan, and
//! `render_frame` samples everything into backend-neutral primitives.

pub mod engine;
pub mod readout;
pub mod scene_builder;
pub mod shell;
pub mod snapshot;
pub mod surface;
pub mod task;

pub use engine::{EngineConfig, EngineMode, TaskEngine, TickOutcome};
pub use readout::Readout;
pub use scene_builder::build_frame;
pub use shell::{AppShell, INITIAL_CURSOR_TIMEOUT_MS, ShellState};
pub use snapshot::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1};
pub use surface::ChartSurface;
pub use task::{
    CAPITALIZED_INTEREST_ACCENT, FinanceModel, LOAN_ACCENT, SIMPLE_INTEREST_ACCENT, TaskSpec,
};
