//! interest-rs: deterministic engine for animated financial bar charts.
//!
//! Three classroom finance models (simple interest, capitalized interest,
//! loan amortization) feed a headless chart pipeline: regex-gated text
//! fields, debounced redraws, enter/update/exit bar transitions with
//! logarithmic stagger, and a counting readout synchronized to the bars.
//! Hosts drive everything with an explicit `now_ms` clock and receive
//! backend-neutral frames; `SvgRenderer` turns them into documents,
//! `NullRenderer` keeps tests headless.

pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod motion;
pub mod render;
pub mod telemetry;

pub use api::{AppShell, EngineConfig, EngineMode, EngineSnapshot, TaskEngine, TaskSpec};
pub use error::{EngineError, EngineResult};
pub use render::{NullRenderer, Renderer, SvgRenderer};
