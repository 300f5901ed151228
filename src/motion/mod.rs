//! Time-parameterized animation machinery: easing, stagger delays, bar
//! transition plans, and the synchronized readout counter.
//!
//! Everything here is sampled with an explicit `elapsed_ms`; no module owns
//! a clock. The engine advances time and asks these types where things are.

pub mod counter;
pub mod easing;
pub mod ramp;
pub mod stagger;
pub mod transition;

pub use counter::{CounterAnimation, CounterSample, CounterStart};
pub use easing::{cubic_in_out, lerp};
pub use ramp::LinearRamp;
pub use stagger::{STAGGER_LOG_BASE, STAGGER_STEP_MS, stagger_delay_ms};
pub use transition::{
    BarTween, DEFAULT_ANIMATION_MS, DEFAULT_REMOVE_MS, TransitionPlan, TransitionTiming,
    TweenKind,
};
