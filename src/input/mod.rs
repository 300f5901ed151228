//! Text-side of the engine: field validation gates, form state, and the
//! debounce timer that separates typing from drawing.

pub mod debounce;
pub mod form;
pub mod validation;

pub use debounce::{DEFAULT_DEBOUNCE_MS, DebounceTimer};
pub use form::{FieldSpec, FieldValues, FormState};
pub use validation::{FieldKind, scan_readout_numbers};
