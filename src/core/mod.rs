//! Deterministic chart math: finance models, scales, layout, and the
//! projection from values to bar rectangles.
//!
//! Nothing in this module keeps time or touches a backend; everything is a
//! pure function of its inputs so the animation layer above can replay it.

pub mod band_scale;
pub mod finance;
pub mod layout;
pub mod linear_scale;
pub mod primitives;
pub mod projection;
pub mod types;

pub use band_scale::BandScale;
pub use finance::{
    CapitalizedInterestParams, LoanParams, MAX_PERIOD_COUNT, SimpleInterestParams,
    capitalized_interest_periods, capitalized_interest_sequence, capitalized_interest_value,
    loan_monthly_payment, loan_sequence, simple_interest_sequence, simple_interest_value,
};
pub use layout::{ChartLayout, GOLDEN_RATIO};
pub use linear_scale::LinearScale;
pub use projection::{BarGeometry, project_bars};
pub use types::{Margins, Viewport};
