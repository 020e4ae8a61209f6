//! Hydration calculation module
//!
//! Unit conversion, intake estimation, sip sizes, and reminder intervals.
//! Everything here is pure and works on immutable tables.

pub mod converter;
pub mod drink_amount;
pub mod gender;
pub mod input;
pub mod measure;
pub mod planner;
pub mod session;
pub mod sip;

pub use converter::{volume_from, volume_to, weight_from, weight_to};
pub use drink_amount::DrinkAmount;
pub use gender::GenderType;
pub use input::limit_number;
pub use measure::{detect_measure_system, LiquidUnit, MeasureSystem, WeightUnit};
pub use planner::{plan, plan_with_amount, HydrationPlan, HydrationRequest};
pub use session::{format_duration, round_to_nearest_session_time, SESSION_TIMES};
pub use sip::{description_for_size, ml_for_size, SipSize, SipSizeEntry, SIP_SIZES};
