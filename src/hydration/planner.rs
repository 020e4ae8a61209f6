//! Hydration plan pipeline
//!
//! Locale + gender + weight in, recommended daily amount and reminder
//! interval out. Each step is one of the pure functions in this module's
//! siblings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::converter::{volume_to, weight_from, weight_to};
use super::drink_amount::{self, DrinkAmount};
use super::gender::GenderType;
use super::measure::{detect_measure_system, LiquidUnit, MeasureSystem, WeightUnit};
use super::session::{self, format_duration};
use super::sip::SipSize;

/// Inputs collected by the welcome wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HydrationRequest {
    /// Locale such as "en-US"; used only when `weight_system` is absent
    pub locale: Option<String>,
    pub gender: GenderType,
    /// Body weight in `weight_system` units; gender default when absent
    pub weight: Option<f64>,
    pub weight_system: Option<MeasureSystem>,
    pub sip_size: SipSize,
}

/// Everything the wizard shows once the user has answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationPlan {
    pub measure_system: MeasureSystem,
    pub gender: GenderType,
    pub weight_kg: f64,
    pub weight_display: f64,
    pub weight_unit: WeightUnit,
    pub drink_amount: DrinkAmount,
    pub drink_amount_display: f64,
    pub liquid_unit: LiquidUnit,
    pub sip_size: SipSize,
    pub sip_ml: u32,
    pub sip_description: String,
    pub session_minutes: u32,
    pub session_label: String,
}

/// Run the full computation for one request
pub fn plan(request: &HydrationRequest) -> HydrationPlan {
    let system = request
        .weight_system
        .unwrap_or_else(|| detect_measure_system(request.locale.as_deref()));

    let weight_kg = match request.weight {
        Some(w) => weight_from(w, system),
        None => request.gender.default_weight_kg(),
    };

    let amount = DrinkAmount::from_estimate(drink_amount::calc(request.gender, weight_kg));
    plan_with_amount(request.gender, weight_kg, system, amount, request.sip_size)
}

/// Recompute the interval after the user moves the amount selector
pub fn plan_with_amount(
    gender: GenderType,
    weight_kg: f64,
    system: MeasureSystem,
    amount: DrinkAmount,
    sip_size: SipSize,
) -> HydrationPlan {
    let entry = sip_size.entry();
    let session_minutes = session::calc(amount.selected as f64, sip_size.identifier());

    debug!(
        ?system,
        ?gender,
        weight_kg,
        selected_ml = amount.selected,
        session_minutes,
        "hydration plan"
    );

    HydrationPlan {
        measure_system: system,
        gender,
        weight_kg,
        weight_display: weight_to(weight_kg, system),
        weight_unit: system.weight_unit(),
        drink_amount: amount,
        drink_amount_display: volume_to(amount.selected as f64, system),
        liquid_unit: system.liquid_unit(),
        sip_size,
        sip_ml: entry.ml,
        sip_description: entry.description.to_string(),
        session_minutes,
        session_label: format_duration(session_minutes),
    }
}
