//! Hydration MCP Tools
//!
//! Thin wrappers that parse tool arguments and call the hydration engine.

use serde::Serialize;

use crate::hydration::{
    self, converter, detect_measure_system, drink_amount, session, DrinkAmount, GenderType,
    HydrationPlan, HydrationRequest, LiquidUnit, MeasureSystem, SipSize, WeightUnit,
};

/// Response for detect_measure_system
#[derive(Debug, Serialize)]
pub struct MeasureSystemResponse {
    pub locale: Option<String>,
    pub measure_system: MeasureSystem,
    pub weight_unit: WeightUnit,
    pub liquid_unit: LiquidUnit,
}

/// Response for convert_weight / convert_volume
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub input: f64,
    pub input_unit: &'static str,
    pub output: f64,
    pub output_unit: &'static str,
}

/// Response for gender_profile
#[derive(Debug, Serialize)]
pub struct GenderProfileResponse {
    pub gender: GenderType,
    pub default_weight_kg: f64,
    pub image_key: &'static str,
    pub ml_per_kg: f64,
}

/// Response for calculate_drink_amount
#[derive(Debug, Serialize)]
pub struct DrinkAmountResponse {
    pub gender: GenderType,
    pub weight_kg: f64,
    pub estimate_ml: f64,
    pub drink_amount: DrinkAmount,
}

/// One sip size with its volume in the caller's system
#[derive(Debug, Serialize)]
pub struct SipSizeSummary {
    pub id: &'static str,
    pub ml: u32,
    pub display_volume: f64,
    pub display_unit: &'static str,
    pub text: &'static str,
    pub description: &'static str,
}

/// Response for calculate_session_duration
#[derive(Debug, Serialize)]
pub struct SessionDurationResponse {
    pub drink_amount_ml: f64,
    pub sip_size: String,
    pub sip_ml: u32,
    /// None when the sip size is not in the catalog (volume fell back)
    pub sip_description: Option<&'static str>,
    pub session_minutes: u32,
    pub session_label: String,
}

/// Which way a conversion goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the given system to kg / ml
    ToCanonical,
    /// From kg / ml to the given system
    FromCanonical,
}

impl Direction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "to_canonical" | "from_display" => Some(Direction::ToCanonical),
            "from_canonical" | "to_display" => Some(Direction::FromCanonical),
            _ => None,
        }
    }
}

pub fn parse_gender(s: &str) -> Result<GenderType, String> {
    GenderType::from_str(s)
        .ok_or_else(|| format!("Invalid gender '{}'. Use Male, Female, or Other", s))
}

pub fn parse_measure_system(s: &str) -> Result<MeasureSystem, String> {
    MeasureSystem::from_str(s)
        .ok_or_else(|| format!("Invalid measure system '{}'. Use Metric or Imperial", s))
}

pub fn parse_sip_size(s: &str) -> Result<SipSize, String> {
    SipSize::from_str(s)
        .ok_or_else(|| format!("Invalid sip size '{}'. Use FullCup, HalfCup, or BigSip", s))
}

pub fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::from_str(s)
        .ok_or_else(|| format!("Invalid direction '{}'. Use to_canonical or from_canonical", s))
}

/// Measurement system for a locale, falling back to the configured one
pub fn detect_system(locale: Option<&str>, default_locale: Option<&str>) -> MeasureSystemResponse {
    let locale = locale.or(default_locale);
    let system = detect_measure_system(locale);
    MeasureSystemResponse {
        locale: locale.map(str::to_string),
        measure_system: system,
        weight_unit: system.weight_unit(),
        liquid_unit: system.liquid_unit(),
    }
}

pub fn convert_weight(value: f64, system: &str, direction: &str) -> Result<ConversionResponse, String> {
    let system = parse_measure_system(system)?;
    let unit = system.weight_unit().as_str();
    let response = match parse_direction(direction)? {
        Direction::ToCanonical => ConversionResponse {
            input: value,
            input_unit: unit,
            output: converter::weight_from(value, system),
            output_unit: WeightUnit::Kg.as_str(),
        },
        Direction::FromCanonical => ConversionResponse {
            input: value,
            input_unit: WeightUnit::Kg.as_str(),
            output: converter::weight_to(value, system),
            output_unit: unit,
        },
    };
    Ok(response)
}

pub fn convert_volume(value: f64, system: &str, direction: &str) -> Result<ConversionResponse, String> {
    let system = parse_measure_system(system)?;
    let unit = system.liquid_unit().as_str();
    let response = match parse_direction(direction)? {
        Direction::ToCanonical => ConversionResponse {
            input: value,
            input_unit: unit,
            output: converter::volume_from(value, system),
            output_unit: LiquidUnit::Ml.as_str(),
        },
        Direction::FromCanonical => ConversionResponse {
            input: value,
            input_unit: LiquidUnit::Ml.as_str(),
            output: converter::volume_to(value, system),
            output_unit: unit,
        },
    };
    Ok(response)
}

pub fn gender_profile(gender: &str) -> Result<GenderProfileResponse, String> {
    let gender = parse_gender(gender)?;
    Ok(GenderProfileResponse {
        gender,
        default_weight_kg: gender.default_weight_kg(),
        image_key: gender.image_key(),
        ml_per_kg: drink_amount::ml_per_kg(gender),
    })
}

pub fn calculate_drink_amount(gender: &str, weight_kg: f64) -> Result<DrinkAmountResponse, String> {
    let gender = parse_gender(gender)?;
    let estimate_ml = drink_amount::calc(gender, weight_kg);
    Ok(DrinkAmountResponse {
        gender,
        weight_kg,
        estimate_ml,
        drink_amount: DrinkAmount::from_estimate(estimate_ml),
    })
}

pub fn list_sip_sizes(system: MeasureSystem) -> Vec<SipSizeSummary> {
    hydration::SIP_SIZES
        .iter()
        .map(|entry| SipSizeSummary {
            id: entry.size.identifier(),
            ml: entry.ml,
            display_volume: converter::volume_to(entry.ml as f64, system),
            display_unit: system.liquid_unit().as_str(),
            text: entry.text,
            description: entry.description,
        })
        .collect()
}

/// Unknown sip identifiers are accepted and use the fallback volume
pub fn calculate_session_duration(drink_amount_ml: f64, sip_size: &str) -> SessionDurationResponse {
    let session_minutes = session::calc(drink_amount_ml, sip_size);
    SessionDurationResponse {
        drink_amount_ml,
        sip_size: sip_size.to_string(),
        sip_ml: hydration::ml_for_size(sip_size),
        sip_description: hydration::description_for_size(sip_size),
        session_minutes,
        session_label: session::format_duration(session_minutes),
    }
}

/// Build a request from raw tool arguments and run the pipeline
pub fn plan_hydration(
    locale: Option<&str>,
    gender: &str,
    weight: Option<&str>,
    weight_system: Option<&str>,
    sip_size: Option<&str>,
) -> Result<HydrationPlan, String> {
    let request = HydrationRequest {
        locale: locale.map(str::to_string),
        gender: parse_gender(gender)?,
        // weight fields arrive as typed text; sanitise like the wizard does
        weight: match weight {
            Some(raw) => Some(
                hydration::limit_number(raw, 999)
                    .ok_or_else(|| format!("Invalid weight '{}'", raw))?,
            ),
            None => None,
        },
        weight_system: weight_system.map(parse_measure_system).transpose()?,
        sip_size: sip_size.map(parse_sip_size).transpose()?.unwrap_or_default(),
    };
    Ok(hydration::plan(&request))
}
