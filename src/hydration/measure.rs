//! Measurement systems and unit labels
//!
//! Maps a locale to Metric or Imperial and names the weight/liquid units
//! each system displays.

use serde::{Deserialize, Serialize};

/// Region codes whose users expect imperial units (USA, Liberia, Myanmar)
pub const IMPERIAL_REGIONS: [&str; 3] = ["US", "LR", "MM"];

/// Measurement system a value was entered or is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasureSystem {
    #[default]
    Metric,
    Imperial,
}

impl MeasureSystem {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "metric" => Some(MeasureSystem::Metric),
            "imperial" => Some(MeasureSystem::Imperial),
            _ => None,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MeasureSystem::Metric => "metric",
            MeasureSystem::Imperial => "imperial",
        }
    }

    pub fn weight_unit(&self) -> WeightUnit {
        WeightUnit::from(*self)
    }

    pub fn liquid_unit(&self) -> LiquidUnit {
        LiquidUnit::from(*self)
    }
}

/// Extract the upper-cased region subtag after the last `-`
///
/// Returns None for an empty locale or one without a region part ("en").
fn region_code(locale: &str) -> Option<String> {
    let (_, region) = locale.rsplit_once('-')?;
    if region.is_empty() {
        return None;
    }
    Some(region.to_uppercase())
}

/// Determine the measurement system for a locale such as "en-US"
///
/// Any locale that is missing, malformed, or lacks a region is Metric.
pub fn detect_measure_system(locale: Option<&str>) -> MeasureSystem {
    match locale.and_then(region_code) {
        Some(region) if IMPERIAL_REGIONS.contains(&region.as_str()) => MeasureSystem::Imperial,
        _ => MeasureSystem::Metric,
    }
}

/// Unit a body weight is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl From<MeasureSystem> for WeightUnit {
    fn from(system: MeasureSystem) -> Self {
        match system {
            MeasureSystem::Metric => WeightUnit::Kg,
            MeasureSystem::Imperial => WeightUnit::Lbs,
        }
    }
}

impl From<WeightUnit> for MeasureSystem {
    fn from(unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Kg => MeasureSystem::Metric,
            WeightUnit::Lbs => MeasureSystem::Imperial,
        }
    }
}

/// Unit a liquid volume is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidUnit {
    Ml,
    Oz,
}

impl LiquidUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidUnit::Ml => "ml",
            LiquidUnit::Oz => "oz",
        }
    }
}

impl From<MeasureSystem> for LiquidUnit {
    fn from(system: MeasureSystem) -> Self {
        match system {
            MeasureSystem::Metric => LiquidUnit::Ml,
            MeasureSystem::Imperial => LiquidUnit::Oz,
        }
    }
}

impl From<LiquidUnit> for MeasureSystem {
    fn from(unit: LiquidUnit) -> Self {
        match unit {
            LiquidUnit::Ml => MeasureSystem::Metric,
            LiquidUnit::Oz => MeasureSystem::Imperial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_imperial_regions() {
        assert_eq!(detect_measure_system(Some("en-US")), MeasureSystem::Imperial);
        assert_eq!(detect_measure_system(Some("en-LR")), MeasureSystem::Imperial);
        assert_eq!(detect_measure_system(Some("my-MM")), MeasureSystem::Imperial);
        assert_eq!(detect_measure_system(Some("en-us")), MeasureSystem::Imperial);
    }

    #[test]
    fn test_detect_metric_fallbacks() {
        assert_eq!(detect_measure_system(Some("de-DE")), MeasureSystem::Metric);
        assert_eq!(detect_measure_system(Some("")), MeasureSystem::Metric);
        assert_eq!(detect_measure_system(Some("en")), MeasureSystem::Metric);
        assert_eq!(detect_measure_system(Some("en-")), MeasureSystem::Metric);
        assert_eq!(detect_measure_system(None), MeasureSystem::Metric);
    }

    #[test]
    fn test_region_is_last_subtag() {
        assert_eq!(detect_measure_system(Some("zh-Hant-US")), MeasureSystem::Imperial);
        assert_eq!(detect_measure_system(Some("en-US-GB")), MeasureSystem::Metric);
    }

    #[test]
    fn test_unit_labels_round_trip() {
        for system in [MeasureSystem::Metric, MeasureSystem::Imperial] {
            assert_eq!(MeasureSystem::from(system.weight_unit()), system);
            assert_eq!(MeasureSystem::from(system.liquid_unit()), system);
        }
        assert_eq!(MeasureSystem::Imperial.weight_unit().as_str(), "lbs");
        assert_eq!(MeasureSystem::Imperial.liquid_unit().as_str(), "oz");
        assert_eq!(MeasureSystem::Metric.weight_unit().as_str(), "kg");
        assert_eq!(MeasureSystem::Metric.liquid_unit().as_str(), "ml");
    }

    #[test]
    fn test_db_str_round_trip() {
        assert_eq!(MeasureSystem::from_str("imperial"), Some(MeasureSystem::Imperial));
        assert_eq!(MeasureSystem::from_str(MeasureSystem::Metric.to_db_str()), Some(MeasureSystem::Metric));
        assert_eq!(MeasureSystem::from_str("cubits"), None);
    }
}
