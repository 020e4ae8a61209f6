//! Weight and volume conversion
//!
//! All computations run on kilograms and milliliters. These functions move
//! values between the canonical unit and whatever the user sees, rounding
//! to whole units on every conversion.

use super::measure::MeasureSystem;

/// Pounds per kilogram
pub const KG_TO_LBS: f64 = 2.20462;
/// Fluid ounces per milliliter
pub const ML_TO_OZ: f64 = 0.033814;

/// Convert a weight entered in `system` to kilograms
pub fn weight_from(value: f64, system: MeasureSystem) -> f64 {
    match system {
        MeasureSystem::Metric => value.round(),
        MeasureSystem::Imperial => (value * (1.0 / KG_TO_LBS)).round(),
    }
}

/// Convert kilograms to the weight shown in `system`
pub fn weight_to(value_kg: f64, system: MeasureSystem) -> f64 {
    match system {
        MeasureSystem::Metric => value_kg.round(),
        MeasureSystem::Imperial => (value_kg * KG_TO_LBS).round(),
    }
}

/// Convert a volume entered in `system` to milliliters
pub fn volume_from(value: f64, system: MeasureSystem) -> f64 {
    match system {
        MeasureSystem::Metric => value.round(),
        MeasureSystem::Imperial => (value * (1.0 / ML_TO_OZ)).round(),
    }
}

/// Convert milliliters to the volume shown in `system`
pub fn volume_to(value_ml: f64, system: MeasureSystem) -> f64 {
    match system {
        MeasureSystem::Metric => value_ml.round(),
        MeasureSystem::Imperial => (value_ml * ML_TO_OZ).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_is_identity() {
        assert_eq!(weight_from(80.0, MeasureSystem::Metric), 80.0);
        assert_eq!(weight_to(80.0, MeasureSystem::Metric), 80.0);
        assert_eq!(volume_from(2000.0, MeasureSystem::Metric), 2000.0);
        assert_eq!(volume_to(2000.0, MeasureSystem::Metric), 2000.0);
    }

    #[test]
    fn test_imperial_weight() {
        assert_eq!(weight_to(100.0, MeasureSystem::Imperial), 220.0);
        assert_eq!(weight_from(220.0, MeasureSystem::Imperial), 100.0);
        assert_eq!(weight_from(165.0, MeasureSystem::Imperial), 75.0);
    }

    #[test]
    fn test_imperial_volume() {
        assert_eq!(volume_to(2000.0, MeasureSystem::Imperial), 68.0);
        assert_eq!(volume_from(68.0, MeasureSystem::Imperial), 2011.0);
        assert_eq!(volume_to(330.0, MeasureSystem::Imperial), 11.0);
    }

    #[test]
    fn test_weight_round_trip_is_bounded() {
        for kg in 30..=200 {
            let w = kg as f64;
            let lbs = weight_to(w, MeasureSystem::Imperial);
            let back = weight_from(lbs, MeasureSystem::Imperial);
            assert!((back - w).abs() <= 1.0, "{} kg came back as {}", w, back);
        }
    }

    #[test]
    fn test_fractional_input_is_rounded() {
        assert_eq!(weight_from(72.6, MeasureSystem::Metric), 73.0);
        assert_eq!(volume_to(249.4, MeasureSystem::Metric), 249.0);
    }
}
