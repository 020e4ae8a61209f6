//! Daily drink amount
//!
//! Recommended liquid intake from gender and body weight.

use serde::{Deserialize, Serialize};

use super::gender::GenderType;

/// Milliliters per kilogram of body weight per day
pub fn ml_per_kg(gender: GenderType) -> f64 {
    match gender {
        GenderType::Male => 35.0,
        GenderType::Female => 31.0,
        GenderType::Other => 32.0,
    }
}

/// Central estimate of daily intake in milliliters (unrounded)
pub fn calc(gender: GenderType, weight_kg: f64) -> f64 {
    weight_kg * ml_per_kg(gender)
}

/// Recommended daily intake range with the currently selected target
///
/// `min <= selected <= max` holds for every value built through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkAmount {
    pub min: u32,
    pub max: u32,
    pub selected: u32,
}

impl DrinkAmount {
    /// Build a range of 90%..110% around an estimate
    pub fn from_estimate(ml: f64) -> Self {
        let ml = ml.max(0.0);
        Self {
            min: (ml * 0.9).round() as u32,
            max: (ml * 1.1).round() as u32,
            selected: ml.round() as u32,
        }
    }

    /// Change the selected target, clamped into the range
    pub fn select(self, ml: u32) -> Self {
        Self {
            selected: ml.clamp(self.min, self.max),
            ..self
        }
    }

    /// Keep a target chosen elsewhere as is, widening the range to cover it
    pub fn with_selected(self, ml: u32) -> Self {
        Self {
            min: self.min.min(ml),
            max: self.max.max(ml),
            selected: ml,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_formula() {
        assert_eq!(calc(GenderType::Male, 80.0), 2800.0);
        assert_eq!(calc(GenderType::Female, 60.0), 1860.0);
        assert_eq!(calc(GenderType::Other, 70.0), 2240.0);
    }

    #[test]
    fn test_calc_is_unrounded() {
        assert_eq!(calc(GenderType::Male, 70.5), 2467.5);
    }

    #[test]
    fn test_range_from_estimate() {
        let amount = DrinkAmount::from_estimate(2800.0);
        assert_eq!(amount.min, 2520);
        assert_eq!(amount.max, 3080);
        assert_eq!(amount.selected, 2800);
    }

    #[test]
    fn test_select_clamps() {
        let amount = DrinkAmount::from_estimate(2000.0);
        assert_eq!(amount.select(2100).selected, 2100);
        assert_eq!(amount.select(5000).selected, amount.max);
        assert_eq!(amount.select(10).selected, amount.min);
    }

    #[test]
    fn test_with_selected_widens_range() {
        let amount = DrinkAmount::from_estimate(2000.0);
        let high = amount.with_selected(5000);
        assert_eq!((high.min, high.max, high.selected), (1800, 5000, 5000));
        let low = amount.with_selected(500);
        assert_eq!((low.min, low.max, low.selected), (500, 2200, 500));
        assert_eq!(amount.with_selected(2100), amount.select(2100));
    }

    #[test]
    fn test_invariant_holds_for_all_genders() {
        for gender in GenderType::ALL {
            for kg in [1.0, 30.0, 65.0, 150.0, 250.0] {
                let amount = DrinkAmount::from_estimate(calc(gender, kg));
                assert!(amount.min <= amount.selected && amount.selected <= amount.max);
            }
        }
    }
}
