//! Gender profile
//!
//! Default body weight and display image key per gender.

use serde::{Deserialize, Serialize};

/// Gender selected in the welcome wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenderType {
    Male,
    Female,
    #[default]
    Other,
}

impl GenderType {
    pub const ALL: [GenderType; 3] = [GenderType::Male, GenderType::Female, GenderType::Other];

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(GenderType::Male),
            "female" => Some(GenderType::Female),
            "other" => Some(GenderType::Other),
            _ => None,
        }
    }

    /// Convert to database string
    pub fn to_db_str(&self) -> &'static str {
        self.image_key()
    }

    /// Body weight in kilograms assumed before the user enters one
    pub fn default_weight_kg(&self) -> f64 {
        match self {
            GenderType::Male => 75.0,
            GenderType::Female => 65.0,
            GenderType::Other => 70.0,
        }
    }

    /// Key the asset resolver uses to pick the gender illustration
    pub fn image_key(&self) -> &'static str {
        match self {
            GenderType::Male => "male",
            GenderType::Female => "female",
            GenderType::Other => "other",
        }
    }
}
