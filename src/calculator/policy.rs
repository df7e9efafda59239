use serde::{Deserialize, Serialize};

use crate::calculator::constants::*;
use crate::error::ValidationError;
use crate::models::{ActivityLevel, Gender, GoalType};

/// Mifflin-St Jeor coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmrCoefficients {
    pub weight: f64,
    pub height: f64,
    pub age: f64,
    pub male_constant: f64,
    pub female_constant: f64,
}

impl Default for BmrCoefficients {
    fn default() -> Self {
        Self {
            weight: MSJ_WEIGHT_COEF,
            height: MSJ_HEIGHT_COEF,
            age: MSJ_AGE_COEF,
            male_constant: MSJ_MALE_CONSTANT,
            female_constant: MSJ_FEMALE_CONSTANT,
        }
    }
}

impl BmrCoefficients {
    pub fn gender_constant(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_constant,
            Gender::Female => self.female_constant,
        }
    }
}

/// BMR -> TDEE multiplier per activity level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityMultipliers {
    pub sedentary: f64,
    pub lightly_active: f64,
    pub moderately_active: f64,
    pub very_active: f64,
    pub extremely_active: f64,
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        Self {
            sedentary: ACTIVITY_SEDENTARY,
            lightly_active: ACTIVITY_LIGHTLY_ACTIVE,
            moderately_active: ACTIVITY_MODERATELY_ACTIVE,
            very_active: ACTIVITY_VERY_ACTIVE,
            extremely_active: ACTIVITY_EXTREMELY_ACTIVE,
        }
    }
}

impl ActivityMultipliers {
    pub fn get(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtremelyActive => self.extremely_active,
        }
    }
}

/// A value that depends on the goal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionTable {
    pub lose: f64,
    pub maintain: f64,
    pub gain: f64,
}

impl DirectionTable {
    pub fn get(&self, goal: GoalType) -> f64 {
        match goal {
            GoalType::Lose => self.lose,
            GoalType::Maintain => self.maintain,
            GoalType::Gain => self.gain,
        }
    }

    fn values(&self) -> [f64; 3] {
        [self.lose, self.maintain, self.gain]
    }
}

/// Every literal the goal calculator depends on.
///
/// `Default` mirrors the constants in [`crate::calculator::constants`]; a JSON
/// file may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalPolicy {
    pub bmr: BmrCoefficients,
    pub activity: ActivityMultipliers,
    pub kcal_per_kg_body_mass: f64,
    pub default_rate_kg_per_week: f64,
    pub max_rate_kg_per_week: f64,
    pub calorie_floor_kcal: f64,
    pub protein_g_per_kg: DirectionTable,
    pub fat_share: DirectionTable,
    pub fiber_g_per_1000_kcal: f64,
    pub protein_kcal_per_g: f64,
    pub carbs_kcal_per_g: f64,
    pub fat_kcal_per_g: f64,
}

impl Default for GoalPolicy {
    fn default() -> Self {
        Self {
            bmr: BmrCoefficients::default(),
            activity: ActivityMultipliers::default(),
            kcal_per_kg_body_mass: KCAL_PER_KG_BODY_MASS,
            default_rate_kg_per_week: DEFAULT_RATE_KG_PER_WEEK,
            max_rate_kg_per_week: MAX_RATE_KG_PER_WEEK,
            calorie_floor_kcal: CALORIE_FLOOR_KCAL,
            protein_g_per_kg: DirectionTable {
                lose: PROTEIN_G_PER_KG_LOSE,
                maintain: PROTEIN_G_PER_KG_MAINTAIN,
                gain: PROTEIN_G_PER_KG_GAIN,
            },
            fat_share: DirectionTable {
                lose: FAT_SHARE_LOSE,
                maintain: FAT_SHARE_MAINTAIN,
                gain: FAT_SHARE_GAIN,
            },
            fiber_g_per_1000_kcal: FIBER_G_PER_1000_KCAL,
            protein_kcal_per_g: PROTEIN_KCAL_PER_G,
            carbs_kcal_per_g: CARBS_KCAL_PER_G,
            fat_kcal_per_g: FAT_KCAL_PER_G,
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidPolicy(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

impl GoalPolicy {
    /// Check that the table can produce consistent goals.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let bmr = &self.bmr;
        for (name, value) in [
            ("bmr.weight", bmr.weight),
            ("bmr.height", bmr.height),
            ("bmr.age", bmr.age),
            ("bmr.male_constant", bmr.male_constant),
            ("bmr.female_constant", bmr.female_constant),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::InvalidPolicy(format!(
                    "{} must be finite",
                    name
                )));
            }
        }
        // Weight must drive BMR upward or goals stop tracking body mass.
        require_positive("bmr.weight", bmr.weight)?;

        let multipliers = ActivityLevel::ALL.map(|level| self.activity.get(level));
        for (level, m) in ActivityLevel::ALL.iter().zip(multipliers) {
            require_positive(&format!("activity.{}", level), m)?;
        }
        if multipliers.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ValidationError::InvalidPolicy(
                "activity multipliers must increase from sedentary to extremely_active".to_string(),
            ));
        }

        require_positive("kcal_per_kg_body_mass", self.kcal_per_kg_body_mass)?;
        require_positive("max_rate_kg_per_week", self.max_rate_kg_per_week)?;
        require_positive("default_rate_kg_per_week", self.default_rate_kg_per_week)?;
        if self.default_rate_kg_per_week > self.max_rate_kg_per_week {
            return Err(ValidationError::InvalidPolicy(
                "default_rate_kg_per_week exceeds max_rate_kg_per_week".to_string(),
            ));
        }
        require_positive("calorie_floor_kcal", self.calorie_floor_kcal)?;

        for value in self.protein_g_per_kg.values() {
            require_positive("protein_g_per_kg", value)?;
        }
        for value in self.fat_share.values() {
            if !(value > 0.0 && value < 1.0) {
                return Err(ValidationError::InvalidPolicy(format!(
                    "fat_share must be within (0, 1), got {}",
                    value
                )));
            }
        }
        if !(self.fiber_g_per_1000_kcal.is_finite() && self.fiber_g_per_1000_kcal >= 0.0) {
            return Err(ValidationError::InvalidPolicy(
                "fiber_g_per_1000_kcal must be non-negative".to_string(),
            ));
        }

        require_positive("protein_kcal_per_g", self.protein_kcal_per_g)?;
        require_positive("carbs_kcal_per_g", self.carbs_kcal_per_g)?;
        require_positive("fat_kcal_per_g", self.fat_kcal_per_g)?;

        Ok(())
    }
}
