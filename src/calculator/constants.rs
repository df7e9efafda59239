// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor BMR equation
// ─────────────────────────────────────────────────────────────────────────────

/// kcal per kg of body weight.
pub const MSJ_WEIGHT_COEF: f64 = 10.0;

/// kcal per cm of height.
pub const MSJ_HEIGHT_COEF: f64 = 6.25;

/// kcal per year of age (negative).
pub const MSJ_AGE_COEF: f64 = -5.0;

pub const MSJ_MALE_CONSTANT: f64 = 5.0;
pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

// ─────────────────────────────────────────────────────────────────────────────
// Activity multipliers (BMR -> TDEE)
// ─────────────────────────────────────────────────────────────────────────────

pub const ACTIVITY_SEDENTARY: f64 = 1.2;
pub const ACTIVITY_LIGHTLY_ACTIVE: f64 = 1.375;
pub const ACTIVITY_MODERATELY_ACTIVE: f64 = 1.55;
pub const ACTIVITY_VERY_ACTIVE: f64 = 1.725;
pub const ACTIVITY_EXTREMELY_ACTIVE: f64 = 1.9;

// ─────────────────────────────────────────────────────────────────────────────
// Energy balance
// ─────────────────────────────────────────────────────────────────────────────

/// Energy stored in 1 kg of body mass.
pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

pub const DAYS_PER_WEEK: f64 = 7.0;

/// Rate used for lose/gain goals when the profile does not set one (kg/week).
pub const DEFAULT_RATE_KG_PER_WEEK: f64 = 0.5;

/// Largest rate magnitude honored (kg/week).
pub const MAX_RATE_KG_PER_WEEK: f64 = 1.0;

/// Daily calorie goals are never set below this.
pub const CALORIE_FLOOR_KCAL: f64 = 1200.0;

// ─────────────────────────────────────────────────────────────────────────────
// Macro split
// ─────────────────────────────────────────────────────────────────────────────

pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
pub const CARBS_KCAL_PER_G: f64 = 4.0;
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Protein per kg of body weight, by goal direction.
pub const PROTEIN_G_PER_KG_LOSE: f64 = 2.0;
pub const PROTEIN_G_PER_KG_MAINTAIN: f64 = 1.6;
pub const PROTEIN_G_PER_KG_GAIN: f64 = 1.8;

/// Share of the daily calorie goal allocated to fat, by goal direction.
pub const FAT_SHARE_LOSE: f64 = 0.25;
pub const FAT_SHARE_MAINTAIN: f64 = 0.30;
pub const FAT_SHARE_GAIN: f64 = 0.25;

/// Fiber grams per 1000 kcal of the daily goal.
pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;

// ─────────────────────────────────────────────────────────────────────────────
// Input ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_AGE_YEARS: i32 = 130;

/// Allowed excess of macro energy over the daily goal after rounding (kcal).
pub const MACRO_ROUNDING_TOLERANCE_KCAL: f64 = 1.0;
