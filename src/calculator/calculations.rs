use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calculator::constants::{DAYS_PER_WEEK, MAX_AGE_YEARS, MAX_HEIGHT_CM, MAX_WEIGHT_KG};
use crate::calculator::policy::{ActivityMultipliers, BmrCoefficients, GoalPolicy};
use crate::error::ValidationError;
use crate::models::{ActivityLevel, Gender, GoalSet, GoalType, UserProfile};

/// Gram allocation of a daily calorie goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

/// Round to one decimal place, half away from zero.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round down to one decimal place.
///
/// The small bias keeps exact tenths (e.g. 228.9 computed as 228.8999...)
/// from dropping a step.
pub fn floor_tenth(value: f64) -> f64 {
    (value * 10.0 + 1e-6).floor() / 10.0
}

fn check_range(field: &'static str, value: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        });
    }
    Ok(())
}

/// Validate every profile field and resolve the age on `as_of`.
pub fn validate_profile(profile: &UserProfile, as_of: NaiveDate) -> Result<i32, ValidationError> {
    check_range("weight", profile.current_weight_kg, MAX_WEIGHT_KG)?;
    check_range("height", profile.height_cm, MAX_HEIGHT_CM)?;

    let age = profile.age_on(as_of)?;
    if !(1..=MAX_AGE_YEARS).contains(&age) {
        return Err(ValidationError::AgeOutOfRange {
            value: age,
            max: MAX_AGE_YEARS,
        });
    }

    if let Some(target) = profile.target_weight_kg {
        check_range("target weight", target, MAX_WEIGHT_KG)?;
        let current = profile.current_weight_kg;
        let mismatched = match profile.goal_type {
            GoalType::Lose => target > current,
            GoalType::Gain => target < current,
            GoalType::Maintain => false,
        };
        if mismatched {
            return Err(ValidationError::TargetMismatch {
                goal: profile.goal_type.as_str(),
                current_kg: current,
                target_kg: target,
            });
        }
    }

    if let Some(rate) = profile.goal_rate_kg_per_week {
        if !rate.is_finite() {
            return Err(ValidationError::NotFinite { field: "goal rate" });
        }
        if rate == 0.0 && profile.goal_type != GoalType::Maintain {
            return Err(ValidationError::ZeroRate {
                goal: profile.goal_type.as_str(),
            });
        }
    }

    Ok(age)
}

/// Basal metabolic rate (Mifflin-St Jeor).
///
/// Formula: weight_coef * kg + height_coef * cm + age_coef * years + gender constant
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: Gender,
    coefficients: &BmrCoefficients,
) -> f64 {
    coefficients.weight * weight_kg
        + coefficients.height * height_cm
        + coefficients.age * f64::from(age_years)
        + coefficients.gender_constant(gender)
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier.
pub fn calculate_tdee(bmr: f64, level: ActivityLevel, multipliers: &ActivityMultipliers) -> f64 {
    bmr * multipliers.get(level)
}

/// Signed weekly body-mass change the goal aims for (kg/week).
///
/// The goal type alone decides the sign; an explicit rate only supplies the
/// magnitude, which is capped at the policy maximum.
pub fn resolve_weekly_rate(profile: &UserProfile, policy: &GoalPolicy) -> f64 {
    if profile.goal_type == GoalType::Maintain {
        return 0.0;
    }
    let magnitude = profile
        .goal_rate_kg_per_week
        .map(f64::abs)
        .unwrap_or(policy.default_rate_kg_per_week)
        .min(policy.max_rate_kg_per_week);

    profile.goal_type.direction() * magnitude
}

/// Daily energy adjustment for a signed weekly rate (kcal/day).
pub fn daily_energy_delta(weekly_rate_kg: f64, policy: &GoalPolicy) -> f64 {
    weekly_rate_kg * policy.kcal_per_kg_body_mass / DAYS_PER_WEEK
}

/// Allocate a daily calorie goal to protein, fat, carbohydrate and fiber.
///
/// Protein is set per kg of body weight, fat as a share of the goal, and
/// carbohydrate takes the remaining energy. Carbs are rounded down so that
/// macro energy never exceeds the goal.
pub fn split_macros(
    calorie_goal: u32,
    weight_kg: f64,
    goal: GoalType,
    policy: &GoalPolicy,
) -> MacroSplit {
    let goal_kcal = f64::from(calorie_goal);

    let fat_g = round_tenth(goal_kcal * policy.fat_share.get(goal) / policy.fat_kcal_per_g);
    let fat_kcal = fat_g * policy.fat_kcal_per_g;

    // Protein may not push protein+fat energy past the goal.
    let protein_cap_g = floor_tenth(((goal_kcal - fat_kcal) / policy.protein_kcal_per_g).max(0.0));
    let protein_g = round_tenth(weight_kg * policy.protein_g_per_kg.get(goal)).min(protein_cap_g);

    let remaining_kcal = goal_kcal - fat_kcal - protein_g * policy.protein_kcal_per_g;
    let carbs_g = floor_tenth((remaining_kcal / policy.carbs_kcal_per_g).max(0.0));

    let fiber_g = round_tenth(goal_kcal / 1000.0 * policy.fiber_g_per_1000_kcal);

    MacroSplit {
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
    }
}

/// Whole kcal as stored in a goal set; anything below 1 kcal is rejected.
fn whole_kcal(field: &'static str, value: f64) -> Result<u32, ValidationError> {
    if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
        Ok(value.round() as u32)
    } else {
        Err(ValidationError::EnergyOutOfRange { field, value })
    }
}

/// Lowest goal the policy allows for a body burning `tdee` kcal/day.
///
/// The floor never exceeds TDEE, so it limits a deficit without ever turning
/// one into a surplus.
pub fn effective_floor(tdee: f64, policy: &GoalPolicy) -> f64 {
    policy.calorie_floor_kcal.ceil().min(tdee)
}

/// Derive the daily goal set for a profile.
///
/// `as_of` is the date used to turn a date of birth into an age. The result
/// depends only on the arguments.
pub fn calculate_user_goals(
    profile: &UserProfile,
    policy: &GoalPolicy,
    as_of: NaiveDate,
) -> Result<GoalSet, ValidationError> {
    policy.validate()?;
    let age = validate_profile(profile, as_of)?;

    let bmr = calculate_bmr(
        profile.current_weight_kg,
        profile.height_cm,
        age,
        profile.gender,
        &policy.bmr,
    );
    if bmr < 1.0 {
        return Err(ValidationError::NonPositiveBmr(bmr));
    }

    let tdee = calculate_tdee(bmr, profile.activity_level, &policy.activity)
        .round()
        .max(1.0);

    let weekly_rate_kg = resolve_weekly_rate(profile, policy);
    let delta = daily_energy_delta(weekly_rate_kg, policy);

    // Only a deficit can fall below the floor, since the floor is capped at TDEE.
    let floor = effective_floor(tdee, policy);
    let adjusted = (tdee + delta).round();
    let floor_applied = adjusted < floor;
    let goal_kcal = if floor_applied { floor } else { adjusted };

    debug!(
        bmr,
        tdee,
        delta,
        daily_calorie_goal = goal_kcal,
        age,
        "calculated energy targets"
    );
    if floor_applied {
        warn!(adjusted, floor, "daily calorie goal raised to the safety floor");
    }

    let daily_calorie_goal = whole_kcal("daily calorie goal", goal_kcal)?;
    let macros = split_macros(
        daily_calorie_goal,
        profile.current_weight_kg,
        profile.goal_type,
        policy,
    );

    // A floored goal moves body mass slower than the requested rate.
    let achieved_rate_kg = if floor_applied {
        (goal_kcal - tdee) * DAYS_PER_WEEK / policy.kcal_per_kg_body_mass
    } else {
        weekly_rate_kg
    };
    let weeks_to_target = match profile.target_weight_kg {
        Some(target) if achieved_rate_kg != 0.0 => Some(round_tenth(
            (profile.current_weight_kg - target).abs() / achieved_rate_kg.abs(),
        )),
        _ => None,
    };

    Ok(GoalSet {
        daily_calorie_goal,
        protein_goal_g: macros.protein_g,
        carbs_goal_g: macros.carbs_g,
        fat_goal_g: macros.fat_g,
        fiber_goal_g: macros.fiber_g,
        tdee: whole_kcal("tdee", tdee)?,
        bmr: whole_kcal("bmr", bmr)?,
        weekly_rate_kg,
        floor_applied,
        weeks_to_target,
    })
}
