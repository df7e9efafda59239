use chrono::NaiveDate;

use crate::calculator::calculations::calculate_user_goals;
use crate::calculator::constants::MACRO_ROUNDING_TOLERANCE_KCAL;
use crate::calculator::policy::GoalPolicy;
use crate::error::ValidationError;
use crate::models::{GoalSet, UserProfile};

/// A validated policy bound to the reference date used for age derivation.
///
/// Holds no state between calls; clones are independent and can be used
/// from any thread.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalCalculator {
    policy: GoalPolicy,
    as_of: NaiveDate,
}

impl GoalCalculator {
    /// Create a calculator, rejecting a policy that cannot produce consistent goals.
    pub fn new(policy: GoalPolicy, as_of: NaiveDate) -> Result<Self, ValidationError> {
        policy.validate()?;
        Ok(Self { policy, as_of })
    }

    /// Calculator using the built-in policy table.
    pub fn with_default_policy(as_of: NaiveDate) -> Self {
        Self {
            policy: GoalPolicy::default(),
            as_of,
        }
    }

    pub fn policy(&self) -> &GoalPolicy {
        &self.policy
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn calculate(&self, profile: &UserProfile) -> Result<GoalSet, ValidationError> {
        calculate_user_goals(profile, &self.policy, self.as_of)
    }

    /// Energy of the macro grams in `goals` under this policy's densities.
    pub fn macro_calories(&self, goals: &GoalSet) -> f64 {
        goals.macro_calories(
            self.policy.protein_kcal_per_g,
            self.policy.carbs_kcal_per_g,
            self.policy.fat_kcal_per_g,
        )
    }

    /// Whether macro energy stays within the rounding tolerance of the daily goal.
    pub fn macros_consistent(&self, goals: &GoalSet) -> bool {
        self.macro_calories(goals)
            <= f64::from(goals.daily_calorie_goal) + MACRO_ROUNDING_TOLERANCE_KCAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, GoalType};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_policy() {
        let mut policy = GoalPolicy::default();
        policy.calorie_floor_kcal = -10.0;
        assert!(GoalCalculator::new(policy, as_of()).is_err());
    }

    #[test]
    fn test_calculate_uses_policy() {
        let profile = UserProfile {
            gender: Gender::Female,
            age: Some(28),
            date_of_birth: None,
            height_cm: 168.0,
            current_weight_kg: 62.0,
            activity_level: ActivityLevel::VeryActive,
            goal_type: GoalType::Maintain,
            target_weight_kg: None,
            goal_rate_kg_per_week: None,
        };

        let default_calc = GoalCalculator::with_default_policy(as_of());
        let mut policy = GoalPolicy::default();
        policy.activity.very_active = 1.8;
        let custom_calc = GoalCalculator::new(policy, as_of()).unwrap();

        let a = default_calc.calculate(&profile).unwrap();
        let b = custom_calc.calculate(&profile).unwrap();
        assert!(b.tdee > a.tdee);
        assert!(default_calc.macros_consistent(&a));
        assert!(custom_calc.macros_consistent(&b));
    }
}
