use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculator::GoalCalculator;
use crate::error::ValidationError;
use crate::models::{ActivityLevel, Gender, GoalSet, GoalType, UserProfile};

/// A single edit to a user's profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileChange {
    Gender(Gender),
    Age(i32),
    DateOfBirth(NaiveDate),
    HeightCm(f64),
    WeightKg(f64),
    ActivityLevel(ActivityLevel),
    GoalType(GoalType),
    /// `None` falls back to the default rate.
    GoalRate(Option<f64>),
    TargetWeight(Option<f64>),
}

impl ProfileChange {
    /// Apply the edit to a profile copy.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        match self {
            ProfileChange::Gender(gender) => profile.gender = *gender,
            ProfileChange::Age(age) => {
                profile.age = Some(*age);
                profile.date_of_birth = None;
            }
            ProfileChange::DateOfBirth(dob) => profile.date_of_birth = Some(*dob),
            ProfileChange::HeightCm(cm) => profile.height_cm = *cm,
            ProfileChange::WeightKg(kg) => profile.current_weight_kg = *kg,
            ProfileChange::ActivityLevel(level) => profile.activity_level = *level,
            ProfileChange::GoalType(goal) => profile.goal_type = *goal,
            ProfileChange::GoalRate(rate) => profile.goal_rate_kg_per_week = *rate,
            ProfileChange::TargetWeight(target) => profile.target_weight_kg = *target,
        }
    }
}

/// A user's profile together with the goals derived from it.
///
/// The profile and goals are only ever replaced together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,

    profile: UserProfile,

    goals: GoalSet,

    /// Reference date the goals were computed for.
    goals_as_of: NaiveDate,
}

impl UserRecord {
    /// Create a record for a new user, computing the initial goals.
    pub fn onboard(
        user_id: impl Into<String>,
        profile: UserProfile,
        calculator: &GoalCalculator,
    ) -> Result<Self, ValidationError> {
        let goals = calculator.calculate(&profile)?;
        Ok(Self {
            user_id: user_id.into(),
            profile,
            goals,
            goals_as_of: calculator.as_of(),
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub fn goals_as_of(&self) -> NaiveDate {
        self.goals_as_of
    }

    /// Apply profile edits and recompute goals.
    ///
    /// Both are computed on copies; the record is left untouched when the
    /// edited profile fails validation.
    pub fn apply(
        &mut self,
        changes: &[ProfileChange],
        calculator: &GoalCalculator,
    ) -> Result<&GoalSet, ValidationError> {
        let mut profile = self.profile.clone();
        for change in changes {
            change.apply_to(&mut profile);
        }

        let goals = calculator.calculate(&profile)?;

        self.profile = profile;
        self.goals = goals;
        self.goals_as_of = calculator.as_of();
        Ok(&self.goals)
    }

    /// Recompute goals for the unchanged profile (e.g. after a birthday or policy change).
    pub fn refresh(&mut self, calculator: &GoalCalculator) -> Result<&GoalSet, ValidationError> {
        self.apply(&[], calculator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Male,
            age: Some(40),
            date_of_birth: None,
            height_cm: 180.0,
            current_weight_kg: 85.0,
            activity_level: ActivityLevel::LightlyActive,
            goal_type: GoalType::Maintain,
            target_weight_kg: None,
            goal_rate_kg_per_week: None,
        }
    }

    #[test]
    fn test_onboard_computes_goals() {
        let calc = GoalCalculator::with_default_policy(as_of());
        let record = UserRecord::onboard("u1", sample_profile(), &calc).unwrap();
        assert_eq!(record.goals(), &calc.calculate(&sample_profile()).unwrap());
        assert_eq!(record.goals_as_of(), as_of());
    }

    #[test]
    fn test_apply_replaces_profile_and_goals_together() {
        let calc = GoalCalculator::with_default_policy(as_of());
        let mut record = UserRecord::onboard("u1", sample_profile(), &calc).unwrap();
        let before = record.goals().clone();

        let goals = record
            .apply(
                &[
                    ProfileChange::WeightKg(90.0),
                    ProfileChange::GoalType(GoalType::Lose),
                ],
                &calc,
            )
            .unwrap()
            .clone();

        assert_eq!(record.profile().current_weight_kg, 90.0);
        assert_eq!(record.profile().goal_type, GoalType::Lose);
        assert_ne!(goals, before);
        assert!(goals.daily_calorie_goal < goals.tdee);
    }

    #[test]
    fn test_failed_apply_leaves_record_unchanged() {
        let calc = GoalCalculator::with_default_policy(as_of());
        let mut record = UserRecord::onboard("u1", sample_profile(), &calc).unwrap();
        let snapshot = record.clone();

        let result = record.apply(
            &[ProfileChange::HeightCm(190.0), ProfileChange::WeightKg(0.0)],
            &calc,
        );

        assert!(result.is_err());
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_age_change_clears_date_of_birth() {
        let mut profile = sample_profile();
        profile.date_of_birth = NaiveDate::from_ymd_opt(1980, 1, 1);
        ProfileChange::Age(33).apply_to(&mut profile);
        assert_eq!(profile.age, Some(33));
        assert_eq!(profile.date_of_birth, None);
    }
}
