use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::ValidationError;

/// Minimum similarity for an unknown enum value to get a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Habitual activity, from desk-bound to hard training twice a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Lose,
    Maintain,
    Gain,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    /// Short human description used by prompts.
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "little or no exercise",
            ActivityLevel::LightlyActive => "exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "exercise 3-5 days/week",
            ActivityLevel::VeryActive => "exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "hard training twice a day",
        }
    }
}

impl GoalType {
    pub const ALL: [GoalType; 3] = [GoalType::Lose, GoalType::Maintain, GoalType::Gain];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Lose => "lose",
            GoalType::Maintain => "maintain",
            GoalType::Gain => "gain",
        }
    }

    /// Sign of the daily energy adjustment: -1 for loss, 0 for maintenance, +1 for gain.
    pub fn direction(&self) -> f64 {
        match self {
            GoalType::Lose => -1.0,
            GoalType::Maintain => 0.0,
            GoalType::Gain => 1.0,
        }
    }
}

/// Normalize user input: lowercase, spaces and dashes become underscores.
fn normalize_variant(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Match `input` against `names`, falling back to a fuzzy suggestion.
fn parse_variant<T: Copy>(
    kind: &'static str,
    input: &str,
    candidates: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    let normalized = normalize_variant(input);

    if let Some(found) = candidates.iter().find(|c| name(c) == normalized) {
        return Ok(*found);
    }

    let suggestion = candidates
        .iter()
        .map(|c| (name(c), jaro_winkler(name(c), &normalized)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(n, _)| n);

    Err(ValidationError::UnknownVariant {
        kind,
        value: input.to_string(),
        suggestion,
    })
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("gender", s, &Gender::ALL, Gender::as_str)
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("activity level", s, &ActivityLevel::ALL, ActivityLevel::as_str)
    }
}

impl FromStr for GoalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("goal type", s, &GoalType::ALL, GoalType::as_str)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biometric, activity and goal attributes of a user.
///
/// Either `age` or `date_of_birth` must be set; the date of birth wins when
/// both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,

    #[serde(default)]
    pub age: Option<i32>,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,

    pub height_cm: f64,

    pub current_weight_kg: f64,

    pub activity_level: ActivityLevel,

    pub goal_type: GoalType,

    #[serde(default)]
    pub target_weight_kg: Option<f64>,

    #[serde(default)]
    pub goal_rate_kg_per_week: Option<f64>,
}

impl UserProfile {
    /// Age in whole years on `as_of`.
    ///
    /// The result is not range-checked; a date of birth after `as_of` gives
    /// zero or a negative number.
    pub fn age_on(&self, as_of: NaiveDate) -> Result<i32, ValidationError> {
        match (self.date_of_birth, self.age) {
            (Some(dob), _) => Ok(years_between(dob, as_of)),
            (None, Some(age)) => Ok(age),
            (None, None) => Err(ValidationError::MissingAge),
        }
    }
}

/// Whole years completed between `from` and `to`.
fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Female,
            age: Some(30),
            date_of_birth: None,
            height_cm: 165.0,
            current_weight_kg: 60.0,
            activity_level: ActivityLevel::LightlyActive,
            goal_type: GoalType::Maintain,
            target_weight_kg: None,
            goal_rate_kg_per_week: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_activity_level_forms() {
        assert_eq!(
            "moderately_active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(
            "Very Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "extremely-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ExtremelyActive
        );
    }

    #[test]
    fn test_parse_unknown_suggests_closest() {
        let err = "moderatly_active".parse::<ActivityLevel>().unwrap_err();
        match err {
            ValidationError::UnknownVariant { suggestion, .. } => {
                assert_eq!(suggestion, Some("moderately_active"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = "banana".parse::<GoalType>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownVariant {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_age_from_date_of_birth_boundary() {
        let mut profile = sample_profile();
        profile.date_of_birth = Some(date(1990, 6, 15));

        assert_eq!(profile.age_on(date(2025, 6, 14)).unwrap(), 34);
        assert_eq!(profile.age_on(date(2025, 6, 15)).unwrap(), 35);
    }

    #[test]
    fn test_date_of_birth_wins_over_age() {
        let mut profile = sample_profile();
        profile.age = Some(99);
        profile.date_of_birth = Some(date(2000, 1, 1));
        assert_eq!(profile.age_on(date(2020, 1, 1)).unwrap(), 20);
    }

    #[test]
    fn test_missing_age() {
        let mut profile = sample_profile();
        profile.age = None;
        assert_eq!(
            profile.age_on(date(2020, 1, 1)),
            Err(ValidationError::MissingAge)
        );
    }

    #[test]
    fn test_profile_json_snake_case() {
        let json = r#"{
            "gender": "male",
            "date_of_birth": "1990-01-01",
            "height_cm": 175,
            "current_weight_kg": 70,
            "activity_level": "moderately_active",
            "goal_type": "lose",
            "target_weight_kg": 65
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.activity_level, ActivityLevel::ModeratelyActive);
        assert_eq!(profile.goal_rate_kg_per_week, None);
        assert_eq!(profile.date_of_birth, Some(date(1990, 1, 1)));
    }
}
