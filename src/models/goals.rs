use serde::{Deserialize, Serialize};

/// Daily nutrition targets derived from a [`UserProfile`](super::UserProfile).
///
/// Calorie figures are whole kcal; gram figures are rounded to 0.1 g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    pub daily_calorie_goal: u32,

    pub protein_goal_g: f64,

    pub carbs_goal_g: f64,

    pub fat_goal_g: f64,

    /// Fiber is not charged against the macro energy budget.
    pub fiber_goal_g: f64,

    /// Total daily energy expenditure estimate.
    pub tdee: u32,

    pub bmr: u32,

    /// Signed weekly rate applied after defaulting and capping (kg/week).
    pub weekly_rate_kg: f64,

    /// Whether the daily goal was raised to the calorie floor.
    pub floor_applied: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks_to_target: Option<f64>,
}

impl GoalSet {
    /// Energy of protein, carbs and fat at the given densities (kcal).
    pub fn macro_calories(&self, protein_kcal_g: f64, carbs_kcal_g: f64, fat_kcal_g: f64) -> f64 {
        self.protein_goal_g * protein_kcal_g
            + self.carbs_goal_g * carbs_kcal_g
            + self.fat_goal_g * fat_kcal_g
    }

    /// Signed daily adjustment relative to TDEE (kcal).
    pub fn daily_delta(&self) -> i64 {
        i64::from(self.daily_calorie_goal) - i64::from(self.tdee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_goals() -> GoalSet {
        GoalSet {
            daily_calorie_goal: 2000,
            protein_goal_g: 150.0,
            carbs_goal_g: 200.0,
            fat_goal_g: 60.0,
            fiber_goal_g: 28.0,
            tdee: 2500,
            bmr: 1600,
            weekly_rate_kg: -0.5,
            floor_applied: false,
            weeks_to_target: None,
        }
    }

    #[test]
    fn test_macro_calories() {
        let goals = sample_goals();
        assert!((goals.macro_calories(4.0, 4.0, 9.0) - 1940.0).abs() < 0.001);
    }

    #[test]
    fn test_daily_delta_sign() {
        let goals = sample_goals();
        assert_eq!(goals.daily_delta(), -500);
    }

    #[test]
    fn test_weeks_to_target_omitted_from_json() {
        let json = serde_json::to_string(&sample_goals()).unwrap();
        assert!(!json.contains("weeks_to_target"));
    }
}
