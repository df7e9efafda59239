use std::fmt;

use crate::calculator::GoalCalculator;
use crate::calculator::calculations::effective_floor;
use crate::calculator::constants::MAX_WEIGHT_KG;
use crate::models::{GoalSet, GoalType, UserProfile};

/// A property every valid goal set must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Determinism,
    WeightMonotonicity,
    MacroConsistency,
    GoalDirection,
    CalorieFloor,
}

impl Property {
    pub const ALL: [Property; 5] = [
        Property::Determinism,
        Property::WeightMonotonicity,
        Property::MacroConsistency,
        Property::GoalDirection,
        Property::CalorieFloor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Determinism => "determinism",
            Property::WeightMonotonicity => "weight_monotonicity",
            Property::MacroConsistency => "macro_consistency",
            Property::GoalDirection => "goal_direction",
            Property::CalorieFloor => "calorie_floor",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub property: Property,
    pub detail: String,
}

impl Violation {
    fn new(property: Property, detail: String) -> Self {
        Self { property, detail }
    }
}

/// Weight step used for the monotonicity check (kg).
const WEIGHT_STEP_KG: f64 = 1.0;

/// Check every property for one profile and its computed goals.
pub fn check_goals(
    calculator: &GoalCalculator,
    profile: &UserProfile,
    goals: &GoalSet,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let tdee = goals.tdee;

    match calculator.calculate(profile) {
        Ok(again) if &again == goals => {}
        Ok(again) => violations.push(Violation::new(
            Property::Determinism,
            format!("{:?} != {:?}", again, goals),
        )),
        Err(e) => violations.push(Violation::new(
            Property::Determinism,
            format!("second run failed: {}", e),
        )),
    }

    if let Some(v) = check_weight_monotonicity(calculator, profile, goals) {
        violations.push(v);
    }

    if !calculator.macros_consistent(goals) {
        violations.push(Violation::new(
            Property::MacroConsistency,
            format!(
                "macro energy {:.2} kcal exceeds goal {} kcal",
                calculator.macro_calories(goals),
                goals.daily_calorie_goal
            ),
        ));
    }

    // A deficit may shrink to nothing under the floor, never flip to a surplus.
    let goal = goals.daily_calorie_goal;
    let direction_ok = match profile.goal_type {
        GoalType::Lose => goal < tdee || (goals.floor_applied && goal == tdee),
        GoalType::Maintain => goal == tdee,
        GoalType::Gain => goal > tdee,
    };
    if !direction_ok {
        violations.push(Violation::new(
            Property::GoalDirection,
            format!(
                "{} goal {} kcal vs tdee {} kcal",
                profile.goal_type, goals.daily_calorie_goal, goals.tdee
            ),
        ));
    }

    let floor = effective_floor(f64::from(tdee), calculator.policy());
    if f64::from(goal) < floor {
        violations.push(Violation::new(
            Property::CalorieFloor,
            format!("goal {} kcal below floor {} kcal", goal, floor),
        ));
    }

    violations
}

/// Heavier by one step: TDEE must rise, and so must the goal for maintain/gain.
fn check_weight_monotonicity(
    calculator: &GoalCalculator,
    profile: &UserProfile,
    goals: &GoalSet,
) -> Option<Violation> {
    if profile.current_weight_kg + WEIGHT_STEP_KG > MAX_WEIGHT_KG {
        return None;
    }

    // The target is dropped so a heavier gain profile cannot overshoot it.
    let mut heavier = profile.clone();
    heavier.current_weight_kg += WEIGHT_STEP_KG;
    heavier.target_weight_kg = None;

    let heavier_goals = match calculator.calculate(&heavier) {
        Ok(g) => g,
        Err(e) => {
            return Some(Violation::new(
                Property::WeightMonotonicity,
                format!("heavier profile rejected: {}", e),
            ));
        }
    };

    if heavier_goals.tdee <= goals.tdee {
        return Some(Violation::new(
            Property::WeightMonotonicity,
            format!("tdee {} -> {} kcal", goals.tdee, heavier_goals.tdee),
        ));
    }

    if profile.goal_type != GoalType::Lose
        && heavier_goals.daily_calorie_goal <= goals.daily_calorie_goal
    {
        return Some(Violation::new(
            Property::WeightMonotonicity,
            format!(
                "goal {} -> {} kcal",
                goals.daily_calorie_goal, heavier_goals.daily_calorie_goal
            ),
        ));
    }

    None
}
