pub mod calculations;
pub mod constants;
pub mod policy;

mod engine;

pub use calculations::{
    calculate_bmr, calculate_tdee, calculate_user_goals, daily_energy_delta, resolve_weekly_rate,
    split_macros, validate_profile, MacroSplit,
};
pub use engine::GoalCalculator;
pub use policy::{ActivityMultipliers, BmrCoefficients, DirectionTable, GoalPolicy};
