use crate::models::{GoalSet, UserProfile};
use crate::state::UserRecord;

/// Display a goal set as a short table.
pub fn display_goal_set(goals: &GoalSet) {
    let delta = goals.daily_delta();
    let sign = if delta >= 0 { "+" } else { "" };

    println!();
    println!("=== Daily Goals ===");
    println!();
    println!("  BMR:        {:>6} kcal", goals.bmr);
    println!("  TDEE:       {:>6} kcal", goals.tdee);
    println!(
        "  Calories:   {:>6} kcal ({}{} kcal/day)",
        goals.daily_calorie_goal, sign, delta
    );
    println!("  Protein:    {:>6.1} g", goals.protein_goal_g);
    println!("  Carbs:      {:>6.1} g", goals.carbs_goal_g);
    println!("  Fat:        {:>6.1} g", goals.fat_goal_g);
    println!("  Fiber:      {:>6.1} g", goals.fiber_goal_g);

    if goals.weekly_rate_kg != 0.0 {
        println!("  Rate:       {:>+6.2} kg/week", goals.weekly_rate_kg);
    }
    if let Some(weeks) = goals.weeks_to_target {
        println!("  To target:  {:>6.1} weeks", weeks);
    }
    if goals.floor_applied {
        println!();
        println!("Note: calorie goal raised to the safety floor.");
    }
    println!();
}

/// Display the profile fields that drive the goals.
pub fn display_profile(profile: &UserProfile) {
    let age = match (profile.date_of_birth, profile.age) {
        (Some(dob), _) => format!("born {}", dob),
        (None, Some(age)) => format!("{} years", age),
        (None, None) => "unknown".to_string(),
    };

    println!(
        "  {} | {} | {:.1} cm | {:.1} kg | {} | goal: {}",
        profile.gender,
        age,
        profile.height_cm,
        profile.current_weight_kg,
        profile.activity_level,
        profile.goal_type
    );
    if let Some(target) = profile.target_weight_kg {
        println!("  target: {:.1} kg", target);
    }
}

/// Display a stored user record.
pub fn display_record(record: &UserRecord) {
    println!();
    println!(
        "=== {} (goals as of {}) ===",
        record.user_id,
        record.goals_as_of()
    );
    display_profile(record.profile());
    display_goal_set(record.goals());
}
