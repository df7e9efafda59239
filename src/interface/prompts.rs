use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

use crate::error::{GoalError, Result};
use crate::models::{ActivityLevel, Gender, GoalType, UserProfile};

/// Prompt for a positive number with a default.
fn prompt_positive(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| GoalError::InvalidInput(format!("Invalid number: {}", input)))?;

    if value <= 0.0 {
        return Err(GoalError::InvalidInput(format!(
            "{} must be positive",
            prompt
        )));
    }
    Ok(value)
}

pub fn prompt_gender() -> Result<Gender> {
    let options: Vec<&str> = Gender::ALL.iter().map(Gender::as_str).collect();
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(Gender::ALL[selection])
}

/// Prompt for date of birth (YYYY-MM-DD).
pub fn prompt_date_of_birth() -> Result<NaiveDate> {
    let input: String = Input::new()
        .with_prompt("Date of birth (YYYY-MM-DD)")
        .interact_text()?;

    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| GoalError::InvalidInput(format!("Invalid date: {}", input)))
}

pub fn prompt_height_cm() -> Result<f64> {
    prompt_positive("Height (cm)", "170")
}

pub fn prompt_weight_kg() -> Result<f64> {
    prompt_positive("Current weight (kg)", "70")
}

pub fn prompt_activity_level() -> Result<ActivityLevel> {
    let options: Vec<String> = ActivityLevel::ALL
        .iter()
        .map(|level| format!("{} ({})", level, level.description()))
        .collect();

    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(2) // moderately active
        .interact()?;
    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal_type() -> Result<GoalType> {
    let options: Vec<&str> = GoalType::ALL.iter().map(GoalType::as_str).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&options)
        .default(1) // maintain
        .interact()?;
    Ok(GoalType::ALL[selection])
}

/// Prompt for an optional number; empty input means "not set".
fn prompt_optional(prompt: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| GoalError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Walk a new user through every profile field.
///
/// Target weight and rate are only asked for lose/gain goals; an empty rate
/// leaves the default in place.
pub fn collect_profile() -> Result<UserProfile> {
    let gender = prompt_gender()?;
    let date_of_birth = prompt_date_of_birth()?;
    let height_cm = prompt_height_cm()?;
    let current_weight_kg = prompt_weight_kg()?;
    let activity_level = prompt_activity_level()?;
    let goal_type = prompt_goal_type()?;

    let (target_weight_kg, goal_rate_kg_per_week) = if goal_type == GoalType::Maintain {
        (None, None)
    } else {
        (
            prompt_optional("Target weight in kg (Enter to skip)")?,
            prompt_optional("Weekly rate in kg (Enter for default)")?,
        )
    };

    Ok(UserProfile {
        gender,
        age: None,
        date_of_birth: Some(date_of_birth),
        height_cm,
        current_weight_kg,
        activity_level,
        goal_type,
        target_weight_kg,
        goal_rate_kg_per_week,
    })
}
