use thiserror::Error;

/// A profile or policy field that cannot produce a meaningful goal set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be within ({min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("age must be between 1 and {max} years, got {value}")]
    AgeOutOfRange { value: i32, max: i32 },

    #[error("either age or date of birth is required")]
    MissingAge,

    #[error("goal rate must be non-zero for a {goal} goal")]
    ZeroRate { goal: &'static str },

    #[error("target weight {target_kg} kg does not match a {goal} goal from {current_kg} kg")]
    TargetMismatch {
        goal: &'static str,
        current_kg: f64,
        target_kg: f64,
    },

    #[error("profile yields a non-positive BMR ({0:.1} kcal)")]
    NonPositiveBmr(f64),

    #[error("{field} must be between 1 and 4294967295 kcal, got {value}")]
    EnergyOutOfRange { field: &'static str, value: f64 },

    #[error("unknown {kind} '{value}'{}", suggestion_suffix(.suggestion))]
    UnknownVariant {
        kind: &'static str,
        value: String,
        suggestion: Option<&'static str>,
    },

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GoalError>;
