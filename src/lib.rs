pub mod audit;
pub mod batch;
pub mod calculator;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use calculator::{GoalCalculator, GoalPolicy, calculate_user_goals};
pub use error::{GoalError, Result, ValidationError};
pub use models::{ActivityLevel, Gender, GoalSet, GoalType, UserProfile};
