mod goals;
mod profile;

pub use goals::GoalSet;
pub use profile::{ActivityLevel, Gender, GoalType, UserProfile};
