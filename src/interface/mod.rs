pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, prompt_activity_level, prompt_date_of_birth, prompt_gender,
    prompt_goal_type, prompt_height_cm, prompt_weight_kg, prompt_yes_no,
};
pub use render::{display_goal_set, display_profile, display_record};
