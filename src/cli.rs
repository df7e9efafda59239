use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::{ActivityLevel, Gender, GoalType};

/// Derive daily calorie and macro targets from a user profile.
#[derive(Parser, Debug)]
#[command(name = "nutrition_goals")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the user records JSON file.
    #[arg(short, long, default_value = "user_records.json", global = true)]
    pub file: PathBuf,

    /// Path to a JSON policy file overriding the built-in constants.
    #[arg(short, long, global = true)]
    pub policy: Option<PathBuf>,

    /// Reference date for age calculation (defaults to today).
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Every profile field as a flag.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub gender: Gender,

    /// Age in years (ignored when --dob is given).
    #[arg(long, required_unless_present = "dob", allow_negative_numbers = true)]
    pub age: Option<i32>,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub dob: Option<NaiveDate>,

    #[arg(long)]
    pub height: f64,

    #[arg(long)]
    pub weight: f64,

    /// sedentary, lightly_active, moderately_active, very_active, extremely_active
    #[arg(long)]
    pub activity: ActivityLevel,

    /// lose, maintain or gain
    #[arg(long, default_value = "maintain")]
    pub goal: GoalType,

    /// Target weight in kg.
    #[arg(long)]
    pub target: Option<f64>,

    /// Weekly rate in kg (defaults to the policy rate).
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate goals for a profile given on the command line.
    Calc {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the goal set as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create or replace a user's record through interactive prompts.
    Onboard {
        #[arg(short, long)]
        user: String,
    },

    /// Change profile fields for a user and recalculate their goals.
    Update {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        age: Option<i32>,

        #[arg(long)]
        dob: Option<NaiveDate>,

        #[arg(long)]
        gender: Option<Gender>,

        #[arg(long)]
        activity: Option<ActivityLevel>,

        #[arg(long)]
        goal: Option<GoalType>,

        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,

        /// Reset the weekly rate to the policy default.
        #[arg(long, conflicts_with = "rate")]
        default_rate: bool,

        #[arg(long)]
        target: Option<f64>,

        /// Remove the target weight.
        #[arg(long, conflicts_with = "target")]
        clear_target: bool,
    },

    /// Show a user's profile and goals.
    Show {
        #[arg(short, long)]
        user: String,
    },

    /// Recalculate goals for every stored user (e.g. after a policy change).
    Refresh,

    /// Calculate goals for every profile in a CSV file.
    Batch {
        /// Input CSV with a user_id column and one column per profile field.
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV of goal sets.
        #[arg(short, long, default_value = "goals.csv")]
        output: PathBuf,
    },
}
