use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;

use nutrition_goals_rs::batch::run_batch_files;
use nutrition_goals_rs::calculator::{GoalCalculator, GoalPolicy};
use nutrition_goals_rs::cli::{Cli, Command, ProfileArgs};
use nutrition_goals_rs::error::{GoalError, Result};
use nutrition_goals_rs::interface::{
    collect_profile, display_goal_set, display_profile, display_record, prompt_yes_no,
};
use nutrition_goals_rs::models::UserProfile;
use nutrition_goals_rs::state::{
    load_policy, load_records_or_empty, save_records, ProfileChange, RecordStore,
};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let calculator = build_calculator(cli.policy.as_deref(), as_of)?;

    match cli.command {
        Command::Calc { profile, json } => cmd_calc(&calculator, profile, json),
        Command::Onboard { user } => cmd_onboard(&cli.file, &calculator, &user),
        Command::Update {
            user,
            weight,
            height,
            age,
            dob,
            gender,
            activity,
            goal,
            rate,
            default_rate,
            target,
            clear_target,
        } => {
            let mut changes = Vec::new();
            if let Some(g) = gender {
                changes.push(ProfileChange::Gender(g));
            }
            if let Some(a) = age {
                changes.push(ProfileChange::Age(a));
            }
            if let Some(d) = dob {
                changes.push(ProfileChange::DateOfBirth(d));
            }
            if let Some(h) = height {
                changes.push(ProfileChange::HeightCm(h));
            }
            if let Some(w) = weight {
                changes.push(ProfileChange::WeightKg(w));
            }
            if let Some(level) = activity {
                changes.push(ProfileChange::ActivityLevel(level));
            }
            if let Some(g) = goal {
                changes.push(ProfileChange::GoalType(g));
            }
            if rate.is_some() || default_rate {
                changes.push(ProfileChange::GoalRate(rate));
            }
            if target.is_some() || clear_target {
                changes.push(ProfileChange::TargetWeight(target));
            }
            cmd_update(&cli.file, &calculator, &user, &changes)
        }
        Command::Show { user } => cmd_show(&cli.file, &user),
        Command::Refresh => cmd_refresh(&cli.file, &calculator),
        Command::Batch { input, output } => cmd_batch(&input, &output, &calculator),
    }
}

/// Built-in policy, or the validated policy file when one is given.
fn build_calculator(policy_path: Option<&Path>, as_of: NaiveDate) -> Result<GoalCalculator> {
    let policy = match policy_path {
        Some(path) => {
            let policy = load_policy(path)?;
            info!(path = %path.display(), "loaded policy");
            policy
        }
        None => GoalPolicy::default(),
    };
    Ok(GoalCalculator::new(policy, as_of)?)
}

fn profile_from_args(args: ProfileArgs) -> UserProfile {
    UserProfile {
        gender: args.gender,
        age: args.age,
        date_of_birth: args.dob,
        height_cm: args.height,
        current_weight_kg: args.weight,
        activity_level: args.activity,
        goal_type: args.goal,
        target_weight_kg: args.target,
        goal_rate_kg_per_week: args.rate,
    }
}

/// Calculate and print goals without touching stored records.
fn cmd_calc(calculator: &GoalCalculator, args: ProfileArgs, json: bool) -> Result<()> {
    let profile = profile_from_args(args);
    let goals = calculator.calculate(&profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
    } else {
        display_profile(&profile);
        display_goal_set(&goals);
    }
    Ok(())
}

fn open_store(file: &Path) -> Result<RecordStore> {
    Ok(RecordStore::new(load_records_or_empty(file)?))
}

/// Prompt for a full profile and store the user's first goal set.
fn cmd_onboard(file: &Path, calculator: &GoalCalculator, user: &str) -> Result<()> {
    let mut store = open_store(file)?;

    if store.get(user).is_some() {
        let replace = prompt_yes_no(&format!("User '{}' exists. Replace?", user), false)?;
        if !replace {
            return Ok(());
        }
    }

    let profile = collect_profile()?;
    let goals = store.onboard(user, profile, calculator)?.clone();
    display_goal_set(&goals);

    save_records(file, &store.to_records())?;
    println!("Saved {} to {}", user, file.display());
    Ok(())
}

/// Apply profile changes; the stored record is only rewritten when recalculation succeeds.
fn cmd_update(
    file: &Path,
    calculator: &GoalCalculator,
    user: &str,
    changes: &[ProfileChange],
) -> Result<()> {
    if changes.is_empty() {
        return Err(GoalError::InvalidInput(
            "no profile changes given (see --help)".to_string(),
        ));
    }

    let mut store = open_store(file)?;
    let previous = store
        .goals(user)
        .ok_or_else(|| GoalError::UserNotFound(user.to_string()))?
        .daily_calorie_goal;

    let goals = store.apply_update(user, changes, calculator)?.clone();
    println!(
        "Daily calorie goal: {} -> {} kcal",
        previous, goals.daily_calorie_goal
    );
    display_goal_set(&goals);

    save_records(file, &store.to_records())?;
    Ok(())
}

fn cmd_show(file: &Path, user: &str) -> Result<()> {
    let store = open_store(file)?;
    let record = store
        .get(user)
        .ok_or_else(|| GoalError::UserNotFound(user.to_string()))?;
    display_record(record);
    Ok(())
}

/// Recalculate every stored record; records that fail keep their prior goals.
fn cmd_refresh(file: &Path, calculator: &GoalCalculator) -> Result<()> {
    let mut store = open_store(file)?;
    if store.is_empty() {
        println!("No user records in {}", file.display());
        return Ok(());
    }

    let failures = store.refresh_all(calculator);
    for (user_id, e) in &failures {
        eprintln!("  {}: {}", user_id, e);
    }
    println!(
        "Refreshed {} of {} records.",
        store.len() - failures.len(),
        store.len()
    );

    save_records(file, &store.to_records())?;
    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, calculator: &GoalCalculator) -> Result<()> {
    let summary = run_batch_files(input, output, calculator)?;

    println!(
        "Processed {} rows: {} ok, {} rejected.",
        summary.processed,
        summary.succeeded,
        summary.failures.len()
    );
    for failure in &summary.failures {
        println!(
            "  line {} ({}): {}",
            failure.line,
            failure.user_id.as_deref().unwrap_or("?"),
            failure.message
        );
    }
    println!("Wrote {}", output.display());
    Ok(())
}
