use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculator::GoalCalculator;
use crate::error::{GoalError, Result};
use crate::models::UserProfile;

/// One input row: a user id plus every profile field.
///
/// Enum columns are read as text so unknown values can be reported with a
/// suggestion instead of aborting the whole file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub user_id: String,
    pub gender: String,
    pub age: Option<i32>,
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: f64,
    pub current_weight_kg: f64,
    pub activity_level: String,
    pub goal_type: String,
    pub target_weight_kg: Option<f64>,
    pub goal_rate_kg_per_week: Option<f64>,
}

impl ProfileRow {
    pub fn to_profile(&self) -> Result<UserProfile> {
        Ok(UserProfile {
            gender: self.gender.parse()?,
            age: self.age,
            date_of_birth: self.date_of_birth,
            height_cm: self.height_cm,
            current_weight_kg: self.current_weight_kg,
            activity_level: self.activity_level.parse()?,
            goal_type: self.goal_type.parse()?,
            target_weight_kg: self.target_weight_kg,
            goal_rate_kg_per_week: self.goal_rate_kg_per_week,
        })
    }
}

/// One output row. Goal columns are empty when `error` is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalRow {
    pub user_id: String,
    pub daily_calorie_goal: Option<u32>,
    pub tdee: Option<u32>,
    pub bmr: Option<u32>,
    pub protein_goal_g: Option<f64>,
    pub carbs_goal_g: Option<f64>,
    pub fat_goal_g: Option<f64>,
    pub fiber_goal_g: Option<f64>,
    pub weekly_rate_kg: Option<f64>,
    pub weeks_to_target: Option<f64>,
    pub floor_applied: Option<bool>,
    pub error: Option<String>,
}

/// A row that could not produce goals.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based line in the input file.
    pub line: u64,
    pub user_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failures: Vec<RowFailure>,
}

fn goal_row(row: &ProfileRow, calculator: &GoalCalculator) -> Result<GoalRow> {
    let profile = row.to_profile()?;
    let goals = calculator.calculate(&profile)?;
    Ok(GoalRow {
        user_id: row.user_id.clone(),
        daily_calorie_goal: Some(goals.daily_calorie_goal),
        tdee: Some(goals.tdee),
        bmr: Some(goals.bmr),
        protein_goal_g: Some(goals.protein_goal_g),
        carbs_goal_g: Some(goals.carbs_goal_g),
        fat_goal_g: Some(goals.fat_goal_g),
        fiber_goal_g: Some(goals.fiber_goal_g),
        weekly_rate_kg: Some(goals.weekly_rate_kg),
        weeks_to_target: goals.weeks_to_target,
        floor_applied: Some(goals.floor_applied),
        error: None,
    })
}

/// Compute goals for every profile row in `input`, writing one row per input row.
///
/// Rows that fail to parse or validate are written with an `error` column and
/// collected in the summary; only I/O and CSV framing errors abort the run.
pub fn run_batch<R: Read, W: Write>(
    input: R,
    output: W,
    calculator: &GoalCalculator,
) -> Result<BatchSummary> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let headers = rdr.headers()?.clone();
    let mut wtr = csv::Writer::from_writer(output);
    let mut summary = BatchSummary::default();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        summary.processed += 1;

        let result = record
            .deserialize::<ProfileRow>(Some(&headers))
            .map_err(GoalError::from)
            .and_then(|row| goal_row(&row, calculator));

        match result {
            Ok(row) => {
                summary.succeeded += 1;
                wtr.serialize(row)?;
            }
            Err(e) => {
                let user_id = row_user_id(&record, &headers);
                let message = e.to_string();
                warn!(line, user_id = user_id.as_deref().unwrap_or(""), %message, "rejected profile row");
                wtr.serialize(GoalRow {
                    user_id: user_id.clone().unwrap_or_default(),
                    error: Some(message.clone()),
                    ..Default::default()
                })?;
                summary.failures.push(RowFailure {
                    line,
                    user_id,
                    message,
                });
            }
        }
    }

    wtr.flush()?;
    info!(
        processed = summary.processed,
        failed = summary.failures.len(),
        "batch complete"
    );
    Ok(summary)
}

/// The raw `user_id` column of a row, if present and non-empty.
fn row_user_id(record: &csv::StringRecord, headers: &csv::StringRecord) -> Option<String> {
    headers
        .iter()
        .position(|h| h == "user_id")
        .and_then(|i| record.get(i))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// File-based wrapper around [`run_batch`].
pub fn run_batch_files(input: &Path, output: &Path, calculator: &GoalCalculator) -> Result<BatchSummary> {
    let reader = File::open(input)?;
    let writer = File::create(output)?;
    run_batch(reader, writer, calculator)
}
