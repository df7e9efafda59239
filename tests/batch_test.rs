use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use nutrition_goals_rs::batch::{run_batch, run_batch_files};
use nutrition_goals_rs::GoalCalculator;

fn calc() -> GoalCalculator {
    GoalCalculator::with_default_policy(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
}

const PROFILES: &str = "\
user_id,gender,age,date_of_birth,height_cm,current_weight_kg,activity_level,goal_type,target_weight_kg,goal_rate_kg_per_week
alex,male,,1990-01-01,175,70,moderately_active,lose,65,0.5
blair,female,29,,165,58,Very Active,maintain,,
casey,male,40,,180,0,sedentary,gain,,
drew,female,33,,170,62,moderatly_active,gain,,
";

fn parse_output(bytes: &[u8]) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_reader(bytes);
    rdr.records().map(|r| r.unwrap()).collect()
}

#[test]
fn test_batch_writes_a_row_per_profile() {
    let mut out = Vec::new();
    let summary = run_batch(PROFILES.as_bytes(), &mut out, &calc()).unwrap();

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failures.len(), 2);

    let rows = parse_output(&out);
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][0], "alex");
    assert_eq!(&rows[0][1], "1967");
    assert_eq!(&rows[0][2], "2517");
}

#[test]
fn test_batch_reports_failures_with_line_and_user() {
    let mut out = Vec::new();
    let summary = run_batch(PROFILES.as_bytes(), &mut out, &calc()).unwrap();

    let casey = &summary.failures[0];
    assert_eq!(casey.user_id.as_deref(), Some("casey"));
    assert_eq!(casey.line, 4);
    assert!(casey.message.contains("weight"), "{}", casey.message);

    let drew = &summary.failures[1];
    assert_eq!(drew.user_id.as_deref(), Some("drew"));
    assert!(drew.message.contains("moderately_active"), "{}", drew.message);

    // Failed rows carry the message in the last column and no goals
    let rows = parse_output(&out);
    let casey_row = &rows[2];
    assert_eq!(&casey_row[1], "");
    assert!(!casey_row[casey_row.len() - 1].is_empty());
}

#[test]
fn test_batch_files() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(PROFILES.as_bytes()).unwrap();
    let output = NamedTempFile::new().unwrap();

    let summary = run_batch_files(input.path(), output.path(), &calc()).unwrap();
    assert_eq!(summary.processed, 4);

    let mut rdr = csv::Reader::from_path(output.path()).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "user_id");
    assert_eq!(&headers[headers.len() - 1], "error");
}
