use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculator::GoalPolicy;
use crate::error::Result;
use crate::state::record::UserRecord;

/// Load user records from a JSON file.
///
/// Deduplicates by user id (last occurrence wins).
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<UserRecord> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, UserRecord> = HashMap::new();
    for record in records {
        seen.insert(record.user_id.clone(), record);
    }

    let mut records: Vec<UserRecord> = seen.into_values().collect();
    records.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    debug!(count = records.len(), "loaded user records");
    Ok(records)
}

/// Load records, treating a missing file as an empty store.
pub fn load_records_or_empty<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    if path.as_ref().exists() {
        load_records(path)
    } else {
        Ok(Vec::new())
    }
}

/// Save user records to a JSON file.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[UserRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a policy table from a JSON file and validate it.
///
/// Fields missing from the file keep their built-in defaults.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<GoalPolicy> {
    let content = fs::read_to_string(path)?;
    let policy: GoalPolicy = serde_json::from_str(&content)?;
    policy.validate()?;
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::GoalCalculator;
    use crate::error::GoalError;
    use crate::models::{ActivityLevel, Gender, GoalType, UserProfile};
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_record(user_id: &str, weight: f64) -> UserRecord {
        let calc = GoalCalculator::with_default_policy(NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
        let profile = UserProfile {
            gender: Gender::Male,
            age: Some(25),
            date_of_birth: None,
            height_cm: 182.0,
            current_weight_kg: weight,
            activity_level: ActivityLevel::VeryActive,
            goal_type: GoalType::Gain,
            target_weight_kg: None,
            goal_rate_kg_per_week: Some(0.25),
        };
        UserRecord::onboard(user_id, profile, &calc).unwrap()
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let records = vec![sample_record("a", 75.0), sample_record("b", 80.0)];
        save_records(file.path(), &records).unwrap();

        let loaded = load_records(file.path()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_deduplication_last_wins() {
        let file = NamedTempFile::new().unwrap();
        let records = vec![sample_record("a", 75.0), sample_record("a", 90.0)];
        save_records(file.path(), &records).unwrap();

        let loaded = load_records(file.path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].profile().current_weight_kg, 90.0);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_records_or_empty(dir.path().join("none.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_policy_validates() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "fat_share": { "lose": 0.2, "maintain": 1.4, "gain": 0.2 } }"#)
            .unwrap();

        let err = load_policy(file.path()).unwrap_err();
        assert!(matches!(err, GoalError::Validation(_)));
    }

    #[test]
    fn test_load_policy_partial() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "calorie_floor_kcal": 1400 }"#).unwrap();

        let policy = load_policy(file.path()).unwrap();
        assert_eq!(policy.calorie_floor_kcal, 1400.0);
        assert_eq!(policy.default_rate_kg_per_week, 0.5);
    }
}
