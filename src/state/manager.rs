use std::collections::HashMap;

use tracing::info;

use crate::calculator::GoalCalculator;
use crate::error::{GoalError, Result};
use crate::models::{GoalSet, UserProfile};
use crate::state::record::{ProfileChange, UserRecord};

/// Owns user records and routes every profile edit through goal recalculation.
pub struct RecordStore {
    /// Records keyed by user id.
    records: HashMap<String, UserRecord>,
}

impl RecordStore {
    /// Create a store from a list of records.
    pub fn new(records: Vec<UserRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            map.insert(record.user_id.clone(), record);
        }
        Self { records: map }
    }

    pub fn get(&self, user_id: &str) -> Option<&UserRecord> {
        self.records.get(user_id)
    }

    /// Current goals for a user.
    pub fn goals(&self, user_id: &str) -> Option<&GoalSet> {
        self.get(user_id).map(UserRecord::goals)
    }

    /// Create or replace a user's record from a fresh profile.
    pub fn onboard(
        &mut self,
        user_id: &str,
        profile: UserProfile,
        calculator: &GoalCalculator,
    ) -> Result<&GoalSet> {
        let record = UserRecord::onboard(user_id, profile, calculator)?;
        info!(
            user_id,
            daily_calorie_goal = record.goals().daily_calorie_goal,
            "onboarded user"
        );
        self.records.insert(user_id.to_string(), record);
        self.goals(user_id)
            .ok_or_else(|| GoalError::UserNotFound(user_id.to_string()))
    }

    /// Apply profile edits to a user's record and recompute their goals.
    ///
    /// On a validation error the stored record keeps its prior profile and goals.
    pub fn apply_update(
        &mut self,
        user_id: &str,
        changes: &[ProfileChange],
        calculator: &GoalCalculator,
    ) -> Result<&GoalSet> {
        let record = self
            .records
            .get_mut(user_id)
            .ok_or_else(|| GoalError::UserNotFound(user_id.to_string()))?;

        let previous = record.goals().daily_calorie_goal;
        let goals = record.apply(changes, calculator)?;
        info!(
            user_id,
            changes = changes.len(),
            previous,
            daily_calorie_goal = goals.daily_calorie_goal,
            "recalculated goals"
        );
        Ok(goals)
    }

    /// Recompute every record against `calculator`, returning the ids that failed.
    pub fn refresh_all(&mut self, calculator: &GoalCalculator) -> Vec<(String, GoalError)> {
        let mut failures = Vec::new();
        for (user_id, record) in self.records.iter_mut() {
            if let Err(e) = record.refresh(calculator) {
                failures.push((user_id.clone(), GoalError::from(e)));
            }
        }
        failures
    }

    /// Records sorted by user id, for serialization.
    pub fn to_records(&self) -> Vec<UserRecord> {
        let mut records: Vec<UserRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender, GoalType};
    use chrono::NaiveDate;

    fn calc() -> GoalCalculator {
        GoalCalculator::with_default_policy(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap())
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Female,
            age: Some(32),
            date_of_birth: None,
            height_cm: 170.0,
            current_weight_kg: 68.0,
            activity_level: ActivityLevel::ModeratelyActive,
            goal_type: GoalType::Lose,
            target_weight_kg: Some(62.0),
            goal_rate_kg_per_week: None,
        }
    }

    #[test]
    fn test_onboard_and_lookup() {
        let mut store = RecordStore::new(Vec::new());
        store.onboard("alice", sample_profile(), &calc()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.goals("alice").is_some());
        assert!(store.goals("bob").is_none());
    }

    #[test]
    fn test_apply_update_unknown_user() {
        let mut store = RecordStore::new(Vec::new());
        let err = store
            .apply_update("ghost", &[ProfileChange::WeightKg(70.0)], &calc())
            .unwrap_err();
        assert!(matches!(err, GoalError::UserNotFound(_)));
    }

    #[test]
    fn test_apply_update_keeps_prior_goals_on_error() {
        let mut store = RecordStore::new(Vec::new());
        store.onboard("alice", sample_profile(), &calc()).unwrap();
        let before = store.goals("alice").unwrap().clone();

        let err = store
            .apply_update("alice", &[ProfileChange::Age(-4)], &calc())
            .unwrap_err();
        assert!(matches!(err, GoalError::Validation(_)));
        assert_eq!(store.goals("alice").unwrap(), &before);
        assert_eq!(store.get("alice").unwrap().profile().age, Some(32));
    }

    #[test]
    fn test_apply_update_weight_changes_goals() {
        let mut store = RecordStore::new(Vec::new());
        store.onboard("alice", sample_profile(), &calc()).unwrap();
        let before = store.goals("alice").unwrap().clone();

        let after = store
            .apply_update("alice", &[ProfileChange::WeightKg(66.0)], &calc())
            .unwrap()
            .clone();
        assert!(after.tdee < before.tdee);
        assert!(after.protein_goal_g < before.protein_goal_g);
    }

    #[test]
    fn test_refresh_all_reports_failures() {
        let mut store = RecordStore::new(Vec::new());
        store.onboard("alice", sample_profile(), &calc()).unwrap();

        // Born 2000-01-01 and still valid in 2025, but not "as of" 1999
        store
            .apply_update(
                "alice",
                &[ProfileChange::DateOfBirth(
                    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                )],
                &calc(),
            )
            .unwrap();

        let past = GoalCalculator::with_default_policy(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
        let failures = store.refresh_all(&past);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "alice");
    }

    #[test]
    fn test_to_records_sorted() {
        let mut store = RecordStore::new(Vec::new());
        store.onboard("zed", sample_profile(), &calc()).unwrap();
        store.onboard("amy", sample_profile(), &calc()).unwrap();
        let ids: Vec<String> = store.to_records().into_iter().map(|r| r.user_id).collect();
        assert_eq!(ids, vec!["amy".to_string(), "zed".to_string()]);
    }
}
