use rand::Rng;

use crate::models::{ActivityLevel, Gender, GoalType, UserProfile};

/// Min/max ranges for randomly sampled profiles.
#[derive(Debug, Clone)]
pub struct SampleRanges {
    /// (min, max) body weight in kg
    pub weight_kg: (f64, f64),
    /// (min, max) height in cm
    pub height_cm: (f64, f64),
    /// (min, max) age in years
    pub age: (i32, i32),
    /// (min, max) weekly rate magnitude; the upper end exceeds the policy cap on purpose
    pub rate_kg_per_week: (f64, f64),
    /// (min, max) distance between current and target weight in kg
    pub target_offset_kg: (f64, f64),
    /// Probability that a lose/gain profile leaves the rate unset
    pub missing_rate_probability: f64,
    /// Probability that a lose/gain profile sets a target weight
    pub target_probability: f64,
}

impl Default for SampleRanges {
    fn default() -> Self {
        Self {
            weight_kg: (40.0, 150.0),
            height_cm: (145.0, 205.0),
            age: (18, 80),
            rate_kg_per_week: (0.1, 1.5),
            target_offset_kg: (0.0, 20.0),
            missing_rate_probability: 0.25,
            target_probability: 0.5,
        }
    }
}

/// Round to one decimal, the precision a user would enter.
fn tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Draw a random, valid-looking profile within `ranges`.
pub fn random_profile(rng: &mut impl Rng, ranges: &SampleRanges) -> UserProfile {
    let gender = Gender::ALL[rng.gen_range(0..Gender::ALL.len())];
    let activity_level = ActivityLevel::ALL[rng.gen_range(0..ActivityLevel::ALL.len())];
    let goal_type = GoalType::ALL[rng.gen_range(0..GoalType::ALL.len())];

    let current_weight_kg = tenth(rng.gen_range(ranges.weight_kg.0..=ranges.weight_kg.1));
    let height_cm = tenth(rng.gen_range(ranges.height_cm.0..=ranges.height_cm.1));
    let age = rng.gen_range(ranges.age.0..=ranges.age.1);

    let (target_weight_kg, goal_rate_kg_per_week) = if goal_type == GoalType::Maintain {
        (None, None)
    } else {
        let target = if rng.gen_bool(ranges.target_probability) {
            let offset = rng.gen_range(ranges.target_offset_kg.0..=ranges.target_offset_kg.1);
            let target = current_weight_kg + goal_type.direction() * offset;
            Some(tenth(target.max(ranges.weight_kg.0)))
        } else {
            None
        };
        let rate = if rng.gen_bool(ranges.missing_rate_probability) {
            None
        } else {
            Some(tenth(
                rng.gen_range(ranges.rate_kg_per_week.0..=ranges.rate_kg_per_week.1),
            ))
        };
        (target, rate)
    };

    UserProfile {
        gender,
        age: Some(age),
        date_of_birth: None,
        height_cm,
        current_weight_kg,
        activity_level,
        goal_type,
        target_weight_kg,
        goal_rate_kg_per_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_profile_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = SampleRanges::default();

        for _ in 0..200 {
            let profile = random_profile(&mut rng, &ranges);
            assert!(profile.current_weight_kg >= ranges.weight_kg.0);
            assert!(profile.current_weight_kg <= ranges.weight_kg.1);
            assert!(profile.height_cm >= ranges.height_cm.0);
            assert!(profile.height_cm <= ranges.height_cm.1);
            let age = profile.age.unwrap();
            assert!(age >= ranges.age.0 && age <= ranges.age.1);

            if profile.goal_type == GoalType::Maintain {
                assert!(profile.target_weight_kg.is_none());
                assert!(profile.goal_rate_kg_per_week.is_none());
            }
            if let Some(rate) = profile.goal_rate_kg_per_week {
                assert!(rate > 0.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_profiles() {
        let ranges = SampleRanges::default();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(random_profile(&mut a, &ranges), random_profile(&mut b, &ranges));
        }
    }
}
