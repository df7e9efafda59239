pub mod checks;
pub mod output;
pub mod sampling;

pub use checks::{check_goals, Property, Violation};
pub use output::{print_summary, write_csv};
pub use sampling::{random_profile, SampleRanges};

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::calculator::GoalCalculator;
use crate::models::{GoalSet, UserProfile};

/// Configuration for an audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub samples: usize,
    pub seed: u64,
    pub ranges: SampleRanges,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 123,
            ranges: SampleRanges::default(),
        }
    }
}

/// One sampled profile and what the calculator made of it.
#[derive(Debug, Clone)]
pub struct AuditSample {
    pub index: usize,
    pub profile: UserProfile,
    pub goals: Option<GoalSet>,
    pub rejection: Option<String>,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone)]
pub struct AuditReport {
    pub samples: Vec<AuditSample>,
}

impl AuditReport {
    pub fn rejected(&self) -> usize {
        self.samples.iter().filter(|s| s.rejection.is_some()).count()
    }

    pub fn floored(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.goals.as_ref().is_some_and(|g| g.floor_applied))
            .count()
    }

    pub fn violation_count(&self) -> usize {
        self.samples.iter().map(|s| s.violations.len()).sum()
    }

    /// Violations per property, every property present.
    pub fn violations_by_property(&self) -> HashMap<Property, usize> {
        let mut counts: HashMap<Property, usize> =
            Property::ALL.iter().map(|p| (*p, 0)).collect();
        for violation in self.samples.iter().flat_map(|s| &s.violations) {
            *counts.entry(violation.property).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0
    }
}

/// Sample random profiles and check every goal property against `calculator`.
pub fn run_audit(config: &AuditConfig, calculator: &GoalCalculator) -> AuditReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(config.samples);

    for index in 0..config.samples {
        let profile = random_profile(&mut rng, &config.ranges);
        let sample = match calculator.calculate(&profile) {
            Ok(goals) => {
                let violations = check_goals(calculator, &profile, &goals);
                AuditSample {
                    index,
                    profile,
                    goals: Some(goals),
                    rejection: None,
                    violations,
                }
            }
            Err(e) => {
                debug!(index, error = %e, "sampled profile rejected");
                AuditSample {
                    index,
                    profile,
                    goals: None,
                    rejection: Some(e.to_string()),
                    violations: Vec::new(),
                }
            }
        };
        samples.push(sample);
    }

    let report = AuditReport { samples };
    info!(
        samples = config.samples,
        rejected = report.rejected(),
        violations = report.violation_count(),
        "audit complete"
    );
    report
}
