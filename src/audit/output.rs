use std::path::Path;

use crate::audit::checks::Property;
use crate::audit::AuditReport;
use crate::error::Result;

/// Write every sample with its goals and violations to a CSV file.
pub fn write_csv(report: &AuditReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "index",
        "gender",
        "age",
        "height_cm",
        "weight_kg",
        "activity_level",
        "goal_type",
        "target_weight_kg",
        "rate_kg_per_week",
        "tdee",
        "daily_calorie_goal",
        "protein_g",
        "carbs_g",
        "fat_g",
        "fiber_g",
        "floor_applied",
        "rejection",
        "violations",
    ])?;

    for sample in &report.samples {
        let p = &sample.profile;
        let opt = |v: Option<f64>| v.map(|x| format!("{:.1}", x)).unwrap_or_default();
        let goal = |f: fn(&crate::models::GoalSet) -> String| {
            sample.goals.as_ref().map(f).unwrap_or_default()
        };
        let violations: Vec<&str> = sample.violations.iter().map(|v| v.property.as_str()).collect();

        wtr.write_record([
            sample.index.to_string(),
            p.gender.to_string(),
            p.age.map(|a| a.to_string()).unwrap_or_default(),
            format!("{:.1}", p.height_cm),
            format!("{:.1}", p.current_weight_kg),
            p.activity_level.to_string(),
            p.goal_type.to_string(),
            opt(p.target_weight_kg),
            opt(p.goal_rate_kg_per_week),
            goal(|g| g.tdee.to_string()),
            goal(|g| g.daily_calorie_goal.to_string()),
            goal(|g| format!("{:.1}", g.protein_goal_g)),
            goal(|g| format!("{:.1}", g.carbs_goal_g)),
            goal(|g| format!("{:.1}", g.fat_goal_g)),
            goal(|g| format!("{:.1}", g.fiber_goal_g)),
            goal(|g| g.floor_applied.to_string()),
            sample.rejection.clone().unwrap_or_default(),
            violations.join(";"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print per-property counts and the first few violations.
pub fn print_summary(report: &AuditReport, max_details: usize) {
    let counts = report.violations_by_property();

    println!();
    println!("=== Goal Audit ===");
    println!();
    println!("Samples:   {}", report.samples.len());
    println!("Rejected:  {}", report.rejected());
    println!("Floored:   {}", report.floored());
    println!();

    for property in Property::ALL {
        let count = counts.get(&property).copied().unwrap_or(0);
        let status = if count == 0 { "ok" } else { "FAIL" };
        println!("  {:<22} {:>5}  {}", property.as_str(), count, status);
    }

    let details: Vec<_> = report
        .samples
        .iter()
        .flat_map(|s| s.violations.iter().map(move |v| (s.index, v)))
        .take(max_details)
        .collect();

    if !details.is_empty() {
        println!();
        println!("--- First {} violations ---", details.len());
        for (index, violation) in details {
            println!("  #{:<5} {}: {}", index, violation.property, violation.detail);
        }
    }
    println!();
}
