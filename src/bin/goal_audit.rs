use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use nutrition_goals_rs::audit::{print_summary, run_audit, write_csv, AuditConfig, SampleRanges};
use nutrition_goals_rs::calculator::{GoalCalculator, GoalPolicy};
use nutrition_goals_rs::state::load_policy;

#[derive(Parser, Debug)]
#[command(name = "goal_audit")]
#[command(about = "Check goal properties over randomly sampled profiles")]
struct Args {
    /// Number of random profiles
    #[arg(long, default_value = "1000")]
    samples: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Policy JSON file (built-in policy when omitted)
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Reference date for age calculation (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output CSV file for all samples
    #[arg(long, default_value = "goal_audit.csv")]
    csv: PathBuf,

    /// Number of violations to print in detail
    #[arg(long, default_value = "10")]
    details: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let policy = match &args.policy {
        Some(path) => match load_policy(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading policy {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GoalPolicy::default(),
    };

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let calculator = match GoalCalculator::new(policy, as_of) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = AuditConfig {
        samples: args.samples,
        seed: args.seed,
        ranges: SampleRanges::default(),
    };
    println!("Auditing {} profiles (seed {})...", config.samples, config.seed);

    let report = run_audit(&config, &calculator);
    print_summary(&report, args.details);

    if let Err(e) = write_csv(&report, &args.csv) {
        eprintln!("Error writing CSV {:?}: {}", args.csv, e);
        std::process::exit(1);
    }
    println!("Wrote all samples to {:?}", args.csv);

    if !report.is_clean() {
        std::process::exit(2);
    }
}
