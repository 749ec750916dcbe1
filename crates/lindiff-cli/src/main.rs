//! lindiff CLI
//!
//! Usage:
//!   lindiff                      - Run the full suite against `linear`
//!   lindiff --seed 42            - Run with another seed
//!   lindiff --config run.json    - Load settings from a JSON file
//!   lindiff --invalid-only       - Run only the negative cases

use clap::Parser;
use colored::Colorize;
use lindiff_interop::namespace::Registry;
use lindiff_oracle::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "lindiff")]
#[command(version = "0.1.0")]
#[command(about = "Differential oracle for vector and matrix operations", long_about = None)]
struct Args {
    /// Seed for input generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace to check
    #[arg(short, long)]
    namespace: Option<String>,

    /// Only run the random sweep
    #[arg(long, conflicts_with = "invalid_only")]
    valid_only: bool,

    /// Only run the shape-violation cases
    #[arg(long)]
    invalid_only: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log every case
    #[arg(short, long)]
    verbose: bool,
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    lindiff_linear::register(&mut registry);
    registry
}

fn load_config(args: &Args) -> OracleResult<OracleConfig> {
    let mut config = match &args.config {
        Some(path) => OracleConfig::from_file(path)?,
        None => OracleConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = namespace.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> OracleResult<SuiteReport> {
    let config = load_config(args)?;
    let ns = registry().load(&config.namespace)?;
    info!(namespace = %config.namespace, seed = config.seed, "starting suite");
    let mut suite = LinearSuite::new(&ns, config)?;
    if !args.invalid_only {
        suite.test_valid()?;
    }
    if !args.valid_only {
        suite.test_invalid()?;
    }
    Ok(suite.report())
}

fn print_report(report: &SuiteReport) {
    println!("{} namespace {} (seed {})", "Checked".green().bold(), report.namespace.cyan(), report.seed);
    for op in &report.operations {
        println!("  {:<10} {:>5} valid {:>3} rejected", op.name, op.valid, op.invalid);
    }
    if report.zero_arity_dot {
        println!("  {:<10} zero-argument call returns 0", "dot");
    }
    println!("{} {} cases passed", "OK".green().bold(), report.cases_total());
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(report) if args.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                ExitCode::FAILURE
            }
        },
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Failed".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
