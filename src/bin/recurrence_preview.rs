use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use thiserror::Error;

use finance_recurrence::{
    config::{Config, ConfigManager},
    init_with_config,
    recurrence::{
        expand_occurrences_in_month_with_limit, is_exhausted, resolve_next_occurrence,
        RecurrenceRule,
    },
    ConfigError, RecurrenceError,
};

/// Prints the occurrences of a recurrence rule inside one calendar month.
#[derive(Debug, Parser)]
#[command(name = "recurrence_preview", version)]
struct Cli {
    /// Rule as stored JSON, e.g. '{"frequency":"monthly","dayOfMonth":31}'.
    #[arg(long)]
    rule: String,
    /// Anchor date (YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,
    /// Optional last date on which occurrences may fall.
    #[arg(long)]
    end: Option<NaiveDate>,
    #[arg(long)]
    year: i32,
    /// Month number, 1-12.
    #[arg(long)]
    month: u32,
    /// Also resolve the first occurrence strictly after this date.
    #[arg(long)]
    next_after: Option<NaiveDate>,
    /// Path to a config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum PreviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not parse rule: {0}")]
    Rule(#[from] serde_json::Error),
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    let manager = match path {
        Some(path) => ConfigManager::new(path),
        None => match ConfigManager::default_location() {
            Ok(manager) => manager,
            Err(ConfigError::NoConfigDir) => return Ok(Config::default()),
            Err(err) => return Err(err),
        },
    };
    manager.load()
}

fn run(cli: Cli) -> Result<(), PreviewError> {
    let config = load_config(cli.config.clone())?;
    init_with_config(&config);

    let rule: RecurrenceRule = serde_json::from_str(&cli.rule)?;
    let dates = expand_occurrences_in_month_with_limit(
        cli.start,
        &rule,
        cli.end,
        cli.year,
        cli.month,
        config.max_expansion_steps,
    )?;

    let header = format!(
        "{} occurrences in {}-{:02}: {}",
        rule.label(),
        cli.year,
        cli.month,
        dates.len()
    );
    println!("{}", header.bold());
    for date in &dates {
        println!("  {} ({})", date, date.format("%a"));
    }

    if let Some(reference) = cli.next_after {
        let next = resolve_next_occurrence(cli.start, &rule, reference)?;
        if is_exhausted(next, cli.end) {
            println!("Next after {reference}: {next} (past end date, schedule exhausted)");
        } else {
            println!("Next after {reference}: {next}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
