//! # Check Command
//!
//! This module implements the default command: check the headers of the
//! given files and add, refresh or delete them depending on the mode.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;
use conhead::config::load_config;
use conhead::diff::DiffManager;
use conhead::fields::YEAR_RANGE;
use conhead::info_log;
use conhead::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use conhead::output::{
  CategorizedReports, print_all_files_ok, print_file_lists, print_hint, print_start_message, print_summary,
};
use conhead::processor::{Mode, Processor, ProcessorConfig};
use conhead::report::{ProcessingSummary, ReportGenerator};
use tracing::{debug, error};

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Files or directories to process. Directories are processed recursively.
  /// Quoted glob patterns are expanded.
  #[arg(value_name = "SRC")]
  pub paths: Vec<String>,

  /// Runs check without adding headers or re-writing. Still exits with a non
  /// zero code for files that are missing headers or are out of date.
  #[arg(long, conflicts_with = "delete")]
  pub check: bool,

  /// Deletes any existing header from files. If no header is found, the file
  /// is left unchanged.
  #[arg(long)]
  pub delete: bool,

  /// Increase log verbosity. May be used more than once.
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Decrease log verbosity. May be used more than once.
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub quiet: u8,

  /// Path to config file (default: nearest .conhead.toml or pyproject.toml)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Show diff of changes
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Date used to compute header fields instead of today
  #[arg(long, value_name = "YYYY-MM-DD")]
  pub today: Option<NaiveDate>,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Generate a JSON report of header status and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

impl CheckArgs {
  /// Validate the arguments and return an error if invalid
  pub fn validate(&self) -> Result<(), String> {
    if self.check && self.delete {
      return Err("--check and --delete are mutually exclusive".to_string());
    }
    if let Some(today) = self.today
      && !YEAR_RANGE.contains(&today.year())
    {
      return Err(format!(
        "--today must be in the years {} to {}",
        YEAR_RANGE.start(),
        YEAR_RANGE.end()
      ));
    }
    Ok(())
  }

  pub const fn mode(&self) -> Mode {
    if self.delete {
      Mode::Delete
    } else if self.check {
      Mode::Check
    } else {
      Mode::Write
    }
  }

  fn now(&self) -> NaiveDateTime {
    match self.today {
      Some(date) => date.and_time(NaiveTime::MIN),
      None => Local::now().naive_local(),
    }
  }
}

/// Run the check command with the given arguments
///
/// Logging is scoped to this call. Exits the process with status 1 when any
/// file failed or needed a change.
pub fn run_check(args: CheckArgs) -> Result<()> {
  if let Err(e) = args.validate() {
    eprintln!("ERROR: {e}");
    process::exit(1);
  }

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet > 0 {
    set_quiet();
  }
  args.colors.apply();

  let dispatch = init_tracing(args.verbose, args.quiet, args.colors);
  let has_errors = tracing::dispatcher::with_default(&dispatch, || execute(&args))?;

  if has_errors {
    process::exit(1);
  }
  Ok(())
}

fn execute(args: &CheckArgs) -> Result<bool> {
  let current_dir = std::env::current_dir().context("Failed to get current directory")?;

  let config = load_config(args.config.as_deref(), &current_dir)?;
  if config.is_empty() {
    error!("no header configuration defined");
    return Ok(true);
  }
  debug!("Loaded {} header definitions", config.headers().len());

  let mode = args.mode();
  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    mode,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::new(config, args.now())
  });

  let start_time = Instant::now();
  let targets = processor.collect_files(&args.paths)?;
  debug!("Processing {} files in {:?} mode", targets.len(), mode);
  print_start_message(targets.len(), mode);
  let outcome = processor.process_collected(&targets);
  let elapsed = start_time.elapsed();

  let summary = ProcessingSummary::from_reports(&outcome.reports, elapsed);
  let categorized = CategorizedReports::from_reports(&outcome.reports, mode);

  print_file_lists(&categorized, Some(&current_dir));
  if !outcome.has_errors {
    print_all_files_ok();
  }
  print_summary(&summary);

  if mode == Mode::Check && categorized.needs_attention() {
    print_hint("Run without --check to add missing headers and refresh out of date ones.");
  }

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(&outcome.reports, &summary) {
      error!("Error generating JSON report: {:#}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  Ok(outcome.has_errors)
}
