//! # Output Module
//!
//! This module centralizes all user-facing output for the conhead tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Per-file events are logged through `tracing` on stderr. What is printed
//! here goes to stdout, after all files have been processed:
//!
//! - lists of files that need attention or were changed
//! - a one-line summary
//!
//! With `-q` only the paths of files that need attention are printed, one per
//! line, for scripting.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::Mode;
use crate::report::{FileAction, FileReport, FileStatus, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/up to date
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header refreshed or out of date
  pub const UPDATED: &str = "\u{21bb}"; // ↻
  /// Header removed
  pub const DELETED: &str = "-";
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, mode: Mode) {
  if is_quiet() {
    return;
  }

  let verb = match mode {
    Mode::Write => "Processing",
    Mode::Check => "Checking",
    Mode::Delete => "Removing headers from",
  };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a titled list of files.
///
/// Shows up to `DEFAULT_FILE_LIST_LIMIT` files, or all of them in verbose
/// mode. Files are sorted alphabetically by path. In quiet mode only the
/// paths are printed, and only when `show_when_quiet` is set.
fn print_file_list(symbol: &str, title: &str, files: &[&FileReport], base_dir: Option<&Path>, show_when_quiet: bool) {
  if files.is_empty() {
    return;
  }

  let mut sorted_files: Vec<_> = files.to_vec();
  sorted_files.sort_by(|a, b| a.path.cmp(&b.path));

  if is_quiet() {
    if show_when_quiet {
      for file in &sorted_files {
        println!("{}", make_relative_path(&file.path, base_dir));
      }
    }
    return;
  }

  let count = sorted_files.len();
  println!(
    "{} {} {} {}:",
    symbol,
    count,
    if count == 1 { "file" } else { "files" },
    title
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in sorted_files.iter().take(limit) {
    let display_path = make_relative_path(&file.path, base_dir);
    match &file.error {
      Some(error) => println!("  {} ({})", display_path, error),
      None => println!("  {}", display_path),
    }
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print the lists of files for a finished run.
pub fn print_file_lists(categorized: &CategorizedReports<'_>, base_dir: Option<&Path>) {
  let failure = symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()).to_string();
  let updated = symbols::UPDATED
    .if_supports_color(Stream::Stdout, |s| s.yellow())
    .to_string();
  let success = symbols::SUCCESS
    .if_supports_color(Stream::Stdout, |s| s.green())
    .to_string();
  let deleted = symbols::DELETED
    .if_supports_color(Stream::Stdout, |s| s.yellow())
    .to_string();

  print_file_list(&failure, "could not be processed", &categorized.errors, base_dir, true);
  print_file_list(&failure, "missing headers", &categorized.missing, base_dir, true);
  print_file_list(&updated, "with out of date headers", &categorized.outdated, base_dir, true);
  print_file_list(&success, "with headers added", &categorized.added, base_dir, false);
  print_file_list(&updated, "with headers updated", &categorized.updated, base_dir, false);
  print_file_list(&deleted, "with headers removed", &categorized.deleted, base_dir, false);
}

/// Print the success message when every header is current.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All headers are up to date.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y missing, Z out of date, W errors"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let highlight = |count: usize| {
    if count > 0 {
      count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
    } else {
      count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
    }
  };

  let mut summary_line = format!(
    "Summary: {} OK, {} missing, {} out of date, {} errors",
    summary.up_to_date.if_supports_color(Stream::Stdout, |s| s.cyan()),
    highlight(summary.missing_header),
    highlight(summary.out_of_date),
    highlight(summary.errors)
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// File reports grouped for output.
///
/// Files that were changed are listed by the action taken. Files left alone
/// are listed by their status.
#[derive(Debug, Default)]
pub struct CategorizedReports<'a> {
  pub errors: Vec<&'a FileReport>,
  /// Files without a header that were not given one
  pub missing: Vec<&'a FileReport>,
  /// Files with a stale header that was not refreshed
  pub outdated: Vec<&'a FileReport>,
  pub added: Vec<&'a FileReport>,
  pub updated: Vec<&'a FileReport>,
  pub deleted: Vec<&'a FileReport>,
  /// Files left unchanged with a current header
  pub ok: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports.
  ///
  /// In delete mode a missing header is the desired state, so headerless
  /// files count as ok.
  pub fn from_reports(reports: &'a [FileReport], mode: Mode) -> Self {
    let mut categorized = Self::default();

    for report in reports {
      let bucket = match (report.action, report.status) {
        (FileAction::Added, _) => &mut categorized.added,
        (FileAction::Updated, _) => &mut categorized.updated,
        (FileAction::Deleted, _) => &mut categorized.deleted,
        (FileAction::None, FileStatus::Error) => &mut categorized.errors,
        (FileAction::None, FileStatus::MissingHeader) if mode != Mode::Delete => &mut categorized.missing,
        (FileAction::None, FileStatus::OutOfDate) if mode != Mode::Delete => &mut categorized.outdated,
        (FileAction::None, _) => &mut categorized.ok,
      };
      bucket.push(report);
    }

    categorized
  }

  /// Whether any file still needs attention.
  pub fn needs_attention(&self) -> bool {
    !(self.errors.is_empty() && self.missing.is_empty() && self.outdated.is_empty())
  }
}

/// Make a path relative to `base_dir` for display.
fn make_relative_path(path: &Path, base_dir: Option<&Path>) -> String {
  match base_dir {
    Some(base) if path.is_absolute() => pathdiff::diff_paths(path, base)
      .filter(|relative| !relative.starts_with(".."))
      .map_or_else(
        || path.to_string_lossy().to_string(),
        |relative| relative.to_string_lossy().to_string(),
      ),
    _ => path.to_string_lossy().to_string(),
  }
}
