//! # Report Module
//!
//! This module records what happened to every processed file and writes the
//! result as a JSON report.
//!
//! Each [`FileReport`] holds the header status found in the file, the action
//! taken on it and, for files that could not be processed, the error message.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Header status of a processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
  /// Header present with current field values
  UpToDate,
  /// Header present with stale field values
  OutOfDate,
  /// No header found
  MissingHeader,
  /// The file could not be processed
  Error,
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// Nothing was written
  None,
  /// A new header was written
  Added,
  /// Stale header fields were refreshed
  Updated,
  /// The header was removed
  Deleted,
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub status: FileStatus,
  pub action: FileAction,
  /// Error message when `status` is [`FileStatus::Error`]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub fn new(path: &Path, status: FileStatus, action: FileAction) -> Self {
    Self {
      path: path.to_path_buf(),
      status,
      action,
      error: None,
    }
  }

  pub fn error(path: &Path, message: impl Into<String>) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Error,
      action: FileAction::None,
      error: Some(message.into()),
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files processed
  pub total_files: usize,
  pub up_to_date: usize,
  pub out_of_date: usize,
  pub missing_header: usize,
  /// Files that could not be processed
  pub errors: usize,
  pub headers_added: usize,
  pub headers_updated: usize,
  pub headers_deleted: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
  /// Timestamp when the report was generated
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<i64>,
}

impl ProcessingSummary {
  /// Create a new ProcessingSummary initialized to zero
  pub fn new(processing_time: Duration) -> Self {
    Self {
      total_files: 0,
      up_to_date: 0,
      out_of_date: 0,
      missing_header: 0,
      errors: 0,
      headers_added: 0,
      headers_updated: 0,
      headers_deleted: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      timestamp: Some(Local::now().timestamp()),
    }
  }

  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self::new(processing_time);
    summary.total_files = files.len();

    for file in files {
      match file.status {
        FileStatus::UpToDate => summary.up_to_date += 1,
        FileStatus::OutOfDate => summary.out_of_date += 1,
        FileStatus::MissingHeader => summary.missing_header += 1,
        FileStatus::Error => summary.errors += 1,
      }

      match file.action {
        FileAction::Added => summary.headers_added += 1,
        FileAction::Updated => summary.headers_updated += 1,
        FileAction::Deleted => summary.headers_deleted += 1,
        FileAction::None => {}
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct Report<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Report Generator for creating JSON reports
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Renders the report as pretty-printed JSON.
  pub fn render(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    serde_json::to_string_pretty(&Report { summary, files }).context("Failed to serialize report")
  }

  /// Generate a report from a collection of file reports and write it to the
  /// output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = Self::render(files, summary)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
