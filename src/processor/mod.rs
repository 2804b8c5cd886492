//! # Processor Module
//!
//! This module checks files against their header definitions and rewrites
//! them when asked to.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Glob expansion and directory traversal
//!
//! The [`Processor`] struct is the main entry point. Each file goes through
//! the same steps:
//!
//! 1. look up the header definition for its extension
//! 2. read the file
//! 3. parse the header at the start of the file
//! 4. refresh every parsed field and compare with what was found
//!
//! which ends in a [`HeaderStatus`] or a per-file [`ProcessError`]. Depending
//! on the [`Mode`], stale headers are then refreshed, missing ones added, or
//! existing ones removed.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDateTime;
pub use file_collector::{FileCollector, Target};
pub use file_io::{FileIO, IoFailure};
use tracing::{debug, error, info, trace, warn};

use crate::config::{Config, HeaderDef};
use crate::diff::DiffManager;
use crate::fields::{CreationSource, FieldContext, FieldError, FieldValue, FsCreationSource};
use crate::report::{FileAction, FileReport, FileStatus};
use crate::template::{ParsedHeader, RenderError};

/// What a run does to files that need a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
  /// Add missing headers and refresh stale ones.
  #[default]
  Write,
  /// Report missing and stale headers without writing.
  Check,
  /// Remove existing headers.
  Delete,
}

/// Header state of a file that was read and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
  /// No header written from the definition's template.
  Headerless,
  /// Header present and every field is current.
  UpToDate,
  /// Header present with at least one stale field.
  OutOfDate,
}

impl From<HeaderStatus> for FileStatus {
  fn from(status: HeaderStatus) -> Self {
    match status {
      HeaderStatus::Headerless => FileStatus::MissingHeader,
      HeaderStatus::UpToDate => FileStatus::UpToDate,
      HeaderStatus::OutOfDate => FileStatus::OutOfDate,
    }
  }
}

/// A file that could not be checked or rewritten.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  #[error("no header def: {}", path.display())]
  NoDefinition { path: PathBuf },

  #[error("file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("unreadable: {}", path.display())]
  Unreadable { path: PathBuf },

  #[error("unwritable: {}", path.display())]
  Unwritable { path: PathBuf },

  #[error("{detail}: {}", path.display())]
  Io { path: PathBuf, detail: String },

  #[error("invalid header field in {}: {source}", path.display())]
  Field { path: PathBuf, source: FieldError },

  #[error("cannot render header for {}: {source}", path.display())]
  Render { path: PathBuf, source: RenderError },
}

impl ProcessError {
  fn read_failure(path: &Path, failure: IoFailure) -> Self {
    let path = path.to_path_buf();
    match failure {
      IoFailure::NotFound => ProcessError::NotFound { path },
      IoFailure::PermissionDenied => ProcessError::Unreadable { path },
      IoFailure::Other(detail) => ProcessError::Io { path, detail },
    }
  }

  fn write_failure(path: &Path, failure: IoFailure) -> Self {
    let path = path.to_path_buf();
    match failure {
      IoFailure::PermissionDenied => ProcessError::Unwritable { path },
      IoFailure::NotFound => ProcessError::Io {
        path,
        detail: failure.to_string(),
      },
      IoFailure::Other(detail) => ProcessError::Io { path, detail },
    }
  }
}

/// Result of checking one file.
#[derive(Debug, Clone)]
pub struct CheckResult<'a> {
  pub path: PathBuf,
  pub header_def: &'a HeaderDef,
  /// Full content of the file as read.
  pub content: String,
  /// Header found at the start of the file.
  pub parsed: Option<ParsedHeader>,
  /// Refreshed field values, only for [`HeaderStatus::OutOfDate`].
  pub updated: Option<Vec<FieldValue>>,
  pub status: HeaderStatus,
}

impl CheckResult<'_> {
  /// Whether this file fails the run in `mode`.
  ///
  /// Writing and checking want every header current. Deleting wants no
  /// header at all.
  pub fn is_dirty(&self, mode: Mode) -> bool {
    match mode {
      Mode::Write | Mode::Check => self.status != HeaderStatus::UpToDate,
      Mode::Delete => self.status != HeaderStatus::Headerless,
    }
  }

  /// File content following the header, or all of it when there is none.
  pub fn remainder(&self) -> &str {
    let header_len = self.parsed.as_ref().map_or(0, |parsed| parsed.header.len());
    &self.content[header_len..]
  }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
  /// Any file failed, needed a change, or could not be processed.
  pub has_errors: bool,
  pub reports: Vec<FileReport>,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub config: Config,
  pub mode: Mode,
  /// Time used to compute field values.
  pub now: NaiveDateTime,

  // Optional components
  pub diff_manager: Option<DiffManager>,
  pub creation_source: Option<Box<dyn CreationSource>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     mode: Mode::Check,
  ///     ..ProcessorConfig::new(config, now)
  /// }
  /// ```
  pub fn new(config: Config, now: NaiveDateTime) -> Self {
    Self {
      config,
      mode: Mode::Write,
      now,
      diff_manager: None,
      creation_source: None,
    }
  }
}

/// Processor for checking and rewriting headers.
pub struct Processor {
  config: Config,
  mode: Mode,
  now: NaiveDateTime,
  diff_manager: DiffManager,
  creation_source: Box<dyn CreationSource>,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      config: config.config,
      mode: config.mode,
      now: config.now,
      diff_manager: config.diff_manager.unwrap_or_default(),
      creation_source: config.creation_source.unwrap_or_else(|| Box::new(FsCreationSource)),
    }
  }

  pub const fn mode(&self) -> Mode {
    self.mode
  }

  pub const fn config(&self) -> &Config {
    &self.config
  }

  fn field_context<'a>(&'a self, path: &'a Path) -> FieldContext<'a> {
    FieldContext::new(self.now, path, self.creation_source.as_ref())
  }

  /// Checks whether a file has a header and whether it is up to date.
  ///
  /// # Errors
  ///
  /// Returns a [`ProcessError`] when no header definition covers the file,
  /// when it cannot be read, or when a header field holds an invalid value.
  pub fn check_path(&self, path: &Path) -> Result<CheckResult<'_>, ProcessError> {
    info!("process {}", path.display());

    let header_def = self
      .config
      .header_for_path(path)
      .ok_or_else(|| ProcessError::NoDefinition {
        path: path.to_path_buf(),
      })?;

    let content = FileIO::read_text(path).map_err(|failure| ProcessError::read_failure(path, failure))?;

    let field_error = |source| ProcessError::Field {
      path: path.to_path_buf(),
      source,
    };

    let Some(parsed) = header_def.template().parse(&content).map_err(field_error)? else {
      warn!("missing header: {}", path.display());
      return Ok(CheckResult {
        path: path.to_path_buf(),
        header_def,
        content,
        parsed: None,
        updated: None,
        status: HeaderStatus::Headerless,
      });
    };

    let ctx = self.field_context(path);
    let refreshed = header_def
      .template()
      .fields()
      .iter()
      .zip(&parsed.fields)
      .map(|(kind, prior)| kind.update_value(&ctx, prior))
      .collect::<Result<Vec<_>, _>>();

    let updated = match refreshed {
      Ok(updated) => updated,
      // Deleting never uses refreshed values, so an unknown field state does
      // not block it.
      Err(err) if self.mode == Mode::Delete => {
        debug!("Cannot refresh fields of {}: {}", path.display(), err);
        warn!("out of date: {}", path.display());
        return Ok(CheckResult {
          path: path.to_path_buf(),
          header_def,
          content,
          parsed: Some(parsed),
          updated: None,
          status: HeaderStatus::OutOfDate,
        });
      }
      Err(err) => return Err(field_error(err)),
    };

    let (status, updated) = if updated == parsed.fields {
      info!("up to date: {}", path.display());
      (HeaderStatus::UpToDate, None)
    } else {
      warn!("out of date: {}", path.display());
      (HeaderStatus::OutOfDate, Some(updated))
    };

    Ok(CheckResult {
      path: path.to_path_buf(),
      header_def,
      content,
      parsed: Some(parsed),
      updated,
      status,
    })
  }

  /// Computes the new content of a checked file for the current mode.
  ///
  /// Returns `Ok(None)` when the file needs no change. In check mode the
  /// content that would be written is still returned, so it can be diffed.
  pub fn rewrite(&self, result: &CheckResult<'_>) -> Result<Option<String>, ProcessError> {
    let template = result.header_def.template();
    let render_error = |source| ProcessError::Render {
      path: result.path.clone(),
      source,
    };

    let values = match (self.mode, result.status) {
      (Mode::Delete, HeaderStatus::Headerless) | (Mode::Write | Mode::Check, HeaderStatus::UpToDate) => {
        return Ok(None);
      }
      (Mode::Delete, _) => return Ok(Some(result.remainder().to_string())),
      (_, HeaderStatus::OutOfDate) => result.updated.clone().unwrap_or_default(),
      (_, HeaderStatus::Headerless) => {
        let ctx = self.field_context(&result.path);
        template
          .fields()
          .iter()
          .map(|kind| kind.new_value(&ctx))
          .collect::<Result<Vec<_>, _>>()
          .map_err(|source| ProcessError::Field {
            path: result.path.clone(),
            source,
          })?
      }
    };

    let mut content = String::with_capacity(result.content.len() + template.source().len());
    template.write_header(&values, &mut content).map_err(render_error)?;
    content.push_str(result.remainder());
    Ok(Some(content))
  }

  /// Processes a list of file paths, directory paths or glob patterns.
  ///
  /// Every collected file is checked and, unless in check mode, rewritten
  /// when it needs a change.
  ///
  /// # Errors
  ///
  /// Returns an error only if a glob pattern is invalid. Per-file problems are
  /// logged, reported and folded into [`ProcessOutcome::has_errors`].
  pub fn process(&self, patterns: &[String]) -> Result<ProcessOutcome> {
    let targets = self.collect_files(patterns)?;
    Ok(self.process_collected(&targets))
  }

  /// Collects the files a run over `patterns` would process.
  ///
  /// Files found by walking a directory that no header definition covers are
  /// left out.
  pub fn collect_files(&self, patterns: &[String]) -> Result<Vec<Target>> {
    let mut targets = FileCollector::collect(patterns)?;
    targets.retain(|target| {
      let keep = target.explicit || self.config.header_for_path(&target.path).is_some();
      if !keep {
        trace!("Skipping: {} (no header definition)", target.path.display());
      }
      keep
    });
    Ok(targets)
  }

  /// Processes files from a pre-collected list, in order.
  ///
  /// Use this when files have already been collected via
  /// [`collect_files`](Self::collect_files).
  pub fn process_collected(&self, targets: &[Target]) -> ProcessOutcome {
    let start = Instant::now();

    let mut outcome = ProcessOutcome::default();
    for target in targets {
      let (report, dirty) = self.process_file(&target.path);
      outcome.has_errors |= dirty;
      outcome.reports.push(report);
    }

    debug!(
      "Processed {} files in {}ms",
      outcome.reports.len(),
      start.elapsed().as_millis()
    );
    outcome
  }

  /// Checks and rewrites a single file.
  ///
  /// Returns the file's report and whether it counts against the run.
  pub fn process_file(&self, path: &Path) -> (FileReport, bool) {
    let result = match self.check_path(path) {
      Ok(result) => result,
      Err(err) => return Self::failed(path, &err),
    };

    let status = FileStatus::from(result.status);
    if !result.is_dirty(self.mode) {
      return (FileReport::new(path, status, FileAction::None), false);
    }

    if self.mode == Mode::Check && !self.diff_manager.is_enabled() {
      return (FileReport::new(path, status, FileAction::None), true);
    }

    let new_content = match self.rewrite(&result) {
      Ok(Some(content)) => content,
      Ok(None) => return (FileReport::new(path, status, FileAction::None), true),
      // In check mode the content is only needed for the diff.
      Err(err) if self.mode == Mode::Check => {
        warn!("Failed to compute diff for {}: {}", path.display(), err);
        return (FileReport::new(path, status, FileAction::None), true);
      }
      Err(err) => return Self::failed(path, &err),
    };

    if self.diff_manager.is_enabled()
      && let Err(e) = self.diff_manager.display_diff(path, &result.content, &new_content)
    {
      warn!("Failed to display diff for {}: {}", path.display(), e);
    }

    if self.mode == Mode::Check {
      return (FileReport::new(path, status, FileAction::None), true);
    }

    info!("rewriting: {}", path.display());
    if let Err(failure) = FileIO::write_text(path, &new_content) {
      return Self::failed(path, &ProcessError::write_failure(path, failure));
    }

    let action = match (self.mode, result.status) {
      (Mode::Delete, _) => FileAction::Deleted,
      (_, HeaderStatus::Headerless) => FileAction::Added,
      _ => FileAction::Updated,
    };
    (FileReport::new(path, status, action), true)
  }

  fn failed(path: &Path, err: &ProcessError) -> (FileReport, bool) {
    error!("{}", err);
    (FileReport::error(path, err.to_string()), true)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use tempfile::TempDir;

  use super::*;
  use crate::fields::Years;

  const HASH_TEMPLATE: &str = "# line 1 {{YEARS}}\n# line 2 {{YEARS}}\n";
  const SLASH_TEMPLATE: &str = "// line 1 {{YEARS}}\n// line 2 {{YEARS}}\n";

  struct FixedCreation;

  impl CreationSource for FixedCreation {
    fn created(&self, _path: &Path) -> std::io::Result<NaiveDateTime> {
      NaiveDate::from_ymd_opt(2017, 3, 4)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .ok_or_else(|| std::io::Error::other("bad date"))
    }
  }

  struct NoBirthTime;

  impl CreationSource for NoBirthTime {
    fn created(&self, _path: &Path) -> std::io::Result<NaiveDateTime> {
      Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "creation time is not available",
      ))
    }
  }

  fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 6, 1)
      .and_then(|d| d.and_hms_opt(12, 0, 0))
      .expect("valid datetime")
  }

  fn test_config() -> Config {
    Config::new(vec![
      HeaderDef::new("header1", HASH_TEMPLATE, vec!["ext1".into(), "ext2".into()]).expect("header1"),
      HeaderDef::new("header2", SLASH_TEMPLATE, vec!["ext3".into(), "ext4".into()]).expect("header2"),
      HeaderDef::new("dated", "// created {{CREATED}} updated {{DATE}}\n", vec!["dated".into()]).expect("dated"),
    ])
  }

  fn processor(mode: Mode) -> Processor {
    Processor::new(ProcessorConfig {
      mode,
      creation_source: Some(Box::new(FixedCreation)),
      ..ProcessorConfig::new(test_config(), now())
    })
  }

  fn processor_without_birth_time(mode: Mode, diff_manager: Option<DiffManager>) -> Processor {
    Processor::new(ProcessorConfig {
      mode,
      diff_manager,
      creation_source: Some(Box::new(NoBirthTime)),
      ..ProcessorConfig::new(test_config(), now())
    })
  }

  fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write test file");
    path
  }

  fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read test file")
  }

  #[test]
  fn test_check_up_to_date() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "up-to-date.ext2", "# line 1 2019\n# line 2 2014-2019\n");

    let checker = processor(Mode::Check);
    let result = checker.check_path(&path).expect("check");
    assert_eq!(result.status, HeaderStatus::UpToDate);
    assert_eq!(result.header_def.name(), "header1");
    assert_eq!(result.updated, None);
    assert_eq!(
      result.parsed.expect("parsed").fields,
      vec![
        FieldValue::Years(Years::single(2019)),
        FieldValue::Years(Years::new(2014, 2019))
      ]
    );
  }

  #[test]
  fn test_check_out_of_date() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "out-of-date.ext4", "// line 1 2018\n// line 2 2014-2018\ncontent\n");

    let checker = processor(Mode::Check);
    let result = checker.check_path(&path).expect("check");
    assert_eq!(result.status, HeaderStatus::OutOfDate);
    assert_eq!(
      result.updated,
      Some(vec![
        FieldValue::Years(Years::new(2018, 2019)),
        FieldValue::Years(Years::new(2014, 2019))
      ])
    );
  }

  #[test]
  fn test_check_headerless() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "no-header.ext3", "// No proper header\n");

    let checker = processor(Mode::Check);
    let result = checker.check_path(&path).expect("check");
    assert_eq!(result.status, HeaderStatus::Headerless);
    assert!(result.parsed.is_none());
    assert_eq!(result.remainder(), "// No proper header\n");
  }

  #[test]
  fn test_check_no_definition() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "unmatched.unknown", "whatever\n");

    let err = processor(Mode::Check).check_path(&path).expect_err("should fail");
    assert!(matches!(err, ProcessError::NoDefinition { .. }));
    assert_eq!(err.to_string(), format!("no header def: {}", path.display()));
  }

  #[test]
  fn test_check_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("missing.ext1");

    let err = processor(Mode::Check).check_path(&path).expect_err("should fail");
    assert!(matches!(err, ProcessError::NotFound { .. }));
    assert_eq!(err.to_string(), format!("file not found: {}", path.display()));
  }

  #[test]
  fn test_check_invalid_field_value() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "bad.dated", "// created 2019-13-45 updated 2019-06-01\n");

    let err = processor(Mode::Check).check_path(&path).expect_err("should fail");
    assert!(matches!(err, ProcessError::Field { .. }));
  }

  #[test]
  fn test_up_to_date_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let content = "# line 1 2019\n# line 2 2014-2019\nbody\n";
    let path = write(&dir, "a.ext1", content);

    let (report, dirty) = processor(Mode::Write).process_file(&path);
    assert!(!dirty);
    assert_eq!(report.action, FileAction::None);
    assert_eq!(read(&path), content);
  }

  #[test]
  fn test_write_refreshes_stale_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "out-of-date.ext4", "// line 1 2018\n// line 2 2014-2018\ncontent\n");

    let (report, dirty) = processor(Mode::Write).process_file(&path);
    assert!(dirty);
    assert_eq!(report.status, FileStatus::OutOfDate);
    assert_eq!(report.action, FileAction::Updated);
    assert_eq!(read(&path), "// line 1 2018-2019\n// line 2 2014-2019\ncontent\n");

    let (_, dirty) = processor(Mode::Write).process_file(&path);
    assert!(!dirty);
  }

  #[test]
  fn test_write_adds_missing_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "no-header.ext3", "// No proper header\n");

    let (report, dirty) = processor(Mode::Write).process_file(&path);
    assert!(dirty);
    assert_eq!(report.action, FileAction::Added);
    assert_eq!(read(&path), "// line 1 2019\n// line 2 2019\n// No proper header\n");
  }

  #[test]
  fn test_write_adds_dated_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "body\n");

    processor(Mode::Write).process_file(&path);
    assert_eq!(read(&path), "// created 2017-03-04 updated 2019-06-01\nbody\n");
  }

  #[test]
  fn test_created_header_is_current_right_after_write() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "body\n");

    let processor = processor(Mode::Write);
    let (report, dirty) = processor.process_file(&path);
    assert!(dirty);
    assert_eq!(report.action, FileAction::Added);

    let result = processor.check_path(&path).expect("check");
    assert_eq!(result.status, HeaderStatus::UpToDate);
    assert!(!processor.process_file(&path).1);
  }

  #[test]
  fn test_write_without_birth_time_leaves_file_alone() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "body\n");

    let (report, dirty) = processor_without_birth_time(Mode::Write, None).process_file(&path);
    assert!(dirty);
    assert_eq!(report.status, FileStatus::Error);
    assert!(
      report
        .error
        .as_deref()
        .is_some_and(|e| e.contains("cannot read creation time"))
    );
    assert_eq!(read(&path), "body\n");
  }

  #[test]
  fn test_check_with_diff_keeps_status_when_content_fails() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "body\n");
    let diff_path = dir.path().join("changes.diff");

    let processor = processor_without_birth_time(Mode::Check, Some(DiffManager::new(false, Some(diff_path))));
    let (report, dirty) = processor.process_file(&path);
    assert!(dirty);
    assert_eq!(report.status, FileStatus::MissingHeader);
    assert_eq!(report.action, FileAction::None);
    assert_eq!(report.error, None);
  }

  #[test]
  fn test_delete_without_birth_time_still_strips_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "// created 2017-03-04 updated 2019-06-01\nbody\n");

    let (report, dirty) = processor_without_birth_time(Mode::Delete, None).process_file(&path);
    assert!(dirty);
    assert_eq!(report.action, FileAction::Deleted);
    assert_eq!(read(&path), "body\n");
  }

  #[test]
  fn test_check_without_birth_time_is_error_for_existing_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.dated", "// created 2017-03-04 updated 2019-06-01\nbody\n");

    let err = processor_without_birth_time(Mode::Check, None)
      .check_path(&path)
      .expect_err("should fail");
    assert!(matches!(err, ProcessError::Field { .. }));
  }

  #[test]
  fn test_check_never_writes() {
    let dir = TempDir::new().expect("temp dir");
    let content = "// line 1 2018\n// line 2 2014-2018\ncontent\n";
    let path = write(&dir, "out-of-date.ext4", content);

    let (report, dirty) = processor(Mode::Check).process_file(&path);
    assert!(dirty);
    assert_eq!(report.status, FileStatus::OutOfDate);
    assert_eq!(report.action, FileAction::None);
    assert_eq!(read(&path), content);
  }

  #[test]
  fn test_check_with_diff_computes_but_does_not_write() {
    let dir = TempDir::new().expect("temp dir");
    let content = "// No proper header\n";
    let path = write(&dir, "no-header.ext3", content);
    let diff_path = dir.path().join("changes.diff");

    let processor = Processor::new(ProcessorConfig {
      mode: Mode::Check,
      diff_manager: Some(DiffManager::new(false, Some(diff_path.clone()))),
      ..ProcessorConfig::new(test_config(), now())
    });
    let (_, dirty) = processor.process_file(&path);

    assert!(dirty);
    assert_eq!(read(&path), content);
    assert!(read(&diff_path).contains("+// line 1 2019\n"));
  }

  #[test]
  fn test_delete_strips_header_span() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.ext1", "# line 1 2015\n# line 2 2014-2016\n\ntrailing\ncontent\n");

    let (report, dirty) = processor(Mode::Delete).process_file(&path);
    assert!(dirty);
    assert_eq!(report.action, FileAction::Deleted);
    assert_eq!(read(&path), "\ntrailing\ncontent\n");
  }

  #[test]
  fn test_delete_leaves_headerless_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "no-header.ext3", "// No proper header\n");

    let (report, dirty) = processor(Mode::Delete).process_file(&path);
    assert!(!dirty);
    assert_eq!(report.action, FileAction::None);
    assert_eq!(read(&path), "// No proper header\n");
  }

  #[test]
  fn test_rewrite_returns_nothing_when_current() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "a.ext1", "# line 1 2019\n# line 2 2019\n");

    let processor = processor(Mode::Write);
    let result = processor.check_path(&path).expect("check");
    assert_eq!(processor.rewrite(&result).expect("rewrite"), None);
  }

  #[test]
  fn test_process_mixed_files() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "up-to-date.ext2", "# line 1 2019\n# line 2 2014-2019\n");
    write(&dir, "no-header.ext3", "// No proper header\n");
    write(&dir, "unmatched.unknown", "skipped when walking\n");

    let root = dir.path().to_string_lossy().into_owned();
    let outcome = processor(Mode::Check).process(&[root]).expect("process");

    assert!(outcome.has_errors);
    let statuses: Vec<_> = outcome
      .reports
      .iter()
      .map(|r| (r.path.file_name().map(|n| n.to_string_lossy().into_owned()), r.status))
      .collect();
    assert_eq!(
      statuses,
      vec![
        (Some("no-header.ext3".to_string()), FileStatus::MissingHeader),
        (Some("up-to-date.ext2".to_string()), FileStatus::UpToDate),
      ]
    );
  }

  #[test]
  fn test_process_explicit_unknown_file_is_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(&dir, "unmatched.unknown", "x\n");

    let outcome = processor(Mode::Check)
      .process(&[path.to_string_lossy().into_owned()])
      .expect("process");
    assert!(outcome.has_errors);
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].status, FileStatus::Error);
  }

  #[test]
  fn test_process_all_up_to_date() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "a.ext1", "# line 1 2019\n# line 2 2019\n");
    write(&dir, "b.ext3", "// line 1 2010-2019\n// line 2 2019\n");

    let root = dir.path().to_string_lossy().into_owned();
    let outcome = processor(Mode::Write).process(&[root]).expect("process");
    assert!(!outcome.has_errors);
    assert_eq!(outcome.reports.len(), 2);
  }
}
