//! # File Collector Module
//!
//! This module turns command line arguments into the ordered list of files to
//! process.
//!
//! - an existing file is processed as given
//! - an existing directory is walked recursively in file name order, skipping
//!   symlinks and special files
//! - a missing path containing glob metacharacters is expanded with `glob`
//! - any other missing path is kept, so processing reports it as not found

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// A file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub path: PathBuf,
  /// Named on the command line (directly or through a glob) rather than found
  /// by walking a directory.
  pub explicit: bool,
}

impl Target {
  fn explicit(path: PathBuf) -> Self {
    Self { path, explicit: true }
  }

  fn walked(path: PathBuf) -> Self {
    Self { path, explicit: false }
  }
}

fn has_glob_metachars(pattern: &str) -> bool {
  pattern.contains(['*', '?', '['])
}

/// File collector for pattern expansion and directory traversal.
pub struct FileCollector;

impl FileCollector {
  /// Collects the files named by `patterns`, in argument order.
  ///
  /// Each file appears once, at its first position.
  ///
  /// # Errors
  ///
  /// Returns an error if a glob pattern is invalid.
  pub fn collect(patterns: &[String]) -> Result<Vec<Target>> {
    let mut targets = Vec::new();

    for pattern in patterns {
      let path = PathBuf::from(pattern);
      if path.exists() {
        Self::collect_path(path, &mut targets);
      } else if has_glob_metachars(pattern) {
        let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        let before = targets.len();
        for entry in entries {
          match entry {
            Ok(path) => Self::collect_path(path, &mut targets),
            Err(e) => warn!("Error with glob pattern: {}", e),
          }
        }
        if targets.len() == before {
          warn!("no files match pattern: {}", pattern);
        }
      } else {
        targets.push(Target::explicit(path));
      }
    }

    let mut seen = HashSet::new();
    targets.retain(|target| seen.insert(target.path.clone()));
    debug!("Collected {} files", targets.len());
    Ok(targets)
  }

  fn collect_path(path: PathBuf, targets: &mut Vec<Target>) {
    if path.is_dir() {
      targets.extend(Self::traverse_directory(&path).into_iter().map(Target::walked));
    } else if path.is_file() {
      targets.push(Target::explicit(path));
    } else {
      trace!("Skipping: {} (not a regular file)", path.display());
    }
  }

  /// Traverses a directory recursively and collects all regular files.
  ///
  /// Entries are sorted by file name. Symlinks are not followed and are not
  /// collected. Unreadable entries are logged and skipped.
  pub fn traverse_directory(dir: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
      match entry {
        Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
        Ok(entry) => {
          if !entry.file_type().is_dir() {
            trace!("Skipping: {} (not a regular file)", entry.path().display());
          }
        }
        Err(e) => warn!("Error reading directory entry: {}", e),
      }
    }

    debug!("Found {} files in {}ms", files.len(), start_time.elapsed().as_millis());
    files
  }
}
