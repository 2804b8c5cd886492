//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Failures are classified so that the caller can report missing files,
//! permission problems and other I/O errors differently.

use std::io::ErrorKind;
use std::path::Path;

/// Why a file could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IoFailure {
  #[error("file not found")]
  NotFound,

  #[error("permission denied")]
  PermissionDenied,

  #[error("{0}")]
  Other(String),
}

impl From<std::io::Error> for IoFailure {
  fn from(err: std::io::Error) -> Self {
    match err.kind() {
      ErrorKind::NotFound => IoFailure::NotFound,
      ErrorKind::PermissionDenied => IoFailure::PermissionDenied,
      _ => IoFailure::Other(format!("{err} ({:?})", err.kind())),
    }
  }
}

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing whole files as
/// UTF-8 text.
pub struct FileIO;

impl FileIO {
  /// Reads the full content of a file.
  ///
  /// Content that is not valid UTF-8 is reported as [`IoFailure::Other`].
  pub fn read_text(path: &Path) -> Result<String, IoFailure> {
    Ok(std::fs::read_to_string(path)?)
  }

  /// Replaces the content of a file.
  pub fn write_text(path: &Path, content: &str) -> Result<(), IoFailure> {
    Ok(std::fs::write(path, content)?)
  }
}
