//! # Diff Module
//!
//! This module creates and renders line diffs between the original and the
//! rewritten content of a file. It shows what a run would change, or what it
//! did change, to a file's header.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
///
/// This struct handles:
/// - Generating diffs between original and modified content
/// - Displaying diffs to stdout with colorization
/// - Appending diffs to a file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stdout
  pub show_diff: bool,

  /// Path of a file that every diff is appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Starts a fresh diff file, truncating any previous content.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      std::fs::File::create(diff_path)
        .with_context(|| format!("Failed to create diff file: {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the diff for one file as plain text.
  ///
  /// The first line names the file. Every following line starts with `-`, `+`
  /// or a space, like a unified diff without hunk headers.
  pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
    let mut diff_content = format!("Diff for {}:\n", path.display());

    for change in TextDiff::from_lines(original, new).iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      diff_content.push_str(sign);
      diff_content.push_str(change.value());
      if change.missing_newline() {
        diff_content.push('\n');
      }
    }

    diff_content
  }

  /// Displays and/or saves a diff between the original and new content.
  ///
  /// If show_diff is enabled, the diff is printed to stdout, colorized when
  /// colors are enabled. If save_diff_path is set, the diff is appended to
  /// that file, so diffs from several files end up in one consolidated diff
  /// file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let diff_content = Self::render_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        if line.starts_with('+') {
          println!("{}", line.if_supports_color(Stream::Stdout, |l| l.green()));
        } else if line.starts_with('-') {
          println!("{}", line.if_supports_color(Stream::Stdout, |l| l.red()));
        } else {
          println!("{}", line);
        }
      }
      println!();
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(format!("{}\n", diff_content).as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
