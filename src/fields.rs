//! # Fields Module
//!
//! Typed values embedded in header templates through `{{NAME}}` placeholders.
//!
//! Every [`FieldKind`] knows:
//! - the regular expression fragment that matches its written form
//! - how to parse that written form back into a [`FieldValue`]
//! - how to compute a fresh value for a brand-new header
//! - how to refresh a value found in an existing header
//!
//! | Placeholder   | Written form            | Refresh policy                          |
//! |---------------|-------------------------|-----------------------------------------|
//! | `{{YEARS}}`   | `2014` or `2014-2019`   | keep the start year, end at this year   |
//! | `{{DATE}}`    | `2019-05-30`            | replace with today                      |
//! | `{{CREATED}}` | `2019-05-30`            | re-read the file's creation date        |
//!
//! ## Example
//!
//! ```rust
//! use conhead::fields::{FieldKind, FieldValue, Years};
//!
//! let value = FieldKind::Years.parse("2014-2018").unwrap();
//! assert_eq!(value, FieldValue::Years(Years::new(2014, 2018)));
//! assert_eq!(value.to_string(), "2014-2018");
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;

static YEARS_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([0-9]{4})(?:-([0-9]{4}))?$").expect("years regex must compile"));

static DATE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex must compile"));

/// Format used for `DATE` and `CREATED` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years that have a four-digit written form. Computed values outside this
/// range are rejected since the header could not be parsed back.
pub const YEAR_RANGE: RangeInclusive<i32> = 1000..=9999;

/// Errors raised while parsing or computing field values.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
  /// Text is not a year or a year range.
  #[error("cannot parse years: '{0}'")]
  InvalidYears(String),

  /// Text is not a valid `YYYY-MM-DD` calendar date.
  #[error("cannot parse date: '{0}'")]
  InvalidDate(String),

  /// A value of one kind was handed to another kind.
  #[error("{kind} field cannot hold value '{value}'")]
  KindMismatch { kind: FieldKind, value: FieldValue },

  /// The creation time of a file could not be determined.
  #[error("cannot read creation time of {}: {source}", path.display())]
  CreationTime { path: PathBuf, source: std::io::Error },

  /// A computed date falls in a year with no four-digit form.
  #[error("year {0} has no four-digit form")]
  YearOutOfRange(i32),
}

/// Kinds of computed fields that may appear in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
  /// Copyright year range, `{{YEARS}}`.
  Years,
  /// Date of the last header update, `{{DATE}}`.
  Date,
  /// Creation date of the file, `{{CREATED}}`.
  Created,
}

impl FieldKind {
  /// All registered field kinds.
  pub const ALL: [FieldKind; 3] = [FieldKind::Years, FieldKind::Date, FieldKind::Created];

  /// Name used inside a template placeholder.
  pub const fn name(self) -> &'static str {
    match self {
      FieldKind::Years => "YEARS",
      FieldKind::Date => "DATE",
      FieldKind::Created => "CREATED",
    }
  }

  /// Looks up a field kind by its placeholder name. Names are case-sensitive.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|kind| kind.name() == name)
  }

  /// Regular expression fragment matching the written form of this kind.
  ///
  /// The fragment contains no capturing groups so it can be wrapped in one.
  pub const fn pattern(self) -> &'static str {
    match self {
      FieldKind::Years => r"[0-9]{4}(?:-[0-9]{4})?",
      FieldKind::Date | FieldKind::Created => r"[0-9]{4}-[0-9]{2}-[0-9]{2}",
    }
  }

  /// Parses the written form of a value of this kind.
  ///
  /// Validation does not rely on [`pattern`](Self::pattern) having matched
  /// first, so this can be used to check arbitrary text.
  pub fn parse(self, text: &str) -> Result<FieldValue, FieldError> {
    match self {
      FieldKind::Years => Years::parse(text).map(FieldValue::Years),
      FieldKind::Date | FieldKind::Created => parse_date(text).map(FieldValue::Date),
    }
  }

  /// Computes the value written into a header that did not exist before.
  pub fn new_value(self, ctx: &FieldContext<'_>) -> Result<FieldValue, FieldError> {
    match self {
      FieldKind::Years => Ok(FieldValue::Years(Years::single(ctx.today()?.year()))),
      FieldKind::Date => ctx.today().map(FieldValue::Date),
      FieldKind::Created => ctx.creation_date().map(FieldValue::Date),
    }
  }

  /// Refreshes a value parsed from an existing header.
  pub fn update_value(self, ctx: &FieldContext<'_>, prior: &FieldValue) -> Result<FieldValue, FieldError> {
    match (self, prior) {
      (FieldKind::Years, FieldValue::Years(years)) => Ok(FieldValue::Years(years.update(ctx.today()?.year()))),
      (FieldKind::Date, FieldValue::Date(_)) => ctx.today().map(FieldValue::Date),
      // The stored date is never trusted, the file system is.
      (FieldKind::Created, FieldValue::Date(_)) => ctx.creation_date().map(FieldValue::Date),
      (kind, value) => Err(FieldError::KindMismatch { kind, value: *value }),
    }
  }
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// An inclusive range of copyright years.
///
/// `start <= end` is not enforced. Only years in [`YEAR_RANGE`] round-trip
/// through the written form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Years {
  pub start: i32,
  pub end: i32,
}

impl Years {
  pub const fn new(start: i32, end: i32) -> Self {
    Self { start, end }
  }

  /// A range covering a single year.
  pub const fn single(year: i32) -> Self {
    Self { start: year, end: year }
  }

  /// Parses `YYYY` or `YYYY-YYYY`.
  pub fn parse(text: &str) -> Result<Self, FieldError> {
    let caps = YEARS_RE
      .captures(text)
      .ok_or_else(|| FieldError::InvalidYears(text.to_string()))?;
    let start = parse_year(&caps[1], text)?;
    let end = match caps.get(2) {
      Some(end) => parse_year(end.as_str(), text)?,
      None => start,
    };
    Ok(Self { start, end })
  }

  /// Same start year, ending at `year`.
  pub const fn update(self, year: i32) -> Self {
    Self { start: self.start, end: year }
  }
}

impl fmt::Display for Years {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.start == self.end {
      write!(f, "{}", self.start)
    } else {
      write!(f, "{}-{}", self.start, self.end)
    }
  }
}

fn parse_year(digits: &str, text: &str) -> Result<i32, FieldError> {
  digits
    .parse()
    .map_err(|_| FieldError::InvalidYears(text.to_string()))
}

fn checked_year(date: NaiveDate) -> Result<NaiveDate, FieldError> {
  if YEAR_RANGE.contains(&date.year()) {
    Ok(date)
  } else {
    Err(FieldError::YearOutOfRange(date.year()))
  }
}

fn parse_date(text: &str) -> Result<NaiveDate, FieldError> {
  if !DATE_RE.is_match(text) {
    return Err(FieldError::InvalidDate(text.to_string()));
  }
  NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| FieldError::InvalidDate(text.to_string()))
}

/// A concrete value of one field occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
  Years(Years),
  Date(NaiveDate),
}

impl fmt::Display for FieldValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldValue::Years(years) => years.fmt(f),
      FieldValue::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
    }
  }
}

impl From<Years> for FieldValue {
  fn from(years: Years) -> Self {
    FieldValue::Years(years)
  }
}

impl From<NaiveDate> for FieldValue {
  fn from(date: NaiveDate) -> Self {
    FieldValue::Date(date)
  }
}

/// Source of file creation times for `{{CREATED}}` fields.
pub trait CreationSource {
  /// Returns the local creation time of the file at `path`.
  fn created(&self, path: &Path) -> std::io::Result<NaiveDateTime>;
}

/// Reads creation times from file system metadata.
///
/// File systems that do not record birth times yield an `Unsupported` error.
/// The modification time is never used instead: rewriting a header changes
/// it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCreationSource;

impl CreationSource for FsCreationSource {
  fn created(&self, path: &Path) -> std::io::Result<NaiveDateTime> {
    let time: SystemTime = std::fs::metadata(path)?.created()?;
    Ok(DateTime::<Local>::from(time).naive_local())
  }
}

/// Everything a field needs to compute a new or refreshed value.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
  /// Current local time.
  pub now: NaiveDateTime,
  /// File whose header is being computed.
  pub path: &'a Path,
  source: &'a dyn CreationSource,
}

impl<'a> FieldContext<'a> {
  pub const fn new(now: NaiveDateTime, path: &'a Path, source: &'a dyn CreationSource) -> Self {
    Self { now, path, source }
  }

  fn today(&self) -> Result<NaiveDate, FieldError> {
    checked_year(self.now.date())
  }

  fn creation_date(&self) -> Result<NaiveDate, FieldError> {
    let created = self
      .source
      .created(self.path)
      .map_err(|source| FieldError::CreationTime {
        path: self.path.to_path_buf(),
        source,
      })?;
    checked_year(created.date())
  }
}

impl fmt::Debug for FieldContext<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FieldContext")
      .field("now", &self.now)
      .field("path", &self.path)
      .finish_non_exhaustive()
  }
}
