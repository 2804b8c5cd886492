#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use conhead::config::{Config, HeaderDef};
use tempfile::{TempDir, tempdir};

/// Date every test run pretends is today.
pub const TODAY: &str = "2019-06-01";

pub const HASH_TEMPLATE: &str = "# line 1 {{YEARS}}\n# line 2 {{YEARS}}\n";
pub const SLASH_TEMPLATE: &str = "// line 1 {{YEARS}}\n// line 2 {{YEARS}}\n";

/// `.conhead.toml` with a `#` header for ext1/ext2 and a `//` header for
/// ext3/ext4.
pub const CONFIG_TOML: &str = r#"
[header.header1]
extensions = ["ext1", "ext2"]
template = """
    # line 1 {{YEARS}}
    # line 2 {{YEARS}}
"""

[header.header2]
extensions = ["ext3", "ext4"]
template = """
    // line 1 {{YEARS}}
    // line 2 {{YEARS}}
"""
"#;

pub const UP_TO_DATE: &str = "# line 1 2019\n# line 2 2014-2019\n";
pub const OUT_OF_DATE: &str = "// line 1 2018\n// line 2 2014-2018\ncontent\n";
pub const NO_HEADER: &str = "// No proper header\n";

pub fn now() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2019, 6, 1)
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .expect("valid datetime")
}

/// The two header definitions of [`CONFIG_TOML`], built through the API.
pub fn test_config() -> Result<Config> {
  Ok(Config::new(vec![
    HeaderDef::new("header1", HASH_TEMPLATE, vec!["ext1".into(), "ext2".into()])?,
    HeaderDef::new("header2", SLASH_TEMPLATE, vec!["ext3".into(), "ext4".into()])?,
  ]))
}

/// Temporary project directory holding a `.conhead.toml`.
pub fn project() -> Result<TempDir> {
  let dir = tempdir()?;
  fs::write(dir.path().join(".conhead.toml"), CONFIG_TOML)?;
  Ok(dir)
}

/// Writes `content` to `name` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

pub fn read_file(path: &Path) -> Result<String> {
  Ok(fs::read_to_string(path)?)
}
