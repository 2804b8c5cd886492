//! # Configuration Module
//!
//! This module loads header definitions. Each definition names a template and
//! the file extensions it applies to.
//!
//! Configuration is read from a `.conhead.toml` file:
//!
//! ```toml
//! [header.py]
//! extensions = ["py", "pyi"]
//! template = """
//!     # Copyright {{YEARS}} Acme
//!     # SPDX-License-Identifier: Apache-2.0
//! """
//! ```
//!
//! or from the `[tool.conhead]` section of a `pyproject.toml`, with the same
//! tables under `[tool.conhead.header.<name>]`. Templates are de-indented
//! before they are compiled, so they can be indented inside the TOML file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::template::{HeaderTemplate, TemplateError};

/// The dedicated config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".conhead.toml";

/// Python project file that may carry a `[tool.conhead]` section.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "CONHEAD_CONFIG";

/// A single `[header.<name>]` table as written in a config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HeaderDefConfig {
  /// Header template text.
  pub template: String,

  /// File extensions without the leading dot. Defaults to the header name.
  #[serde(default)]
  pub extensions: Option<Vec<String>>,
}

/// Contents of a `.conhead.toml` file, or of `[tool.conhead]`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  #[serde(default)]
  pub header: BTreeMap<String, HeaderDefConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
  #[serde(default)]
  tool: PyProjectTools,
}

#[derive(Debug, Default, Deserialize)]
struct PyProjectTools {
  #[serde(default)]
  conhead: ConfigFile,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML or unexpected options.
  #[error("Failed to parse config file '{}': {source}", path.display())]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A header template does not compile.
  #[error("Invalid template for header '{name}': {source}")]
  Template { name: String, source: TemplateError },

  /// A header definition is invalid.
  #[error("Invalid header '{name}': {message}")]
  InvalidHeader { name: String, message: String },
}

/// A header definition with its template compiled.
#[derive(Debug, Clone)]
pub struct HeaderDef {
  name: String,
  template: HeaderTemplate,
  extensions: Vec<String>,
  extensions_re: Regex,
}

impl HeaderDef {
  /// Builds a header definition, compiling its template.
  ///
  /// The template is used as given; de-indenting is done by the config
  /// loader.
  pub fn new(name: impl Into<String>, template: &str, extensions: Vec<String>) -> Result<Self, ConfigError> {
    let name = name.into();

    for ext in &extensions {
      let message = if ext.is_empty() {
        "extensions cannot be empty"
      } else if ext.starts_with('.') {
        "extension should not include leading dot"
      } else {
        continue;
      };
      return Err(ConfigError::InvalidHeader {
        name,
        message: message.to_string(),
      });
    }

    let template = match HeaderTemplate::compile(template) {
      Ok(template) => template,
      Err(source) => return Err(ConfigError::Template { name, source }),
    };

    let alternatives: Vec<_> = extensions.iter().map(|ext| regex::escape(ext)).collect();
    let extensions_re = Regex::new(&format!(r"\.(?:{})$", alternatives.join("|"))).map_err(|e| {
      ConfigError::InvalidHeader {
        name: name.clone(),
        message: e.to_string(),
      }
    })?;

    Ok(Self {
      name,
      template,
      extensions,
      extensions_re,
    })
  }

  fn from_config(name: &str, config: HeaderDefConfig) -> Result<Self, ConfigError> {
    let extensions = config.extensions.unwrap_or_else(|| vec![name.to_string()]);
    Self::new(name, &deindent_string(&config.template), extensions)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub const fn template(&self) -> &HeaderTemplate {
    &self.template
  }

  pub fn extensions(&self) -> &[String] {
    &self.extensions
  }

  /// Pattern matched against file paths, e.g. `\.(?:py|pyi)$`.
  pub const fn extensions_re(&self) -> &Regex {
    &self.extensions_re
  }
}

/// Full set of header definitions.
#[derive(Debug, Clone, Default)]
pub struct Config {
  /// Header definitions sorted by name.
  headers: Vec<HeaderDef>,
}

impl Config {
  /// Creates a configuration from already built header definitions.
  pub fn new(mut headers: Vec<HeaderDef>) -> Self {
    headers.sort_by(|a, b| a.name.cmp(&b.name));
    Self { headers }
  }

  /// Compiles every header of a parsed config file.
  pub fn from_file_config(file: ConfigFile) -> Result<Self, ConfigError> {
    let headers = file
      .header
      .into_iter()
      .map(|(name, def)| HeaderDef::from_config(&name, def))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self::new(headers))
  }

  /// Load configuration from a file.
  ///
  /// Files named `pyproject.toml` are read from their `[tool.conhead]`
  /// section, anything else is read as a `.conhead.toml` file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let parse_error = |e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    };

    let file = if path.file_name().is_some_and(|name| name == PYPROJECT_FILENAME) {
      toml::from_str::<PyProject>(&content).map_err(parse_error)?.tool.conhead
    } else {
      toml::from_str::<ConfigFile>(&content).map_err(parse_error)?
    };

    let config = Self::from_file_config(file)?;
    debug!("Loaded {} header definitions", config.headers.len());
    Ok(config)
  }

  pub fn headers(&self) -> &[HeaderDef] {
    &self.headers
  }

  pub fn is_empty(&self) -> bool {
    self.headers.is_empty()
  }

  /// Looks up the header definition for a path by its extension.
  ///
  /// When several definitions match, the one whose extension match starts
  /// earliest in the path wins (so `tar.gz` beats `gz`), then the first by
  /// name.
  pub fn header_for_path(&self, path: &Path) -> Option<&HeaderDef> {
    let path = path.to_string_lossy();
    self
      .headers
      .iter()
      .filter_map(|header| header.extensions_re.find(&path).map(|m| (m.start(), header)))
      .min_by_key(|(start, _)| *start)
      .map(|(_, header)| header)
  }
}

/// Removes the common leading whitespace from every line.
///
/// The indent is measured on lines that are not blank. Blank lines lose up to
/// that many characters.
///
/// ```rust
/// use conhead::config::deindent_string;
///
/// assert_eq!(deindent_string("    a\n      b\n"), "a\n  b\n");
/// ```
pub fn deindent_string(s: &str) -> String {
  let indent = s
    .split('\n')
    .filter(|line| !line.trim().is_empty())
    .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
    .min()
    .unwrap_or(0);

  s.split('\n')
    .map(|line| line.chars().skip(indent).collect::<String>())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `CONHEAD_CONFIG` environment variable
/// 3. The nearest `.conhead.toml` or `pyproject.toml` in `start_dir` or one of
///    its ancestors, `.conhead.toml` first within a directory
pub fn discover_config_path(explicit_path: Option<&Path>, start_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  for dir in start_dir.ancestors() {
    for name in [DEFAULT_CONFIG_FILENAME, PYPROJECT_FILENAME] {
      let candidate = dir.join(name);
      if candidate.is_file() {
        debug!("Using config: {}", candidate.display());
        return Some(candidate);
      }
    }
  }

  debug!("No config file found");
  None
}

/// Load configuration from the discovered path, or return an empty config.
///
/// An explicit path that cannot be read is an error.
pub fn load_config(explicit_path: Option<&Path>, start_dir: &Path) -> Result<Config> {
  match discover_config_path(explicit_path, start_dir) {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}
