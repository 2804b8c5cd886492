//! # conhead
//!
//! A tool that keeps copyright and license header blocks consistent across a
//! source tree.
//!
//! Headers are described by templates: the literal header text with typed
//! placeholder fields such as `{{YEARS}}`. `conhead` finds the header at the
//! start of each file, checks whether its fields are current, and adds,
//! refreshes or removes it.
//!
//! ## Features
//!
//! * Per-extension header templates configured in `.conhead.toml` or
//!   `pyproject.toml`
//! * Year ranges that keep their start year and move their end year forward
//! * Date fields for the last update and for file creation
//! * Check-only mode that reports missing and stale headers without writing
//! * Delete mode that strips headers and leaves the rest of the file intact
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use conhead::config::{Config, HeaderDef};
//! use conhead::processor::{Mode, Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let header = HeaderDef::new("rust", "// Copyright {{YEARS}} Acme\n", vec!["rs".to_string()])?;
//!     let config = Config::new(vec![header]);
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         mode: Mode::Check,
//!         ..ProcessorConfig::new(config, chrono::Local::now().naive_local())
//!     });
//!
//!     let outcome = processor.process(&["src".to_string()])?;
//!     if outcome.has_errors {
//!         println!("Some headers are missing or out of date");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`template`] - The template mini-language: tokenizer, header parser and renderer
//! * [`fields`] - Field kinds and their values
//! * [`config`] - Header definitions and configuration loading
//! * [`processor`] - Checking and rewriting files
//! * [`logging`] - Logging setup and user-facing output helpers

pub mod config;
pub mod diff;
pub mod fields;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod template;
