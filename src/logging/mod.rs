//! # Logging Module
//!
//! This module provides logging utilities for the conhead tool, including:
//! - A `tracing` dispatcher whose level follows the `-v`/`-q` flags
//! - Quiet mode for user-facing output
//! - Standard info logging with color support
//!
//! Per-file events are `tracing` records written to stderr. Summaries and
//! diffs are user-facing output on stdout.
//!
//! ## Example
//!
//! ```rust
//! use conhead::info_log;
//! use conhead::logging::{ColorMode, init_tracing};
//!
//! ColorMode::Auto.apply();
//!
//! let dispatch = init_tracing(1, 0, ColorMode::Never);
//! tracing::dispatcher::with_default(&dispatch, || {
//!   // Goes to stderr as "INFO process src/lib.rs"
//!   tracing::info!("process src/lib.rs");
//! });
//!
//! // Goes to stdout unless quiet
//! info_log!("All headers up to date");
//! ```

mod modes;

pub use modes::{ColorMode, LOG_ENV_VAR, init_tracing, is_quiet, is_verbose, level_for, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stdout unless quiet mode is enabled.
///
/// This macro is used for information that should be displayed to the user.
/// It uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function to print info log messages with formatting.
///
/// This function is used by the [`info_log!`] macro to format and print
/// messages with colors if enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
