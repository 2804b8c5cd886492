use std::io::IsTerminal;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding extra `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "CONHEAD_LOG";

/// Global atomic value to control user-facing output.
///
/// This is initialized to `Normal` and changed by [`set_quiet`] or
/// [`set_verbose`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this mode to every `owo_colors` call in the process.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }

  /// Whether log lines written to stderr should carry ANSI colors.
  pub fn stderr_colors(self) -> bool {
    match self {
      ColorMode::Auto => std::io::stderr().is_terminal(),
      ColorMode::Never => false,
      ColorMode::Always => true,
    }
  }
}

pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose output is currently enabled.
pub fn is_verbose() -> bool {
  OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)) == OutputMode::Verbose
}

/// Checks if quiet mode is currently enabled.
///
/// User-facing output on stdout is suppressed in quiet mode.
pub fn is_quiet() -> bool {
  OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)) == OutputMode::Quiet
}

/// Maps `-v`/`-q` counts to the most verbose level that is logged.
///
/// Warnings are shown by default. Each `-v` adds a level, each `-q` removes
/// one.
pub const fn level_for(verbose: u8, quiet: u8) -> LevelFilter {
  match verbose as i16 - quiet as i16 {
    i16::MIN..=-2 => LevelFilter::OFF,
    -1 => LevelFilter::ERROR,
    0 => LevelFilter::WARN,
    1 => LevelFilter::INFO,
    2 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  }
}

/// Builds the log dispatcher for a run.
///
/// Log lines go to stderr as `LEVEL message`. Directives in `CONHEAD_LOG`
/// are applied on top of the level chosen by `verbose` and `quiet`.
///
/// Nothing is installed globally. Callers scope the returned dispatcher with
/// [`tracing::dispatcher::with_default`].
pub fn init_tracing(verbose: u8, quiet: u8, colors: ColorMode) -> Dispatch {
  let filter = EnvFilter::builder()
    .with_default_directive(level_for(verbose, quiet).into())
    .with_env_var(LOG_ENV_VAR)
    .from_env_lossy();

  let subscriber = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(colors.stderr_colors())
    .with_target(false)
    .without_time()
    .finish();

  Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_for_counts() {
    assert_eq!(level_for(0, 0), LevelFilter::WARN);
    assert_eq!(level_for(1, 0), LevelFilter::INFO);
    assert_eq!(level_for(2, 0), LevelFilter::DEBUG);
    assert_eq!(level_for(3, 0), LevelFilter::TRACE);
    assert_eq!(level_for(9, 0), LevelFilter::TRACE);
    assert_eq!(level_for(0, 1), LevelFilter::ERROR);
    assert_eq!(level_for(0, 2), LevelFilter::OFF);
    assert_eq!(level_for(0, 200), LevelFilter::OFF);
  }

  #[test]
  fn test_level_for_cancels_out() {
    assert_eq!(level_for(2, 2), LevelFilter::WARN);
    assert_eq!(level_for(1, 2), LevelFilter::ERROR);
  }

  #[test]
  fn test_color_mode_never_disables_stderr_colors() {
    assert!(!ColorMode::Never.stderr_colors());
    assert!(ColorMode::Always.stderr_colors());
  }

  #[test]
  fn test_dispatch_is_scoped() {
    let dispatch = init_tracing(0, 0, ColorMode::Never);
    tracing::dispatcher::with_default(&dispatch, || {
      assert!(tracing::enabled!(tracing::Level::WARN));
      assert!(!tracing::enabled!(tracing::Level::INFO));
    });
  }
}
