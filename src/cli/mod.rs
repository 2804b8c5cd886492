//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing. The `check` subcommand is a spelling of
//! `--check`.

mod check;

pub use check::{CheckArgs, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Consistent header manager
///
/// Maintains consistent headers across files. Adds headers to files that are
/// missing them and keeps the information in existing headers up to date.
#[derive(Parser, Debug)]
#[command(
  name = "conhead",
  author,
  version,
  about,
  long_about = None,
  styles = CUSTOM_STYLES,
  args_conflicts_with_subcommands = true,
  after_help = "Examples:
  # Add missing headers and refresh out of date ones
  conhead src/ tests/

  # Only report files whose headers are missing or out of date
  conhead --check src/

  # Show the changes a run would make
  conhead --check --show-diff src/

  # Remove headers
  conhead --delete src/**/*.py

  # Use a specific configuration file
  conhead --config headers.toml src/

Headers are configured in .conhead.toml ([header.<name>] tables) or in
pyproject.toml ([tool.conhead.header.<name>] tables).
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub check_args: CheckArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Check headers without writing, same as --check
  Check(CheckArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective check arguments, whether from a subcommand or top-level
  pub fn get_check_args(self) -> CheckArgs {
    match self.command {
      Some(Command::Check(args)) => CheckArgs { check: true, ..args },
      None => self.check_args,
    }
  }
}
