//! # conhead
//!
//! A tool that keeps copyright and license headers consistent across files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_check};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.get_check_args())
}
