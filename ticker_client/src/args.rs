//! Command-line arguments for the stock ticker.
//!
//! This module defines the CLI interface using `clap`. The defaults
//! reproduce a flag-less invocation: a `my_stock.dat` watch-list in the
//! working directory and automatic color detection.
use clap::Parser;

use crate::palette::ColorMode;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the watch-list file. One instrument per line: the code,
    /// optionally followed by two extra whitespace-separated tokens.
    #[clap(long, default_value = "my_stock.dat")]
    pub path: String,

    /// When to colorize the table.
    #[clap(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}
