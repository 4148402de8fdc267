use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "style-guard",
    version,
    about = "Checks C/C++ source files against a house style guide using line-level heuristics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check files or directories and report style findings
    Check(CheckArgs),
    /// Rewrite #include batches into the canonical section order
    SortIncludes(SortIncludesArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Confidence threshold 0-5; findings below it are dropped
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub verbose: Option<u8>,

    /// Category filters such as -build,+build/include (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub filter: Vec<String>,

    /// Output format
    #[arg(long, value_parser = ["default", "emacs", "vs7", "json"])]
    pub format: Option<String>,

    /// File extensions to check, with or without the leading dot
    /// (repeatable)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from directory scans (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Path to an explicit config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    pub no_config: bool,
}

#[derive(clap::Args, Debug)]
pub struct SortIncludesArgs {
    /// Files to rewrite
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print a diff of the changes to stderr
    #[arg(long)]
    pub show_diff: bool,

    /// Don't write changes back to the files
    #[arg(long)]
    pub no_edit: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
