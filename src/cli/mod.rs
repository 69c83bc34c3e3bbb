//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::NewCommand;
use std::ffi::OsString;
use std::path::PathBuf;

/// Scaffold Go projects and generate their GitHub Actions workflows
///
/// Without a subcommand, sets up the project described by gojen.json.
#[derive(Debug, Parser, Clone)]
#[command(name = "gojen")]
#[command(version)]
#[command(about = "Scaffold Go projects and generate their GitHub Actions workflows", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Running in CI: skip the local linter run
    #[arg(long, global = true)]
    pub ci: bool,

    /// Project directory
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Create gojen.json from flags and set the project up
    New(NewCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
