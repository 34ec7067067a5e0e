// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gitnit - commit message and author linter for CI
///
/// Inspects a range of commits and fails when a title or author does not
/// follow the project's commit conventions.
#[derive(Parser, Debug)]
#[command(name = "gitnit")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Commit message and author linter for CI", long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// The command to run (defaults to check if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub check: CheckArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GITNIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect a range of commits (default command)
    Check(CheckArgs),

    /// Print version information
    Version,

    /// Write an example gitnit.toml
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Commit range to inspect; a single revision means "revision..HEAD"
    #[arg(value_name = "RANGE")]
    pub range: Option<String>,

    /// Branch the commits are compared against (default: main branch)
    #[arg(long, env = "GITNIT_TARGET_BRANCH")]
    pub target_branch: Option<String>,

    /// Remote name or URL holding the target branch (default: origin)
    #[arg(long, env = "GITNIT_TARGET_REPOSITORY")]
    pub target_repository: Option<String>,

    /// Comma-separated list of permitted author email domains
    #[arg(long, env = "GITNIT_EMAIL_DOMAINS", value_delimiter = ',')]
    pub email_domains: Option<Vec<String>>,

    /// Comma-separated list of bot author names exempt from all rules
    #[arg(long, env = "GITNIT_BOTS", value_delimiter = ',')]
    pub bots: Option<Vec<String>>,

    /// Name of the main branch, where WIP commits are refused
    #[arg(long, env = "GITNIT_MAIN_BRANCH")]
    pub main_branch: Option<String>,

    /// Show the values each commit is checked against
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not inspect recent commits when the range is empty
    #[arg(long)]
    pub no_fallback: bool,

    /// Fail when there are no commits to inspect
    #[arg(long)]
    pub fail_on_empty: bool,
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Check if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Check(self.check.clone()))
    }
}
