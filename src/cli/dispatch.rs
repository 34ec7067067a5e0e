// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::ci::CiSignals;
use crate::config::{merge_overrides, GitnitConfig, LintConfig, LintOverrides};
use crate::error::{ConfigError, GitnitError, Result, ResultExt};
use crate::git::{GitBackend, GitCli, Repository};
use crate::range::{RangeRequest, Resolver};
use crate::rules::{PrintOptions, RuleContext, RuleEngine};

use super::args::{CheckArgs, Cli, Commands, InitArgs};

/// Run the CLI with the given arguments.
///
/// Returns whether the run passed; a failed inspection is not an error.
pub fn run(cli: Cli) -> Result<bool> {
    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        GitnitConfig::load_from(config_path)?
    } else {
        GitnitConfig::load()?
    };

    if cli.no_color || !config.ui.color {
        console::set_colors_enabled(false);
    }

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Check(args) => run_check(&cli, &config, args),
        Commands::Version => run_version().map(|_| true),
        Commands::Init(args) => run_init(args).map(|_| true),
    }
}

/// Run the check command.
fn run_check(cli: &Cli, config: &GitnitConfig, args: CheckArgs) -> Result<bool> {
    tracing::debug!("Running check command with args: {:?}", args);

    let mut lint = merge_overrides(
        config.lint.clone(),
        LintOverrides {
            main_branch: args.main_branch.clone(),
            target_branch: args.target_branch.clone(),
            target_repository: args.target_repository.clone(),
            email_domains: args.email_domains.clone(),
            bots: args.bots.clone(),
            no_fallback: args.no_fallback,
            fail_on_empty: args.fail_on_empty,
        },
    );

    let repo = Repository::open_current()?;
    let git = GitCli::in_dir(repo.workdir());

    bootstrap_remote(&repo, &git, &mut lint)?;

    let ci = CiSignals::detect()?;
    let request = RangeRequest {
        explicit_range: args.range.clone(),
        ci,
        target_branch: lint.target_branch.clone(),
        target_repository: lint.target_repository.clone(),
        main_branch: lint.main_branch.clone(),
        fallback_window: lint.fallback_window,
        fail_on_empty: lint.fail_on_empty,
    };

    let resolution = Resolver::new(&git).resolve(&request)?;
    tracing::info!(
        "Inspecting {} commits from {} ({})",
        resolution.commits.len(),
        resolution.range,
        resolution.source
    );

    let context = RuleContext::new(lint.main_branch.clone(), request.effective_branch())
        .with_bots(lint.bots.clone())
        .with_email_domains(lint.email_domains.clone());

    let report = RuleEngine::new(context)
        .evaluate(&resolution.commits, &git)?
        .with_resolution(&resolution);

    report.print(
        cli.format,
        &PrintOptions {
            verbose: args.verbose,
            docs_url: Some(lint.docs_url.clone()),
        },
    );
    tracing::debug!("{}", report.summary());

    Ok(report.is_success())
}

/// Register a URL target repository as a remote and fetch its target branch.
fn bootstrap_remote(repo: &Repository, git: &GitCli, lint: &mut LintConfig) -> Result<()> {
    let Some(target) = lint.target_repository.clone() else {
        return Ok(());
    };

    let (remote, added) = repo.ensure_remote(&target)?;
    if added {
        git.fetch(&remote, lint.effective_target_branch())?;
    }
    lint.target_repository = Some(remote);

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("gitnit {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = std::path::Path::new("gitnit.toml");

    if config_path.exists() && !args.force {
        return Err(GitnitError::Config(ConfigError::AlreadyExists {
            path: config_path.to_path_buf(),
        }));
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created gitnit.toml");

    Ok(())
}
