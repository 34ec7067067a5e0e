// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{ConfigError, GitnitError, Result};
use std::path::{Path, PathBuf};

use super::schema::{GitnitConfig, LintConfig};

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["gitnit.toml", ".gitnit.toml", ".config/gitnit.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let gitnit_config = config_dir.join("gitnit").join("config.toml");
        if gitnit_config.exists() {
            return Some(gitnit_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<GitnitConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            Ok(GitnitConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<GitnitConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(GitnitError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        GitnitError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<GitnitConfig> {
    let config: GitnitConfig = toml::from_str(content).map_err(|e| {
        GitnitError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GitnitConfig) -> Result<()> {
    if config.lint.main_branch.trim().is_empty() {
        return Err(GitnitError::Config(ConfigError::InvalidValue {
            key: "lint.main_branch".to_string(),
            message: "must not be empty".to_string(),
        }));
    }

    if let Some(domain) = config.lint.email_domains.iter().find(|d| d.contains('@')) {
        return Err(GitnitError::Config(ConfigError::InvalidValue {
            key: "lint.email_domains".to_string(),
            message: format!("'{}' should be a bare domain without '@'", domain),
        }));
    }

    Ok(())
}

/// Command-line and environment overrides applied on top of the file config.
#[derive(Debug, Clone, Default)]
pub struct LintOverrides {
    pub main_branch: Option<String>,
    pub target_branch: Option<String>,
    pub target_repository: Option<String>,
    pub email_domains: Option<Vec<String>>,
    pub bots: Option<Vec<String>>,
    pub no_fallback: bool,
    pub fail_on_empty: bool,
}

/// Merge overrides into a lint configuration, with the overrides taking precedence.
pub fn merge_overrides(base: LintConfig, overrides: LintOverrides) -> LintConfig {
    LintConfig {
        main_branch: overrides.main_branch.unwrap_or(base.main_branch),
        target_branch: overrides.target_branch.or(base.target_branch),
        target_repository: overrides.target_repository.or(base.target_repository),
        email_domains: clean_list(overrides.email_domains.unwrap_or(base.email_domains)),
        bots: clean_list(overrides.bots.unwrap_or(base.bots)),
        fallback_window: if overrides.no_fallback {
            0
        } else {
            base.fallback_window
        },
        fail_on_empty: overrides.fail_on_empty || base.fail_on_empty,
        docs_url: base.docs_url,
    }
}

/// Trim entries and drop empty ones, so `--bots ""` means "no bots".
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
