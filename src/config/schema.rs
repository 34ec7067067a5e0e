// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from gitnit.toml.

use serde::{Deserialize, Serialize};

/// Default name of the main (integration) branch.
pub const DEFAULT_MAIN_BRANCH: &str = "master";

/// Default name of the upstream remote.
pub const DEFAULT_REMOTE: &str = "origin";

/// The main configuration structure for gitnit.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GitnitConfig {
    /// Lint configuration.
    pub lint: LintConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl GitnitConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Lint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Name of the main branch, where work-in-progress commits are refused.
    pub main_branch: String,

    /// Branch the inspected commits are compared against (main branch if unset).
    pub target_branch: Option<String>,

    /// Remote name or URL holding the target branch.
    pub target_repository: Option<String>,

    /// Permitted author email domains (empty means no restriction).
    pub email_domains: Vec<String>,

    /// Author names exempt from every rule.
    pub bots: Vec<String>,

    /// Number of recent commits inspected when the range is empty (0 disables).
    pub fallback_window: usize,

    /// Treat an empty commit range as an error.
    pub fail_on_empty: bool,

    /// Documentation pointer printed when the inspection fails.
    pub docs_url: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            target_branch: None,
            target_repository: None,
            email_domains: Vec::new(),
            bots: Vec::new(),
            fallback_window: 1,
            fail_on_empty: false,
            docs_url: "https://chris.beams.io/posts/git-commit/".to_string(),
        }
    }
}

impl LintConfig {
    /// The target branch, falling back to the main branch.
    pub fn effective_target_branch(&self) -> &str {
        self.target_branch.as_deref().unwrap_or(&self.main_branch)
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { color: true }
    }
}
