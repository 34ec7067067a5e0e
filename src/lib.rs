// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! gitnit - commit message and author linter for CI
//!
//! Inspects a range of commits and reports every commit whose title or
//! author breaks the project's conventions.
//!
//! # Features
//!
//! - **Range Resolution**: Explicit ranges, CI-provided ranges (Travis CI,
//!   GitHub Actions) and the target branch, with fetch-and-retry when local
//!   history is missing
//! - **Rule Engine**: Title capitalization, length and punctuation, self
//!   merges, WIP commits on the main branch, author name and email domain
//! - **Bot Allowlist**: Commits by listed authors are never judged
//! - **Batch Reporting**: All violations across the range in one report
//!
//! # Example
//!
//! ```no_run
//! use gitnit::git::GitCli;
//! use gitnit::range::{RangeRequest, Resolver};
//! use gitnit::rules::{RuleContext, RuleEngine};
//!
//! let git = GitCli::new();
//!
//! let mut request = RangeRequest::new("master");
//! request.explicit_range = Some("HEAD~3..HEAD".to_string());
//! let resolution = Resolver::new(&git).resolve(&request).unwrap();
//!
//! let context = RuleContext::new("master", request.effective_branch());
//! let report = RuleEngine::new(context)
//!     .evaluate(&resolution.commits, &git)
//!     .unwrap();
//!
//! for violation in &report.violations {
//!     println!("{}", violation.format());
//! }
//! ```

// Module declarations
pub mod ci;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod range;
pub mod rules;

// Re-exports for convenience
pub use config::GitnitConfig;
pub use error::{GitnitError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of gitnit.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
