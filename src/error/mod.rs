// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for gitnit.
//!
//! Rule violations are not errors: they are collected into the lint report.
//! The types here cover the failures that abort a run, and each one knows
//! which process exit status it maps to.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status used when the `git` executable cannot be run.
pub const EXIT_TOOL_UNAVAILABLE: i32 = 2;

/// The main error type for gitnit operations.
#[derive(Error, Debug)]
pub enum GitnitError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Range resolution errors
    #[error("Range error: {0}")]
    Resolve(#[from] ResolveError),

    // CI environment errors
    #[error("CI environment error: {0}")]
    Ci(String),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl GitnitError {
    /// The process exit status this error should terminate with.
    ///
    /// A missing `git` binary exits with 2, a failed `git` command passes
    /// its own status through, and everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            GitnitError::Git(GitError::ToolUnavailable { .. }) => EXIT_TOOL_UNAVAILABLE,
            GitnitError::Git(GitError::CommandFailed {
                status: Some(status),
                ..
            }) if *status != 0 => *status,
            GitnitError::Git(GitError::HistoryUnreachable { .. }) => 128,
            GitnitError::Resolve(ResolveError::HistoryStillUnreachable { .. }) => 128,
            _ => 1,
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable is not available: {message}")]
    ToolUnavailable { message: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        message: String,
    },

    /// Local history lacks the commits a range needs (git exits with 128).
    #[error("Git history unreachable: {command} - {message}")]
    HistoryUnreachable { command: String, message: String },

    #[error("Unexpected output from git command: {command}")]
    MalformedOutput { command: String },

    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Failed to configure remote '{remote}': {message}")]
    RemoteFailed { remote: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Commit range resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Commit range '{range}' contains no commits")]
    EmptyRange { range: String },

    #[error("Commit range '{range}' is unreachable even after fetching: {message}")]
    HistoryStillUnreachable { range: String, message: String },

    #[error("Invalid commit range: '{range}'")]
    InvalidRange { range: String },
}

/// Result type alias for gitnit operations.
pub type Result<T> = std::result::Result<T, GitnitError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| GitnitError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
