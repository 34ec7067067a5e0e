// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git command wrappers for listing and inspecting commits.
//!
//! Every query runs `git` as a blocking child process. The resolver and the
//! rule engine only see the [`GitBackend`] trait, so tests can substitute an
//! in-memory history.

use crate::commit::CommitInfo;
use crate::error::{GitError, GitnitError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Exit status git uses when a revision or range cannot be resolved locally.
pub const HISTORY_UNREACHABLE_STATUS: i32 = 128;

/// Format for `git show`: author name, author email and raw body, NUL separated.
const COMMIT_INFO_FORMAT: &str = "--format=%an%x00%ae%x00%B";

/// Read-only access to the commit history, plus fetching more of it.
pub trait GitBackend {
    /// List commit identifiers in `range`, at most `max_count` of them,
    /// in git's default (reverse chronological) order.
    fn rev_list(&self, range: &str, max_count: usize) -> Result<Vec<String>>;

    /// Fetch author name, author email and full message of a commit.
    fn commit_info(&self, id: &str) -> Result<CommitInfo>;

    /// Fetch `branch` from `repository` to extend local history.
    fn fetch(&self, repository: &str, branch: &str) -> Result<()>;
}

/// [`GitBackend`] backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `path`.
    pub fn in_dir(path: &Path) -> Self {
        Self {
            workdir: Some(path.to_path_buf()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        tracing::debug!("Running git {}", args.join(" "));

        cmd.output().map_err(|e| {
            GitnitError::Git(GitError::ToolUnavailable {
                message: e.to_string(),
            })
        })
    }
}

fn command_failed(args: &[&str], output: &Output) -> GitnitError {
    GitnitError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        status: output.status.code(),
        message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

impl GitBackend for GitCli {
    fn rev_list(&self, range: &str, max_count: usize) -> Result<Vec<String>> {
        let max = format!("--max-count={}", max_count);
        let args = ["rev-list", max.as_str(), "--ancestry-path", range];
        let output = self.run(&args)?;

        if !output.status.success() {
            if output.status.code() == Some(HISTORY_UNREACHABLE_STATUS) {
                return Err(GitnitError::Git(GitError::HistoryUnreachable {
                    command: format!("git {}", args.join(" ")),
                    message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                }));
            }
            return Err(command_failed(&args, &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn commit_info(&self, id: &str) -> Result<CommitInfo> {
        let args = ["show", "-s", COMMIT_INFO_FORMAT, id];
        let output = self.run(&args)?;

        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        CommitInfo::from_show_output(id, &raw).ok_or_else(|| {
            GitnitError::Git(GitError::MalformedOutput {
                command: format!("git {}", args.join(" ")),
            })
        })
    }

    fn fetch(&self, repository: &str, branch: &str) -> Result<()> {
        let args = ["fetch", repository, branch];
        let output = self.run(&args)?;

        if !output.status.success() {
            return Err(command_failed(&args, &output));
        }

        Ok(())
    }
}
