// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, GitnitError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Name given to a remote registered from a URL target repository.
pub const TARGET_REMOTE_NAME: &str = "gitnit-target";

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            GitnitError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitnitError::Git(GitError::NotARepository)
            } else {
                GitnitError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Check whether a remote with this name exists.
    pub fn has_remote(&self, name: &str) -> bool {
        self.inner.find_remote(name).is_ok()
    }

    /// Make sure `target` can be used as a remote name.
    ///
    /// Remote names are returned as they are. A URL is matched against the
    /// configured remotes and, if none points at it, registered under
    /// [`TARGET_REMOTE_NAME`]. Returns the remote name to use and whether a
    /// new remote was registered.
    pub fn ensure_remote(&self, target: &str) -> Result<(String, bool)> {
        if !is_remote_url(target) {
            if !self.has_remote(target) {
                tracing::warn!("Remote '{}' is not configured in this repository", target);
            }
            return Ok((target.to_string(), false));
        }

        let remotes = self.inner.remotes().map_err(|e| remote_error(target, e))?;
        for name in remotes.iter().flatten() {
            let remote = self.inner.find_remote(name).map_err(|e| remote_error(name, e))?;
            if remote.url() == Some(target) {
                tracing::debug!("Target repository {} is remote '{}'", target, name);
                return Ok((name.to_string(), false));
            }
        }

        if self.has_remote(TARGET_REMOTE_NAME) {
            self.inner
                .remote_set_url(TARGET_REMOTE_NAME, target)
                .map_err(|e| remote_error(TARGET_REMOTE_NAME, e))?;
        } else {
            self.inner
                .remote(TARGET_REMOTE_NAME, target)
                .map_err(|e| remote_error(TARGET_REMOTE_NAME, e))?;
        }

        tracing::info!("Registered {} as remote '{}'", target, TARGET_REMOTE_NAME);
        Ok((TARGET_REMOTE_NAME.to_string(), true))
    }
}

fn remote_error(remote: &str, err: git2::Error) -> GitnitError {
    GitnitError::Git(GitError::RemoteFailed {
        remote: remote.to_string(),
        message: err.message().to_string(),
    })
}

/// Whether a target repository names an address rather than a remote.
pub fn is_remote_url(target: &str) -> bool {
    target.contains("://")
        || target.ends_with(".git")
        || (target.contains('@') && target.contains(':'))
}
