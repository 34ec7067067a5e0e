// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit range resolution.
//!
//! Picks the range to inspect from an explicit argument, CI signals or the
//! configured target branch, then lists its commits. A range whose history
//! is missing locally gets one fetch of the target branch and one retry.

use crate::ci::{CiProvider, CiSignals};
use crate::config::DEFAULT_REMOTE;
use crate::error::{GitError, GitnitError, ResolveError, Result};
use crate::git::GitBackend;
use serde::Serialize;
use std::fmt;

use super::commit_range::{CommitRange, HEAD};

/// Most commits a single run inspects.
pub const MAX_COMMITS: usize = 100;

/// Inputs for range resolution.
#[derive(Debug, Clone)]
pub struct RangeRequest {
    /// Range or single revision given on the command line.
    pub explicit_range: Option<String>,
    /// Signals from the CI service, if running in one.
    pub ci: Option<CiSignals>,
    /// Target branch override.
    pub target_branch: Option<String>,
    /// Target remote override (already registered as a remote).
    pub target_repository: Option<String>,
    /// Main branch name, the default target branch.
    pub main_branch: String,
    /// Recent commits to inspect when the range is empty (0 disables).
    pub fallback_window: usize,
    /// Fail when nothing is left to inspect.
    pub fail_on_empty: bool,
}

impl RangeRequest {
    /// A request with no overrides and no CI signals.
    pub fn new(main_branch: impl Into<String>) -> Self {
        Self {
            explicit_range: None,
            ci: None,
            target_branch: None,
            target_repository: None,
            main_branch: main_branch.into(),
            fallback_window: 1,
            fail_on_empty: false,
        }
    }

    /// Target branch, defaulting to the main branch.
    pub fn target_branch(&self) -> &str {
        self.target_branch.as_deref().unwrap_or(&self.main_branch)
    }

    /// Target remote, defaulting to `origin`.
    pub fn target_repository(&self) -> &str {
        self.target_repository.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// Branch the inspected commits land on: the CI branch in CI, the
    /// target branch otherwise.
    pub fn effective_branch(&self) -> &str {
        self.ci
            .as_ref()
            .and_then(|ci| ci.branch.as_deref())
            .unwrap_or_else(|| self.target_branch())
    }

    fn has_target_override(&self) -> bool {
        self.target_branch.is_some() || self.target_repository.is_some()
    }

    fn default_range(&self) -> CommitRange {
        CommitRange::from_remote_branch(self.target_repository(), self.target_branch())
    }
}

/// Where the resolved range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeSource {
    /// Given on the command line.
    Explicit,
    /// Pull request build: target branch up to the commit before the merge.
    CiPullRequest,
    /// Commit range reported by the CI service.
    CiCommitRange,
    /// CI build whose reported range was unusable.
    CiFallback,
    /// Target branch of the target repository up to HEAD.
    Default,
    /// Most recent commits, used because the range was empty.
    EmptyFallback,
}

impl fmt::Display for RangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RangeSource::Explicit => "command line",
            RangeSource::CiPullRequest => "CI pull request",
            RangeSource::CiCommitRange => "CI commit range",
            RangeSource::CiFallback => "CI fallback to target branch",
            RangeSource::Default => "target branch",
            RangeSource::EmptyFallback => "recent commits (range was empty)",
        };
        f.write_str(text)
    }
}

/// A resolved range and the commits it contains.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub range: CommitRange,
    pub source: RangeSource,
    /// Commit identifiers in git's listing order.
    pub commits: Vec<String>,
    /// The range held more than [`MAX_COMMITS`] commits.
    pub truncated: bool,
}

/// Resolves commit ranges against a git backend.
pub struct Resolver<'a, G: GitBackend> {
    git: &'a G,
}

/// A candidate range and, if it was already listed, its commits.
struct Candidate {
    range: CommitRange,
    source: RangeSource,
    listed: Option<Vec<String>>,
    fetch_branch: String,
}

impl<'a, G: GitBackend> Resolver<'a, G> {
    pub fn new(git: &'a G) -> Self {
        Self { git }
    }

    /// Resolve the request to a concrete range and its commits.
    pub fn resolve(&self, request: &RangeRequest) -> Result<Resolution> {
        let candidate = self.select(request)?;
        tracing::debug!(
            "Selected range {} ({})",
            candidate.range,
            candidate.source
        );

        let mut commits = match candidate.listed {
            Some(commits) => commits,
            None => self.list_with_retry(
                &candidate.range,
                request.target_repository(),
                &candidate.fetch_branch,
            )?,
        };

        let truncated = commits.len() > MAX_COMMITS;
        if truncated {
            commits.truncate(MAX_COMMITS);
            tracing::warn!(
                "Range {} has more than {} commits, only the first {} are inspected",
                candidate.range,
                MAX_COMMITS,
                MAX_COMMITS
            );
        }

        if commits.is_empty() {
            return self.resolve_empty(candidate.range, candidate.source, request);
        }

        Ok(Resolution {
            range: candidate.range,
            source: candidate.source,
            commits,
            truncated,
        })
    }

    fn select(&self, request: &RangeRequest) -> Result<Candidate> {
        let target_branch = request.target_branch().to_string();

        if let Some(ref explicit) = request.explicit_range {
            return Ok(Candidate {
                range: CommitRange::parse(explicit)?,
                source: RangeSource::Explicit,
                listed: None,
                fetch_branch: target_branch,
            });
        }

        match request.ci {
            Some(ref ci) if !request.has_target_override() => self.select_ci(ci, request),
            _ => Ok(Candidate {
                range: request.default_range(),
                source: RangeSource::Default,
                listed: None,
                fetch_branch: target_branch,
            }),
        }
    }

    fn select_ci(&self, ci: &CiSignals, request: &RangeRequest) -> Result<Candidate> {
        tracing::info!("{} detected, reading commit range from the environment", ci.provider);

        if ci.is_pull_request() {
            let branch = ci.branch.clone().ok_or_else(|| {
                GitnitError::Ci(format!(
                    "{} pull request build does not name its target branch",
                    ci.provider
                ))
            })?;

            // HEAD is the synthetic merge commit of the pull request. Travis
            // keeps a local branch for the target; GitHub checks out the
            // merge commit detached, with the pull request head as its
            // second parent and no local branches.
            let range = match ci.provider {
                CiProvider::Travis => CommitRange::new(branch.clone(), format!("{}~1", HEAD)),
                CiProvider::GithubActions => CommitRange::new(
                    format!("{}/{}", request.target_repository(), branch),
                    format!("{}^2", HEAD),
                ),
            };
            return Ok(Candidate {
                range,
                source: RangeSource::CiPullRequest,
                listed: None,
                fetch_branch: branch,
            });
        }

        let fallback = Candidate {
            range: request.default_range(),
            source: RangeSource::CiFallback,
            listed: None,
            fetch_branch: request.target_branch().to_string(),
        };

        let Some(ref reported) = ci.commit_range else {
            tracing::debug!("{} reported no commit range", ci.provider);
            return Ok(fallback);
        };

        let range = CommitRange::parse(reported)?;
        match self.git.rev_list(&range.to_string(), MAX_COMMITS + 1) {
            Ok(commits) => Ok(Candidate {
                range,
                source: RangeSource::CiCommitRange,
                listed: Some(commits),
                fetch_branch: request.target_branch().to_string(),
            }),
            // Force pushes leave CI services reporting commits that no longer exist.
            Err(GitnitError::Git(GitError::HistoryUnreachable { message, .. })) => {
                tracing::warn!(
                    "CI commit range {} is unreachable ({}), using {} instead",
                    range,
                    message,
                    fallback.range
                );
                Ok(fallback)
            }
            Err(e) => Err(e),
        }
    }

    fn list_with_retry(
        &self,
        range: &CommitRange,
        repository: &str,
        branch: &str,
    ) -> Result<Vec<String>> {
        let spec = range.to_string();

        match self.git.rev_list(&spec, MAX_COMMITS + 1) {
            Err(GitnitError::Git(GitError::HistoryUnreachable { message, .. })) => {
                tracing::warn!(
                    "Range {} is not available locally ({}), fetching {} from {}",
                    spec,
                    message,
                    branch,
                    repository
                );

                if let Err(e) = self.git.fetch(repository, branch) {
                    return Err(GitnitError::Resolve(ResolveError::HistoryStillUnreachable {
                        range: spec,
                        message: e.to_string(),
                    }));
                }

                self.git
                    .rev_list(&spec, MAX_COMMITS + 1)
                    .map_err(|e| match e {
                        GitnitError::Git(GitError::HistoryUnreachable { message, .. }) => {
                            GitnitError::Resolve(ResolveError::HistoryStillUnreachable {
                                range: spec.clone(),
                                message,
                            })
                        }
                        other => other,
                    })
            }
            other => other,
        }
    }

    fn resolve_empty(
        &self,
        range: CommitRange,
        source: RangeSource,
        request: &RangeRequest,
    ) -> Result<Resolution> {
        if request.fallback_window > 0 {
            let window = CommitRange::recent(request.fallback_window);
            let max = request.fallback_window.min(MAX_COMMITS);

            match self.git.rev_list(&window.to_string(), max) {
                Ok(commits) if !commits.is_empty() => {
                    tracing::warn!("Range {} is empty, inspecting {} instead", range, window);
                    return Ok(Resolution {
                        range: window,
                        source: RangeSource::EmptyFallback,
                        commits,
                        truncated: false,
                    });
                }
                Ok(_) => {}
                // Shallow or very young history has no HEAD~N.
                Err(GitnitError::Git(GitError::HistoryUnreachable { message, .. })) => {
                    tracing::debug!("Fallback window {} unavailable: {}", window, message);
                }
                Err(e) => return Err(e),
            }
        }

        if request.fail_on_empty {
            return Err(GitnitError::Resolve(ResolveError::EmptyRange {
                range: range.to_string(),
            }));
        }

        tracing::warn!("Range {} contains no commits to inspect", range);
        Ok(Resolution {
            range,
            source,
            commits: Vec::new(),
            truncated: false,
        })
    }
}
