// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! In-memory [`GitBackend`] for unit tests.

use crate::commit::CommitInfo;
use crate::error::{GitError, GitnitError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::commands::GitBackend;

/// Scripted answer to a `rev_list` call.
#[derive(Debug, Clone)]
pub enum Listing {
    Commits(Vec<String>),
    Unreachable,
    Failed(i32),
}

/// Fake history. Each range answers from a queue; the last answer repeats.
#[derive(Debug, Default)]
pub struct FakeGit {
    listings: RefCell<HashMap<String, VecDeque<Listing>>>,
    commits: HashMap<String, CommitInfo>,
    fetch_fails: bool,
    pub rev_list_calls: RefCell<Vec<String>>,
    pub fetches: RefCell<Vec<(String, String)>>,
    pub info_calls: RefCell<Vec<String>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `range` with the given commits.
    pub fn with_range(self, range: &str, ids: &[&str]) -> Self {
        self.with_listing(range, Listing::Commits(ids.iter().map(|s| s.to_string()).collect()))
    }

    /// Queue another answer for `range`.
    pub fn with_listing(self, range: &str, listing: Listing) -> Self {
        self.listings
            .borrow_mut()
            .entry(range.to_string())
            .or_default()
            .push_back(listing);
        self
    }

    pub fn with_commit(mut self, info: CommitInfo) -> Self {
        self.commits.insert(info.id.clone(), info);
        self
    }

    pub fn with_failing_fetch(mut self) -> Self {
        self.fetch_fails = true;
        self
    }
}

impl GitBackend for FakeGit {
    fn rev_list(&self, range: &str, max_count: usize) -> Result<Vec<String>> {
        self.rev_list_calls.borrow_mut().push(range.to_string());

        let mut listings = self.listings.borrow_mut();
        let listing = listings
            .get_mut(range)
            .and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
            .unwrap_or(Listing::Unreachable);

        match listing {
            Listing::Commits(mut ids) => {
                ids.truncate(max_count);
                Ok(ids)
            }
            Listing::Unreachable => Err(GitnitError::Git(GitError::HistoryUnreachable {
                command: format!("git rev-list {}", range),
                message: "fatal: bad revision".to_string(),
            })),
            Listing::Failed(status) => Err(GitnitError::Git(GitError::CommandFailed {
                command: format!("git rev-list {}", range),
                status: Some(status),
                message: "failed".to_string(),
            })),
        }
    }

    fn commit_info(&self, id: &str) -> Result<CommitInfo> {
        self.info_calls.borrow_mut().push(id.to_string());
        self.commits.get(id).cloned().ok_or_else(|| {
            GitnitError::Git(GitError::CommandFailed {
                command: format!("git show {}", id),
                status: Some(128),
                message: "unknown revision".to_string(),
            })
        })
    }

    fn fetch(&self, repository: &str, branch: &str) -> Result<()> {
        self.fetches
            .borrow_mut()
            .push((repository.to_string(), branch.to_string()));
        if self.fetch_fails {
            return Err(GitnitError::Git(GitError::CommandFailed {
                command: format!("git fetch {} {}", repository, branch),
                status: Some(128),
                message: "couldn't find remote ref".to_string(),
            }));
        }
        Ok(())
    }
}
