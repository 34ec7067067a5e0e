// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Commit queries go through the `git` executable; remote bootstrapping
//! uses libgit2.

pub mod commands;
#[cfg(test)]
pub(crate) mod fake;
mod repo;

pub use commands::{GitBackend, GitCli, HISTORY_UNREACHABLE_STATUS};
pub use repo::{is_remote_url, Repository, TARGET_REMOTE_NAME};
