// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit range expressions.

use crate::error::{GitnitError, ResolveError, Result};
use serde::Serialize;
use std::fmt;

/// Revision standing for the current checkout.
pub const HEAD: &str = "HEAD";

/// A pair of revision endpoints, `from..to` (or `from...to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRange {
    pub from: String,
    pub to: String,
    /// Written with three dots, as some CI services report ranges.
    pub symmetric: bool,
}

impl CommitRange {
    /// Create a two-dot range.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            symmetric: false,
        }
    }

    /// Parse a range expression.
    ///
    /// A lone revision becomes `rev..HEAD`. An empty side of a range means
    /// `HEAD`, as it does for git.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() || spec == ".." || spec == "..." {
            return Err(GitnitError::Resolve(ResolveError::InvalidRange {
                range: spec.to_string(),
            }));
        }

        let (from, to, symmetric) = if let Some((from, to)) = spec.split_once("...") {
            (from, to, true)
        } else if let Some((from, to)) = spec.split_once("..") {
            (from, to, false)
        } else {
            (spec, HEAD, false)
        };

        let or_head = |side: &str| {
            if side.is_empty() {
                HEAD.to_string()
            } else {
                side.to_string()
            }
        };

        Ok(Self {
            from: or_head(from),
            to: or_head(to),
            symmetric,
        })
    }

    /// Range from `repository/branch` to the current checkout.
    pub fn from_remote_branch(repository: &str, branch: &str) -> Self {
        Self::new(format!("{}/{}", repository, branch), HEAD)
    }

    /// The most recent `count` commits.
    pub fn recent(count: usize) -> Self {
        Self::new(format!("{}~{}", HEAD, count), HEAD)
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.symmetric { "..." } else { ".." };
        write!(f, "{}{}{}", self.from, separator, self.to)
    }
}
