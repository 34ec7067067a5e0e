// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CI environment detection.
//!
//! Only the CLI layer reads the process environment. Everything it learns
//! here is handed to the resolver and the rule engine as plain values.

use crate::error::{GitnitError, Result};
use serde::Serialize;
use std::fmt;

/// CI services whose environment variables are understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CiProvider {
    Travis,
    GithubActions,
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CiProvider::Travis => write!(f, "Travis CI"),
            CiProvider::GithubActions => write!(f, "GitHub Actions"),
        }
    }
}

/// Values a CI service provides about the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CiSignals {
    pub provider: CiProvider,
    /// Build trigger, e.g. `push` or `pull_request`.
    pub event_type: String,
    /// Commit range of the push, when the service provides one.
    pub commit_range: Option<String>,
    /// Branch being built; the target branch in pull request builds.
    pub branch: Option<String>,
    /// Source branch of a pull request.
    pub pull_request_branch: Option<String>,
}

impl CiSignals {
    /// Detect CI signals from the process environment.
    pub fn detect() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Detect CI signals using `lookup` to read variables.
    ///
    /// Empty variables count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if get("TRAVIS").is_some() {
            let event_type = get("TRAVIS_EVENT_TYPE").ok_or_else(|| {
                GitnitError::Ci("TRAVIS_EVENT_TYPE is not set, is this a Travis CI job?".to_string())
            })?;

            return Ok(Some(Self {
                provider: CiProvider::Travis,
                event_type,
                commit_range: get("TRAVIS_COMMIT_RANGE"),
                branch: get("TRAVIS_BRANCH"),
                pull_request_branch: get("TRAVIS_PULL_REQUEST_BRANCH"),
            }));
        }

        if get("GITHUB_ACTIONS").as_deref() == Some("true") {
            let event_type = get("GITHUB_EVENT_NAME").ok_or_else(|| {
                GitnitError::Ci(
                    "GITHUB_EVENT_NAME is not set, is this a GitHub Actions job?".to_string(),
                )
            })?;

            let is_pr = is_github_pull_request(&event_type);
            let branch = if is_pr {
                get("GITHUB_BASE_REF")
            } else {
                get("GITHUB_REF_NAME")
            };

            return Ok(Some(Self {
                provider: CiProvider::GithubActions,
                event_type,
                commit_range: None,
                branch,
                pull_request_branch: get("GITHUB_HEAD_REF"),
            }));
        }

        Ok(None)
    }

    /// Whether the build runs on a synthetic pull request merge commit.
    pub fn is_pull_request(&self) -> bool {
        match self.provider {
            CiProvider::Travis => self.event_type == "pull_request",
            CiProvider::GithubActions => is_github_pull_request(&self.event_type),
        }
    }
}

fn is_github_pull_request(event_type: &str) -> bool {
    matches!(event_type, "pull_request" | "pull_request_target")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_no_ci() {
        assert_eq!(CiSignals::from_lookup(env(&[])).unwrap(), None);
    }

    #[test]
    fn test_travis_push() {
        let signals = CiSignals::from_lookup(env(&[
            ("TRAVIS", "true"),
            ("TRAVIS_EVENT_TYPE", "push"),
            ("TRAVIS_COMMIT_RANGE", "abc123...def456"),
            ("TRAVIS_BRANCH", "feature"),
            ("TRAVIS_PULL_REQUEST_BRANCH", ""),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(signals.provider, CiProvider::Travis);
        assert!(!signals.is_pull_request());
        assert_eq!(signals.commit_range.as_deref(), Some("abc123...def456"));
        assert_eq!(signals.branch.as_deref(), Some("feature"));
        assert_eq!(signals.pull_request_branch, None);
    }

    #[test]
    fn test_travis_without_event_type_is_error() {
        let result = CiSignals::from_lookup(env(&[("TRAVIS", "true")]));
        assert!(matches!(result, Err(GitnitError::Ci(_))));
    }

    #[test]
    fn test_github_pull_request_uses_base_ref() {
        let signals = CiSignals::from_lookup(env(&[
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_BASE_REF", "main"),
            ("GITHUB_HEAD_REF", "feature/x"),
            ("GITHUB_REF_NAME", "42/merge"),
        ]))
        .unwrap()
        .unwrap();

        assert!(signals.is_pull_request());
        assert_eq!(signals.branch.as_deref(), Some("main"));
        assert_eq!(signals.pull_request_branch.as_deref(), Some("feature/x"));
        assert_eq!(signals.commit_range, None);
    }

    #[test]
    fn test_github_push_uses_ref_name() {
        let signals = CiSignals::from_lookup(env(&[
            ("GITHUB_ACTIONS", "true"),
            ("GITHUB_EVENT_NAME", "push"),
            ("GITHUB_REF_NAME", "main"),
        ]))
        .unwrap()
        .unwrap();

        assert!(!signals.is_pull_request());
        assert_eq!(signals.branch.as_deref(), Some("main"));
    }
}
