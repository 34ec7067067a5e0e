// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use crate::commit::CommitInfo;
use crate::error::Result;
use crate::git::GitBackend;

use super::builtin::{apply_builtin_rules, RuleContext};
use super::report::{InspectedCommit, LintReport};

/// Rule engine for validating commits.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    context: RuleContext,
}

impl RuleEngine {
    /// Create a new rule engine with the given context.
    pub fn new(context: RuleContext) -> Self {
        Self { context }
    }

    /// Check one commit, appending what was inspected and any violations
    /// to `report`.
    pub fn check_commit(&self, commit: &CommitInfo, report: &mut LintReport) {
        let skipped = self.context.is_bot(&commit.author_name);
        report
            .inspected
            .push(InspectedCommit::from_info(commit, skipped));

        if skipped {
            tracing::debug!(
                "Skipping {}: author '{}' is a bot",
                commit.id,
                commit.author_name
            );
            return;
        }

        let violations = apply_builtin_rules(commit, &self.context);
        tracing::debug!("{}: {} violations", commit.id, violations.len());
        report.violations.extend(violations);
    }

    /// Fetch and check each commit in order.
    pub fn evaluate<G: GitBackend>(&self, commits: &[String], git: &G) -> Result<LintReport> {
        let mut report = LintReport::new();

        for id in commits {
            let info = git.commit_info(id)?;
            self.check_commit(&info, &mut report);
        }

        Ok(report)
    }
}
