// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule looks at one commit and yields at most one violation. Rules
//! never depend on each other's outcome.

use crate::commit::CommitInfo;
use lazy_static::lazy_static;
use regex::Regex;

use super::report::Violation;

/// Longest title allowed for an ordinary commit.
pub const MAX_TITLE_LENGTH: usize = 72;

lazy_static! {
    /// Titles led by an issue key or file list, e.g. `JIRA-123:`,
    /// `one.py, two.py:` or `[123]:`.
    static ref REFERENCE_PREFIX_REGEX: Regex =
        Regex::new(r"^[\p{L}\p{N}.\[\]-]+(?:,\s*[\p{L}\p{N}.\[\]-]+)?:").unwrap();
}

/// Settings the rules are evaluated against, computed once per run.
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    /// Author names exempt from every rule.
    pub bots: Vec<String>,
    /// Permitted email domains; empty means any domain.
    pub email_domains: Vec<String>,
    /// The main branch name.
    pub main_branch: String,
    /// Branch the commits are headed for.
    pub effective_branch: String,
}

impl RuleContext {
    /// Create a context without bot or email domain restrictions.
    pub fn new(main_branch: impl Into<String>, effective_branch: impl Into<String>) -> Self {
        Self {
            bots: Vec::new(),
            email_domains: Vec::new(),
            main_branch: main_branch.into(),
            effective_branch: effective_branch.into(),
        }
    }

    pub fn with_bots(mut self, bots: Vec<String>) -> Self {
        self.bots = bots;
        self
    }

    pub fn with_email_domains(mut self, domains: Vec<String>) -> Self {
        self.email_domains = domains;
        self
    }

    /// Whether `author_name` is on the bot list (exact match).
    pub fn is_bot(&self, author_name: &str) -> bool {
        self.bots.iter().any(|bot| bot == author_name)
    }

    fn on_main_branch(&self) -> bool {
        self.effective_branch == self.main_branch
    }
}

/// Apply all built-in rules to a commit, in a fixed order.
pub fn apply_builtin_rules(commit: &CommitInfo, ctx: &RuleContext) -> Vec<Violation> {
    let checks: [fn(&CommitInfo, &RuleContext) -> Option<Violation>; 7] = [
        check_author_name,
        check_author_email,
        check_title_trailing_period,
        check_title_length,
        check_title_case,
        check_self_merge,
        check_wip_on_main,
    ];

    checks
        .iter()
        .filter_map(|check| check(commit, ctx))
        .collect()
}

/// Whether the title belongs to a merge or revert commit.
pub fn is_special_title(title: &str) -> bool {
    title.starts_with("Merge") || title.starts_with("This reverts commit")
}

/// Whether the title starts with an issue key or file list followed by a colon.
pub fn has_reference_prefix(title: &str) -> bool {
    REFERENCE_PREFIX_REGEX.is_match(title)
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Check that the author name is capitalized.
fn check_author_name(commit: &CommitInfo, _ctx: &RuleContext) -> Option<Violation> {
    if starts_uppercase(&commit.author_name) {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "author-name-case",
        format!(
            "Commit author name '{}' does not start with an uppercase letter",
            commit.author_name
        ),
    ))
}

/// Check the author email domain against the allowlist.
fn check_author_email(commit: &CommitInfo, ctx: &RuleContext) -> Option<Violation> {
    if ctx.email_domains.is_empty() {
        return None;
    }

    let domain = commit.email_domain();
    if ctx.email_domains.iter().any(|d| d == domain) {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "author-email-domain",
        format!(
            "Commit email '{}' is not from an allowed domain ({})",
            commit.author_email,
            ctx.email_domains.join(", ")
        ),
    ))
}

/// Check that the title does not end with a period.
fn check_title_trailing_period(commit: &CommitInfo, _ctx: &RuleContext) -> Option<Violation> {
    let title = commit.title();
    if !title.ends_with('.') {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "title-trailing-period",
        format!("Commit message title '{}' ends in a period character", title),
    ))
}

/// Check the title length, exempting merges and reverts.
fn check_title_length(commit: &CommitInfo, _ctx: &RuleContext) -> Option<Violation> {
    let title = commit.title();
    let len = title.chars().count();
    if len <= MAX_TITLE_LENGTH || is_special_title(title) {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "title-max-length",
        format!(
            "Commit message title '{}' is over {} characters ({})",
            title, MAX_TITLE_LENGTH, len
        ),
    ))
}

/// Check that the title is capitalized, unless it leads with a reference.
fn check_title_case(commit: &CommitInfo, _ctx: &RuleContext) -> Option<Violation> {
    let title = commit.title();
    if has_reference_prefix(title) || starts_uppercase(title) {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "title-case",
        format!(
            "Commit message title '{}' does not start with an uppercase letter",
            title
        ),
    ))
}

/// Check for merges of a local branch into itself.
fn check_self_merge(commit: &CommitInfo, _ctx: &RuleContext) -> Option<Violation> {
    let title = commit.title();
    if !title.starts_with("Merge branch '") {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "title-self-merge",
        format!(
            "Commit message title '{}' merges a local branch, rebase instead",
            title
        ),
    ))
}

/// Check for work-in-progress commits headed for the main branch.
fn check_wip_on_main(commit: &CommitInfo, ctx: &RuleContext) -> Option<Violation> {
    let title = commit.title();
    if !title.starts_with("WIP") || !ctx.on_main_branch() {
        return None;
    }

    Some(Violation::new(
        &commit.id,
        "title-wip",
        format!(
            "Commit message title '{}' is work in progress, not allowed on branch '{}'",
            title, ctx.main_branch
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commit(title: &str) -> CommitInfo {
        CommitInfo::new("c1", "Jane Doe", "jane@example.com", title)
    }

    fn ctx() -> RuleContext {
        RuleContext::new("master", "feature")
    }

    fn codes(commit: &CommitInfo, ctx: &RuleContext) -> Vec<String> {
        apply_builtin_rules(commit, ctx)
            .into_iter()
            .map(|v| v.code)
            .collect()
    }

    #[test]
    fn test_clean_commit() {
        assert!(apply_builtin_rules(&make_commit("Add parser"), &ctx()).is_empty());
    }

    #[test]
    fn test_trailing_period() {
        let issue = check_title_trailing_period(&make_commit("Add parser."), &ctx()).unwrap();
        assert_eq!(issue.code, "title-trailing-period");
        assert_eq!(issue.commit, "c1");

        // Regardless of prefix.
        assert!(check_title_trailing_period(&make_commit("Merge stuff."), &ctx()).is_some());
    }

    #[test]
    fn test_title_length_boundary() {
        let ok = format!("A{}", "b".repeat(71));
        assert_eq!(ok.chars().count(), 72);
        assert!(check_title_length(&make_commit(&ok), &ctx()).is_none());

        let long = format!("A{}", "b".repeat(72));
        let issue = check_title_length(&make_commit(&long), &ctx()).unwrap();
        assert!(issue.message.contains("over 72 characters"));
    }

    #[test]
    fn test_title_length_counts_characters() {
        let title = format!("Ä{}", "ö".repeat(71));
        assert!(check_title_length(&make_commit(&title), &ctx()).is_none());
    }

    #[test]
    fn test_special_titles_skip_length() {
        let merge = format!("Merge{}", "x".repeat(68));
        assert_eq!(merge.len(), 73);
        assert!(check_title_length(&make_commit(&merge), &ctx()).is_none());

        let revert = format!("This reverts commit {}", "a".repeat(53));
        assert_eq!(revert.len(), 73);
        assert!(check_title_length(&make_commit(&revert), &ctx()).is_none());
    }

    #[test]
    fn test_title_case() {
        assert!(check_title_case(&make_commit("lowercase title"), &ctx()).is_some());
        assert!(check_title_case(&make_commit("Uppercase title"), &ctx()).is_none());
        assert!(check_title_case(&make_commit("Élan vital"), &ctx()).is_none());
        assert!(check_title_case(&make_commit(""), &ctx()).is_some());
    }

    #[test]
    fn test_reference_prefix_skips_case() {
        for title in [
            "ABC-12: lowercase title",
            "JIRA-123: fix parser",
            "one.py, two.py: tidy imports",
            "[123]: handle empty input",
            "v1.2: bump",
        ] {
            assert!(has_reference_prefix(title), "{}", title);
            assert!(check_title_case(&make_commit(title), &ctx()).is_none());
        }

        for title in ["lowercase title", "fix the thing: now", "a, b, c: three"] {
            assert!(!has_reference_prefix(title), "{}", title);
        }
    }

    #[test]
    fn test_self_merge() {
        let issue = check_self_merge(&make_commit("Merge branch 'master' into x"), &ctx());
        assert_eq!(issue.unwrap().code, "title-self-merge");
        assert!(check_self_merge(&make_commit("Merge pull request #1"), &ctx()).is_none());
    }

    #[test]
    fn test_wip_only_on_main_branch() {
        let wip = make_commit("WIP parser");
        assert!(check_wip_on_main(&wip, &RuleContext::new("master", "master")).is_some());
        assert!(check_wip_on_main(&wip, &RuleContext::new("master", "feature")).is_none());
        assert!(check_wip_on_main(&wip, &RuleContext::new("main", "main")).is_some());
    }

    #[test]
    fn test_author_name_case() {
        let commit = CommitInfo::new("c1", "jane", "jane@example.com", "Add parser");
        assert_eq!(codes(&commit, &ctx()), vec!["author-name-case"]);

        let nameless = CommitInfo::new("c1", "", "jane@example.com", "Add parser");
        assert_eq!(codes(&nameless, &ctx()), vec!["author-name-case"]);
    }

    #[test]
    fn test_email_domain_allowlist() {
        let ctx = ctx().with_email_domains(vec!["example.com".to_string()]);

        let other = CommitInfo::new("c1", "Jane", "a@other.org", "Add parser");
        let issues = apply_builtin_rules(&other, &ctx);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "author-email-domain");
        assert!(issues[0].message.contains("a@other.org"));

        let allowed = CommitInfo::new("c1", "Jane", "a@example.com", "Add parser");
        assert!(apply_builtin_rules(&allowed, &ctx).is_empty());

        let subdomain = CommitInfo::new("c1", "Jane", "a@mail.example.com", "Add parser");
        assert_eq!(apply_builtin_rules(&subdomain, &ctx).len(), 1);
    }

    #[test]
    fn test_no_email_allowlist_means_no_restriction() {
        let commit = CommitInfo::new("c1", "Jane", "a@anything.invalid", "Add parser");
        assert!(check_author_email(&commit, &ctx()).is_none());
    }

    #[test]
    fn test_rules_do_not_short_circuit() {
        let ctx = RuleContext::new("master", "master")
            .with_email_domains(vec!["example.com".to_string()]);
        let commit = CommitInfo::new(
            "c1",
            "bot",
            "bot@other.org",
            format!("WIP {}.", "x".repeat(80)),
        );

        assert_eq!(
            codes(&commit, &ctx),
            vec![
                "author-name-case",
                "author-email-domain",
                "title-trailing-period",
                "title-max-length",
                "title-wip",
            ]
        );
    }

    #[test]
    fn test_only_first_line_is_title() {
        let commit = make_commit("Add parser\n\nlowercase body ending with period.");
        assert!(apply_builtin_rules(&commit, &ctx()).is_empty());
    }
}
