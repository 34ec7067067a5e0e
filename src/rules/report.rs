// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Lint report types and output.

use crate::cli::args::OutputFormat;
use crate::commit::CommitInfo;
use crate::range::Resolution;
use console::style;
use serde::Serialize;

/// A failed rule for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Identifier of the offending commit.
    pub commit: String,
    /// Stable rule code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    pub fn new(commit: &str, code: &str, message: String) -> Self {
        Self {
            commit: commit.to_string(),
            code: code.to_string(),
            message,
        }
    }

    /// Format as a report line: `- <commit>: <message>`.
    pub fn format(&self) -> String {
        format!("- {}: {}", self.commit, self.message)
    }
}

/// The values a commit was judged on.
#[derive(Debug, Clone, Serialize)]
pub struct InspectedCommit {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
    pub email_domain: String,
    pub title: String,
    /// Author is on the bot list, so no rule ran.
    pub skipped: bool,
}

impl InspectedCommit {
    pub fn from_info(info: &CommitInfo, skipped: bool) -> Self {
        Self {
            id: info.id.clone(),
            short_id: info.short_id().to_string(),
            author_name: info.author_name.clone(),
            email_domain: info.email_domain().to_string(),
            title: info.title().to_string(),
            skipped,
        }
    }
}

/// Outcome of a lint run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Range that was inspected, once known.
    pub range: Option<String>,
    /// The range held more commits than were inspected.
    pub truncated: bool,
    /// Commits in inspection order.
    pub inspected: Vec<InspectedCommit>,
    /// Violations in inspection order, then rule order.
    pub violations: Vec<Violation>,
}

/// Options controlling text output.
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// Show the values each commit was judged on.
    pub verbose: bool,
    /// Documentation pointer shown on failure.
    pub docs_url: Option<String>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which range produced this report.
    pub fn with_resolution(mut self, resolution: &Resolution) -> Self {
        self.range = Some(resolution.range.to_string());
        self.truncated = resolution.truncated;
        self
    }

    /// Whether the run passed (no violations).
    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }

    /// Print the report to stdout.
    pub fn print(&self, format: Option<OutputFormat>, options: &PrintOptions) {
        match format {
            Some(OutputFormat::Json) => println!("{}", self.render_json()),
            _ => print!("{}", self.render_text(options)),
        }
    }

    /// Render in text format.
    pub fn render_text(&self, options: &PrintOptions) -> String {
        let mut out = String::new();

        if let Some(ref range) = self.range {
            out.push_str(&format!("Inspecting commit range {}\n", style(range).cyan()));
        }
        if self.truncated {
            out.push_str(&format!(
                "{} only the first {} commits of the range were inspected\n",
                style("warning:").yellow().bold(),
                self.inspected.len()
            ));
        }
        out.push('\n');

        for commit in &self.inspected {
            let short_id = &commit.short_id;
            if commit.skipped {
                out.push_str(&format!(
                    "{} {} {}\n",
                    style(short_id).cyan(),
                    commit.title,
                    style("(bot author, skipped)").dim()
                ));
            } else {
                out.push_str(&format!("{} {}\n", style(short_id).cyan(), commit.title));
            }

            if options.verbose {
                out.push_str(&format!("    author:       {}\n", commit.author_name));
                out.push_str(&format!("    email domain: {}\n", commit.email_domain));
                out.push_str(&format!("    title:        {}\n", commit.title));
            }
        }
        out.push('\n');

        if self.is_success() {
            out.push_str(&format!(
                "{} Commit inspection passed!\n",
                style("✓").green().bold()
            ));
            return out;
        }

        out.push_str(&format!(
            "{} Commit inspection did not pass!\n\n",
            style("✗").red().bold()
        ));
        out.push_str("Fix these problems and try again:\n");
        for violation in &self.violations {
            out.push_str(&violation.format());
            out.push('\n');
        }

        if let Some(ref url) = options.docs_url {
            out.push_str(&format!("\nSee {} for commit message guidelines.\n", url));
        }

        out
    }

    /// Render in JSON format.
    pub fn render_json(&self) -> String {
        let json = serde_json::json!({
            "success": self.is_success(),
            "range": self.range,
            "truncated": self.truncated,
            "commits": self.inspected,
            "violations": self.violations,
        });

        serde_json::to_string_pretty(&json).unwrap_or_default()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("{} commits inspected, no violations", self.inspected.len())
        } else {
            format!(
                "{} commits inspected, {} violations",
                self.inspected.len(),
                self.violations.len()
            )
        }
    }
}
