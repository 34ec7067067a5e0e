// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit metadata as fetched from git.

use serde::Serialize;

/// Author and message of a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// Full commit identifier.
    pub id: String,
    /// Author name.
    pub author_name: String,
    /// Author email.
    pub author_email: String,
    /// Full raw message; the first line is the title.
    pub message: String,
}

impl CommitInfo {
    /// Create commit metadata from its parts.
    pub fn new(
        id: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            message: message.into(),
        }
    }

    /// Parse the output of `git show -s --format=%an%x00%ae%x00%B`.
    ///
    /// Returns `None` when the output does not carry all three fields.
    pub fn from_show_output(id: &str, output: &str) -> Option<Self> {
        let mut parts = output.splitn(3, '\0');
        let author_name = parts.next()?;
        let author_email = parts.next()?;
        let message = parts.next()?;

        Some(Self::new(
            id,
            author_name.trim(),
            author_email.trim(),
            message.trim_end_matches(['\n', '\r']),
        ))
    }

    /// The first line of the message.
    pub fn title(&self) -> &str {
        self.lines().next().unwrap_or("")
    }

    /// The message split into lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }

    /// The part of the author email after the first `@` (empty if none).
    pub fn email_domain(&self) -> &str {
        self.author_email
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("")
    }

    /// Abbreviated identifier for display.
    pub fn short_id(&self) -> &str {
        &self.id[..7.min(self.id.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_show_output() {
        let raw = "Jane Doe\0jane@example.com\0Fix parser\n\nLonger body\n\n";
        let info = CommitInfo::from_show_output("abc1234def", raw).unwrap();

        assert_eq!(info.id, "abc1234def");
        assert_eq!(info.author_name, "Jane Doe");
        assert_eq!(info.author_email, "jane@example.com");
        assert_eq!(info.title(), "Fix parser");
        assert_eq!(info.message, "Fix parser\n\nLonger body");
        assert_eq!(info.short_id(), "abc1234");
    }

    #[test]
    fn test_from_show_output_missing_fields() {
        assert!(CommitInfo::from_show_output("abc", "Jane Doe\0jane@example.com").is_none());
    }

    #[test]
    fn test_email_domain_uses_first_at() {
        let info = CommitInfo::new("c1", "A", "a@b@example.com", "T");
        assert_eq!(info.email_domain(), "b@example.com");

        let no_at = CommitInfo::new("c1", "A", "localhost", "T");
        assert_eq!(no_at.email_domain(), "");
    }

    #[test]
    fn test_empty_message_title() {
        let info = CommitInfo::new("c1", "A", "a@example.com", "");
        assert_eq!(info.title(), "");
    }
}
