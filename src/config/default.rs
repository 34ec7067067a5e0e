// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# gitnit configuration file

[lint]
# Branch where work-in-progress commits are refused.
main_branch = "master"

# Branch and remote the inspected commits are compared against.
# target_branch = "master"
# target_repository = "origin"

# Permitted author email domains. Leave empty for no restriction.
email_domains = []

# Authors exempt from every rule.
bots = ["dependabot[bot]"]

# Recent commits to inspect when the range turns out empty (0 disables).
fallback_window = 1

# Fail instead of succeeding when the range is empty.
fail_on_empty = false

docs_url = "https://chris.beams.io/posts/git-commit/"

[ui]
color = true
"#
}
