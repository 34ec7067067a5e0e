// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine module for commit validation.
//!
//! A fixed set of rules checks each commit's author and title. Violations
//! are collected in order and reported together at the end.

mod builtin;
mod engine;
mod report;

pub use builtin::{
    apply_builtin_rules, has_reference_prefix, is_special_title, RuleContext, MAX_TITLE_LENGTH,
};
pub use engine::RuleEngine;
pub use report::{InspectedCommit, LintReport, PrintOptions, Violation};
