// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit range module.
//!
//! Turns the command line, CI signals and configured target branch into the
//! list of commits to inspect.

mod commit_range;
mod resolver;

pub use commit_range::{CommitRange, HEAD};
pub use resolver::{RangeRequest, RangeSource, Resolution, Resolver, MAX_COMMITS};
