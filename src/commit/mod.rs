// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit metadata handling.

mod message;

pub use message::CommitInfo;
