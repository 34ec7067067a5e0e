// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for gitnit.
//!
//! This module handles command-line argument parsing, reading the CI
//! environment and command dispatch.

pub mod args;
mod dispatch;

pub use args::{Cli, Commands};
pub use dispatch::run;
