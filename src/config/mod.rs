// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for gitnit.
//!
//! This module handles loading and parsing the configuration file and
//! layering command-line and environment overrides on top of it.

pub mod default;
mod loader;
mod schema;

pub use loader::{
    find_config_file, find_config_file_from, load_config, load_config_from, merge_overrides,
    parse_config, LintOverrides,
};
pub use schema::*;
