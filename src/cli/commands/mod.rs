//! CLI command handlers for `cgpa`.
//!
//! Each command is implemented in its own submodule.

pub mod calculate;
pub mod catalog;
pub mod config;
