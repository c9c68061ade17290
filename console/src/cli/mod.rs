// console/src/cli/mod.rs

// Command-line interface for the MediCare console: argument parsing,
// command dispatch and terminal rendering.

pub mod cli;
pub mod commands;
pub mod handlers;
pub mod handlers_admin;
pub mod handlers_clinical;
pub mod handlers_utils;

pub use cli::{start_cli, CliArgs, Commands};
