//! CLI module - command-line interface
//!
//! Contains the command handlers used by the binary.

pub mod commands;

pub use commands::{parse_file, plan, search, CommandOutput};
