//! CLI subcommand implementations for the bookrec binary.

pub mod commands;
pub mod output;
pub mod repl;
pub mod repl_commands;
pub mod repl_complete;
