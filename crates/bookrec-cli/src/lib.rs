//! Command-line front end for the bookrec recommendation engine.

pub mod cli;
pub mod config;
pub mod logging;
