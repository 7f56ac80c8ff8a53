//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `datasets` - List datasets of a project
//! - `tables` - List tables of a dataset
//! - `extract` - Export a table to Cloud Storage

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
