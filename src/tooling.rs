//! Tooling & Integration Layer
//!
//! Command-line front end: argument parsing, config and prompter wiring, and
//! text or JSON rendering of results.

pub mod cli;

pub use cli::{Action, Cli, CliContext, OutputFormat};
