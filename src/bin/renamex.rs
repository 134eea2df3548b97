//! Renamex CLI Binary
//!
//! Command-line interface for batch renaming and rollback.

use clap::Parser;
use renamex::logging::init_logging;
use renamex::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let mut context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(context.logging_config())) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match context.execute(&cli) {
        Ok(output) => {
            println!("{}", output.trim_end());
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
