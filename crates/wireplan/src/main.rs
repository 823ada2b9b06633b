//! Wireplan - Entry Point
//!
//! Exit status is 0 when the wiring plan may be handed to code generation
//! and 1 when the report carries errors.

use clap::Parser;
use std::process::ExitCode;
use wireplan::cli::Cli;
use wireplan::infrastructure::logging::init_logging;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let report = cli.execute(&config)?;
    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
