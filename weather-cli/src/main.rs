//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts and configuration
//! - Printing the report, and turning failures into exit code 1

use std::{io::Write, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod prompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    let result = cmd.run().await;
    ExitCode::from(finish(&result, &mut std::io::stdout()))
}

/// Print the diagnostic of a failed run to `out` and pick the exit status.
fn finish(result: &anyhow::Result<()>, out: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            let _ = writeln!(out, "{}", cli::diagnostic(err));
            1
        }
    }
}
