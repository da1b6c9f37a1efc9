//! Corkboard CLI - sticky-note task boards in the terminal.
//!
//! Commands:
//! - `corkboard boards`: List boards, marking the open one
//! - `corkboard templates`: List templates
//! - `corkboard board new|select|rename|delete|template|view|describe|resize`
//! - `corkboard task add|move|drag|raise|toggle|edit|due|delete`
//! - `corkboard show [--json]`: Show the open board, one table per category
//!
//! Environment variables:
//! - CORKBOARD_LOG / RUST_LOG: Log filter (default `warn`)
//! - CORKBOARD_*: Configuration overrides, e.g. `CORKBOARD_BASE_Z_INDEX=10`
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("corkboard=debug")
    } else {
        EnvFilter::try_from_env("CORKBOARD_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match commands::run(cli) {
        Ok(()) => 0,
        Err(e) => {
            if !e.is_user_error() {
                tracing::debug!("{e:?}");
            }
            eprintln!("Error: {e}");
            1
        }
    };
    std::process::exit(exit_code);
}
