mod cli;
mod config;
pub mod modules;
pub mod utils;

use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli::cli() {
        cli::CliRes::Ok => ExitCode::from(0),
        cli::CliRes::Err => ExitCode::from(1),
    }
}
