use std::process::ExitCode;

use abacus::cli::{Cli, run};
use abacus::config::log_filter;
use clap::Parser;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("abacus: {error}");
            ExitCode::FAILURE
        }
    }
}
