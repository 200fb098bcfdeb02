use clap::Parser;
use signalbot::cli::{self, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    cli::run(Cli::parse()).await
}
