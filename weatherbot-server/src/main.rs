//! Binary crate for the `weatherbot` skill server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading secrets from the environment
//! - Serving the chatbot webhook endpoints
//! - Logging setup

use clap::Parser;

mod cli;
mod samples;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the real environment.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
