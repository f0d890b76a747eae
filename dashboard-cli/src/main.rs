//! Binary crate for the weather dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city prompt loop
//! - Human-friendly dashboard rendering

use clap::Parser;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
