//! TextRelay CLI — chunked webhook text processing.
//!
//! Reads a document, submits it to a configured transform webhook in
//! word-capped chunks, and writes back the reassembled markup.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
