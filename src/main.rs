mod backend;
mod cli;
mod config;
mod customers;
mod feed;
mod logging;
mod model;
#[cfg(feature = "tui")]
mod orchestrator;
mod outcome;
mod rpc;
#[cfg(test)]
mod testing;
mod text_output;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(&args)?;

    match cli::run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{e:#}");
            Err(e)
        }
    }
}
