// Main entry point for results-reporter

use anyhow::Result;
use clap::Parser;
use tracing::info;

use results_reporter::cli::Cli;
use results_reporter::{commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.verbose {
        info!("Starting results-reporter v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(config_file) = &cli.init_config {
        return commands::handle_init_config(config_file);
    }

    if let Some(shell_type) = &cli.completion {
        return commands::handle_completion(shell_type);
    }

    commands::handle_replay(&cli).await
}
