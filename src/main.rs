//! pacontrol command-line entry point.

use std::{error::Error, process};

use clap::Parser;
use pacontrol::{
    cli::{self, Cli, formatting::format_error},
    config::Config,
    services::MixerService,
    tracing_config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("{}", format_error(&format!("Error: {e}")));
        process::exit(1);
    });
    if let Some(server) = cli.server {
        config.client.server = Some(server);
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", format_error(&format!("Error: {e}")));
        process::exit(1);
    }

    let guard = tracing_config::init(&config.logging)?;

    let result = if cli.command.needs_server() {
        run_connected(&config, cli.command).await
    } else {
        cli::execute(None, cli.command).await
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&format!("Error: {e}")));
            drop(guard);
            process::exit(1);
        }
    }

    drop(guard);
    Ok(())
}

async fn run_connected(config: &Config, command: cli::Commands) -> cli::CommandResult {
    let service = MixerService::new(&config.client).await?;
    let result = cli::execute(Some(&service), command).await;
    service.shutdown().await?;
    result
}
