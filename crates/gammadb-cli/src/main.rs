mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use clap::Parser;
use std::path::Path;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    match run_app().await {
        Ok(()) => {}
        Err(CliError::Status { status }) => {
            std::process::exit(if status >= 500 { 2 } else { 1 });
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(config_path: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let data_manager = DataManager::new()?;
    let app_config = config::build_config(config_path, set_values, &data_manager)?;
    debug!("Resolved configuration: {:?}", &app_config);
    Ok(app_config)
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    let command_result = async {
        info!("gammadb CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
        debug!("Full CLI arguments parsed: {:?}", &cli);

        let config_path = cli.config.as_deref();
        let set_values = cli.set_values.as_slice();

        match cli.command {
            Commands::Compare(args) => {
                info!("Dispatching to 'compare' command.");
                commands::compare::run(args, &load_config(config_path, set_values)?).await
            }
            Commands::Cached(args) => {
                info!("Dispatching to 'cached' command.");
                commands::cached::run(args, &load_config(config_path, set_values)?).await
            }
            Commands::Probe => {
                info!("Dispatching to 'probe' command.");
                commands::probe::run(&load_config(config_path, set_values)?).await
            }
            Commands::Similarity(args) => {
                info!("Dispatching to 'similarity' command.");
                commands::similarity::run(args).await
            }
            Commands::Analyze(args) => {
                info!("Dispatching to 'analyze' command.");
                commands::analyze::run(args, &load_config(config_path, set_values)?).await
            }
            Commands::Precompute => {
                info!("Dispatching to 'precompute' command.");
                commands::precompute::run(&load_config(config_path, set_values)?).await
            }
            Commands::Export(args) => {
                info!("Dispatching to 'export' command.");
                commands::export::run(args, &load_config(config_path, set_values)?).await
            }
            Commands::Data(args) => {
                info!("Dispatching to 'data' command.");
                commands::data::run(args).await
            }
        }
    }
    .await;

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(CliError::Status { status }) => error!("Request failed with status {}.", status),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
