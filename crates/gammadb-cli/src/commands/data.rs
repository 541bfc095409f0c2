use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

pub async fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    println!("{}", manager.get_data_path().display());
    println!("Cache file: {}", manager.default_cache_path().display());
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    info!("Setting custom data path to {:?}", &path);
    DataManager::set_custom_path(&path)?;
    println!("Data path set to: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    println!(
        "Data path reset to default: {}",
        manager.get_data_path().display()
    );
    Ok(())
}
