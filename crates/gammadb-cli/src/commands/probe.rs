use super::emit;
use crate::config::AppConfig;
use crate::error::Result;
use gammadb::engine::comparator::DefaultComparator;
use gammadb::workflows::service;
use tracing::info;

pub async fn run(config: &AppConfig) -> Result<()> {
    info!(
        "Probing for structural aligner '{}'.",
        config.comparison.aligner.executable
    );
    let comparator = DefaultComparator::from_config(&config.comparison);
    emit(&service::handle_probe(&comparator).await)
}
