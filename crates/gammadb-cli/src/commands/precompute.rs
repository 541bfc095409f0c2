use crate::config::AppConfig;
use crate::data::load_dataset;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use gammadb::engine::comparator::DefaultComparator;
use gammadb::engine::progress::ProgressReporter;
use gammadb::workflows::precompute::precompute;
use tracing::info;

pub async fn run(config: &AppConfig) -> Result<()> {
    let entries = load_dataset(&config.dataset).await?;
    println!("Loaded {} protein entries.", entries.len());

    let comparator = DefaultComparator::from_config(&config.comparison);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the precompute workflow...");
    let summary = precompute(&comparator, &entries, &reporter).await;

    for subunit in &summary.subunits {
        println!(
            "{:<6} reference {:<16} measured {:>3}  simulated {:>3}",
            subunit.subunit, subunit.reference_id, subunit.measured, subunit.simulated
        );
    }
    println!(
        "Generated {} comparison(s) for {} subunit(s).",
        summary.total(),
        summary.subunits.len()
    );
    Ok(())
}
