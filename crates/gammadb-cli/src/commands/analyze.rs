use super::print_json;
use crate::cli::AnalyzeArgs;
use crate::config::AppConfig;
use crate::data::{find_entry, load_dataset};
use crate::error::Result;
use gammadb::engine::comparator::{CompareOptions, DefaultComparator};
use gammadb::workflows::analyze::analyze_pair;
use tracing::{info, warn};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let entries = load_dataset(&config.dataset).await?;
    let reference = find_entry(&entries, &args.reference)?;
    let target = find_entry(&entries, &args.target)?;
    if reference.subunit_label() != target.subunit_label() {
        warn!(
            "Comparing different subunits: {} vs {}.",
            reference.subunit_label(),
            target.subunit_label()
        );
    }

    info!("Analyzing {} against {}.", target.id, reference.id);
    let comparator = DefaultComparator::from_config(&config.comparison);
    let options = CompareOptions {
        use_cache: !args.no_cache,
        simulate: args.simulate,
    };
    let record = analyze_pair(&comparator, reference, target, options).await?;
    print_json(&record)
}
