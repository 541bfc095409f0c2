use super::emit;
use crate::cli::CachedArgs;
use crate::config::AppConfig;
use crate::error::Result;
use gammadb::engine::comparator::DefaultComparator;
use gammadb::workflows::service;

pub async fn run(args: CachedArgs, config: &AppConfig) -> Result<()> {
    let comparator = DefaultComparator::from_config(&config.comparison);
    let response = service::handle_cache_lookup(
        &comparator,
        args.subunit.as_deref(),
        args.species.as_deref(),
    );
    emit(&response)
}
