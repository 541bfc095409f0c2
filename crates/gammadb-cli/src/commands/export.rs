use crate::cli::ExportArgs;
use crate::config::AppConfig;
use crate::error::Result;
use gammadb::engine::cache::CacheStore;
use gammadb::workflows::export::export_csv;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub async fn run(args: ExportArgs, config: &AppConfig) -> Result<()> {
    let cache = CacheStore::open(&config.comparison.cache);
    let rows = match &args.output {
        Some(path) => {
            let rows = export_csv(&cache, BufWriter::new(File::create(path)?))?;
            println!("Wrote {} row(s) to {}", rows, path.display());
            rows
        }
        None => export_csv(&cache, std::io::stdout().lock())?,
    };
    info!("Exported {} cached comparison(s).", rows);
    Ok(())
}
