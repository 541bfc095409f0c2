use super::defaults::DefaultsConfig;
use super::file::{DatasetBackend, FileConfig};
use super::models::{AppConfig, DatasetSource};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use gammadb::engine::config as core_config;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    data_manager: &DataManager,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(path) = config_path {
        FileConfig::from_file(path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, set_values)?;

    let aligner_file = file_config.aligner.take().unwrap_or_default();
    let cache_file = file_config.cache.take().unwrap_or_default();
    let structures_file = file_config.structures.take().unwrap_or_default();
    let simulation_file = file_config.simulation.take().unwrap_or_default();
    let dataset_file = file_config.dataset.take().unwrap_or_default();

    let cache = if cache_file.in_memory.unwrap_or(false) {
        core_config::CacheBackend::Memory
    } else {
        core_config::CacheBackend::File(
            cache_file
                .path
                .unwrap_or_else(|| data_manager.default_cache_path()),
        )
    };

    let mut builder = core_config::ComparisonConfigBuilder::new()
        .cache(cache)
        .structure_root(
            structures_file
                .root
                .unwrap_or_else(|| PathBuf::from(&defaults.structure_root)),
        )
        .simulation_seed(simulation_file.seed);

    if let Some(executable) = aligner_file.executable {
        builder = builder.executable(executable);
    }
    if let Some(fallbacks) = aligner_file.fallback_executables {
        builder = builder.fallback_executables(fallbacks);
    }
    if let Some(arg) = aligner_file.probe_arg {
        builder = builder.probe_args(vec![arg]);
    }
    if let Some(secs) = aligner_file.probe_timeout_secs {
        builder = builder.probe_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = aligner_file.run_timeout_secs {
        builder = builder.run_timeout(Duration::from_secs(secs));
    }
    if let Some(bytes) = aligner_file.max_output_bytes {
        builder = builder.max_output_bytes(bytes);
    }

    let comparison = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let dataset = match dataset_file.backend.unwrap_or(DatasetBackend::Local) {
        DatasetBackend::Local => DatasetSource::Local(
            dataset_file
                .path
                .unwrap_or_else(|| PathBuf::from(&defaults.dataset_path)),
        ),
        DatasetBackend::Remote => DatasetSource::Remote(dataset_file.url.ok_or_else(|| {
            CliError::Config("`dataset.url` is required for the remote backend.".to_string())
        })?),
    };

    Ok(AppConfig {
        comparison,
        dataset,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "aligner.executable" => {
                config.aligner.get_or_insert_with(Default::default).executable =
                    Some(value_str.to_string());
            }
            "aligner.fallback-executables" => {
                config
                    .aligner
                    .get_or_insert_with(Default::default)
                    .fallback_executables = Some(
                    value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "aligner.probe-arg" => {
                config.aligner.get_or_insert_with(Default::default).probe_arg =
                    Some(value_str.to_string());
            }
            "aligner.probe-timeout-secs" => {
                config
                    .aligner
                    .get_or_insert_with(Default::default)
                    .probe_timeout_secs = Some(parse_value(key, value_str, "integer")?);
            }
            "aligner.run-timeout-secs" => {
                config
                    .aligner
                    .get_or_insert_with(Default::default)
                    .run_timeout_secs = Some(parse_value(key, value_str, "integer")?);
            }
            "aligner.max-output-bytes" => {
                config
                    .aligner
                    .get_or_insert_with(Default::default)
                    .max_output_bytes = Some(parse_value(key, value_str, "integer")?);
            }
            "cache.path" => {
                config.cache.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "cache.in-memory" => {
                config.cache.get_or_insert_with(Default::default).in_memory =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "structures.root" => {
                config.structures.get_or_insert_with(Default::default).root =
                    Some(PathBuf::from(value_str));
            }
            "simulation.seed" => {
                config.simulation.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "dataset.backend" => {
                let backend = match value_str {
                    "local" => DatasetBackend::Local,
                    "remote" => DatasetBackend::Remote,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: {}. Expected 'local' or 'remote'.",
                            key, other
                        )));
                    }
                };
                config.dataset.get_or_insert_with(Default::default).backend = Some(backend);
            }
            "dataset.path" => {
                config.dataset.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "dataset.url" => {
                config.dataset.get_or_insert_with(Default::default).url =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
