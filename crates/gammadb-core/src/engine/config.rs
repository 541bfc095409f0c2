use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_EXECUTABLE: &str = "USalign";
pub const DEFAULT_FALLBACK_EXECUTABLES: [&str; 2] = ["us-align", "./USalign"];
pub const DEFAULT_PROBE_ARG: &str = "-h";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// How the external structural aligner is located and invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignerConfig {
    pub executable: String,
    /// Tried in order after `executable` when probing for availability.
    pub fallback_executables: Vec<String>,
    pub probe_args: Vec<String>,
    pub probe_timeout: Duration,
    pub run_timeout: Duration,
    /// Upper bound for each of stdout and stderr.
    pub max_output_bytes: usize,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            fallback_executables: DEFAULT_FALLBACK_EXECUTABLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            probe_args: vec![DEFAULT_PROBE_ARG.to_string()],
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl AlignerConfig {
    /// The primary executable followed by the fallbacks, without duplicates.
    pub fn candidates(&self) -> Vec<&str> {
        let mut candidates: Vec<&str> = Vec::with_capacity(1 + self.fallback_executables.len());
        for name in std::iter::once(&self.executable).chain(&self.fallback_executables) {
            if !candidates.contains(&name.as_str()) {
                candidates.push(name.as_str());
            }
        }
        candidates
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    /// A JSON document rewritten wholesale on every update.
    File(PathBuf),
    /// Process-local; nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub aligner: AlignerConfig,
    pub cache: CacheBackend,
    /// Relative structure references are resolved against this directory.
    pub structure_root: PathBuf,
    pub simulation_seed: Option<u64>,
}

#[derive(Default)]
pub struct ComparisonConfigBuilder {
    executable: Option<String>,
    fallback_executables: Option<Vec<String>>,
    probe_args: Option<Vec<String>>,
    probe_timeout: Option<Duration>,
    run_timeout: Option<Duration>,
    max_output_bytes: Option<usize>,
    cache: Option<CacheBackend>,
    structure_root: Option<PathBuf>,
    simulation_seed: Option<u64>,
}

impl ComparisonConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }
    pub fn fallback_executables(mut self, executables: Vec<String>) -> Self {
        self.fallback_executables = Some(executables);
        self
    }
    pub fn probe_args(mut self, args: Vec<String>) -> Self {
        self.probe_args = Some(args);
        self
    }
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }
    pub fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }
    pub fn max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }
    pub fn cache(mut self, backend: CacheBackend) -> Self {
        self.cache = Some(backend);
        self
    }
    pub fn structure_root(mut self, root: PathBuf) -> Self {
        self.structure_root = Some(root);
        self
    }
    pub fn simulation_seed(mut self, seed: Option<u64>) -> Self {
        self.simulation_seed = seed;
        self
    }

    pub fn build(self) -> Result<ComparisonConfig, ConfigError> {
        let defaults = AlignerConfig::default();

        let executable = self.executable.unwrap_or(defaults.executable);
        if executable.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "executable",
                reason: "must not be empty".to_string(),
            });
        }

        let probe_timeout = self.probe_timeout.unwrap_or(defaults.probe_timeout);
        let run_timeout = self.run_timeout.unwrap_or(defaults.run_timeout);
        for (parameter, timeout) in [("probe_timeout", probe_timeout), ("run_timeout", run_timeout)] {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidValue {
                    parameter,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        let max_output_bytes = self.max_output_bytes.unwrap_or(defaults.max_output_bytes);
        if max_output_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max_output_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }

        let aligner = AlignerConfig {
            executable,
            fallback_executables: self
                .fallback_executables
                .unwrap_or(defaults.fallback_executables),
            probe_args: self.probe_args.unwrap_or(defaults.probe_args),
            probe_timeout,
            run_timeout,
            max_output_bytes,
        };

        Ok(ComparisonConfig {
            aligner,
            cache: self.cache.ok_or(ConfigError::MissingParameter("cache"))?,
            structure_root: self
                .structure_root
                .ok_or(ConfigError::MissingParameter("structure_root"))?,
            simulation_seed: self.simulation_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> ComparisonConfigBuilder {
        ComparisonConfigBuilder::new()
            .cache(CacheBackend::Memory)
            .structure_root(PathBuf::from("public"))
    }

    #[test]
    fn defaults_fill_unset_aligner_parameters() {
        let config = minimal().build().unwrap();
        assert_eq!(config.aligner, AlignerConfig::default());
        assert_eq!(config.aligner.run_timeout, Duration::from_secs(30));
        assert_eq!(config.aligner.max_output_bytes, 1024 * 1024);
        assert_eq!(config.simulation_seed, None);
    }

    #[test]
    fn missing_cache_or_root_is_reported() {
        let no_cache = ComparisonConfigBuilder::new()
            .structure_root(PathBuf::from("public"))
            .build();
        assert_eq!(no_cache, Err(ConfigError::MissingParameter("cache")));

        let no_root = ComparisonConfigBuilder::new()
            .cache(CacheBackend::Memory)
            .build();
        assert_eq!(no_root, Err(ConfigError::MissingParameter("structure_root")));
    }

    #[test]
    fn zero_timeouts_and_limits_are_rejected() {
        let err = minimal().run_timeout(Duration::ZERO).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                parameter: "run_timeout",
                ..
            }
        ));
        let err = minimal().max_output_bytes(0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                parameter: "max_output_bytes",
                ..
            }
        ));
    }

    #[test]
    fn blank_executable_is_rejected() {
        assert!(minimal().executable("  ").build().is_err());
    }

    #[test]
    fn candidates_put_primary_first_and_skip_duplicates() {
        let config = AlignerConfig {
            executable: "us-align".to_string(),
            ..AlignerConfig::default()
        };
        assert_eq!(config.candidates(), vec!["us-align", "./USalign"]);
        assert_eq!(
            AlignerConfig::default().candidates(),
            vec!["USalign", "us-align", "./USalign"]
        );
    }
}
