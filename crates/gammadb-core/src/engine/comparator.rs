use super::aligner::{Aligner, UsAlign};
use super::cache::{CacheStore, ComparisonCache};
use super::config::ComparisonConfig;
use super::error::{EngineError, StructureRole};
use super::simulation::Simulator;
use crate::core::io::aligner_output;
use crate::core::models::structural::{ComparisonKey, StructuralComparisonResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    pub use_cache: bool,
    pub simulate: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            simulate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub reference: String,
    pub target: String,
}

/// One structural comparison between a reference and a target structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralRequest {
    pub reference: String,
    pub target: String,
    /// Results are read from and written to the cache only when a key is set.
    pub key: Option<ComparisonKey>,
    /// Lets simulation derive metrics from sequence identity.
    pub sequences: Option<SequencePair>,
    pub options: CompareOptions,
}

impl StructuralRequest {
    pub fn new(reference: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            target: target.into(),
            key: None,
            sequences: None,
            options: CompareOptions::default(),
        }
    }

    pub fn with_key(mut self, key: ComparisonKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_sequences(mut self, reference: impl Into<String>, target: impl Into<String>) -> Self {
        self.sequences = Some(SequencePair {
            reference: reference.into(),
            target: target.into(),
        });
        self
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonOutcome {
    pub result: StructuralComparisonResult,
    /// `true` only when the result was served from the cache.
    pub cached: bool,
}

/// Obtains structural metrics from the cache, the aligner, or the simulator.
pub struct StructuralComparator<A: Aligner, C: ComparisonCache> {
    aligner: A,
    cache: C,
    simulator: Simulator,
    structure_root: PathBuf,
}

/// The comparator wired to the US-align subprocess and a configured cache.
pub type DefaultComparator = StructuralComparator<UsAlign, CacheStore>;

impl DefaultComparator {
    pub fn from_config(config: &ComparisonConfig) -> Self {
        StructuralComparator::new(
            UsAlign::new(config.aligner.clone()),
            CacheStore::open(&config.cache),
            Simulator::new(config.simulation_seed),
            config.structure_root.clone(),
        )
    }
}

impl<A: Aligner, C: ComparisonCache> StructuralComparator<A, C> {
    pub fn new(aligner: A, cache: C, simulator: Simulator, structure_root: PathBuf) -> Self {
        Self {
            aligner,
            cache,
            simulator,
            structure_root,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    pub async fn is_tool_available(&self) -> bool {
        self.aligner.is_available().await
    }

    /// Reads a cached result. Cache failures are logged and read as a miss.
    pub fn lookup(&self, key: &ComparisonKey) -> Option<StructuralComparisonResult> {
        match self.cache.get(key) {
            Ok(hit) => hit,
            Err(e) => {
                warn!(%key, error = %e, "Cache read failed; treating as a miss.");
                None
            }
        }
    }

    /// Joins relative structure references onto the structure root.
    pub fn resolve(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.structure_root.join(path)
        }
    }

    #[instrument(
        level = "info",
        skip_all,
        fields(reference = %request.reference, target = %request.target)
    )]
    pub async fn compare(
        &self,
        request: &StructuralRequest,
    ) -> Result<ComparisonOutcome, EngineError> {
        if request.reference.trim().is_empty() || request.target.trim().is_empty() {
            return Err(EngineError::InvalidRequest(
                "Reference and target structure files are required".to_string(),
            ));
        }

        if request.options.use_cache {
            if let Some(key) = &request.key {
                if let Some(result) = self.lookup(key) {
                    debug!(%key, "Serving structural comparison from cache.");
                    return Ok(ComparisonOutcome {
                        result,
                        cached: true,
                    });
                }
            }
        }

        if request.options.simulate {
            debug!("Simulation requested; skipping the aligner.");
            return Ok(self.simulate_and_store(request));
        }

        if !self.aligner.is_available().await {
            warn!(aligner = self.aligner.name(), "Structural aligner unavailable; using simulated metrics.");
            return Ok(self.simulate_and_store(request));
        }

        let reference = self.resolve(&request.reference);
        let target = self.resolve(&request.target);
        for (role, path) in [
            (StructureRole::Reference, &reference),
            (StructureRole::Target, &target),
        ] {
            if !path.is_file() {
                return Err(EngineError::StructureNotFound {
                    role,
                    path: path.clone(),
                });
            }
        }

        let parsed = match self.aligner.run(&reference, &target).await {
            Ok(output) => aligner_output::parse(&output.stdout).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match parsed {
            Ok(result) => {
                info!(
                    rmsd = result.rmsd,
                    tm_score = result.tm_score,
                    "Structural alignment completed."
                );
                self.store(request.key.as_ref(), &result);
                Ok(ComparisonOutcome {
                    result,
                    cached: false,
                })
            }
            Err(reason) => {
                warn!(
                    aligner = self.aligner.name(),
                    %reason,
                    "Structural alignment failed; using simulated metrics."
                );
                Ok(self.simulate_and_store(request))
            }
        }
    }

    /// Simulates a result for `request` and caches it when a key is present.
    pub fn simulate_and_store(&self, request: &StructuralRequest) -> ComparisonOutcome {
        let result = match &request.sequences {
            Some(pair) => self.simulator.from_sequences(&pair.reference, &pair.target),
            None => self.simulator.unconstrained(),
        };
        self.store(request.key.as_ref(), &result);
        ComparisonOutcome {
            result,
            cached: false,
        }
    }

    fn store(&self, key: Option<&ComparisonKey>, result: &StructuralComparisonResult) {
        let Some(key) = key else {
            return;
        };
        if let Err(e) = self.cache.put(key, result) {
            warn!(%key, error = %e, "Failed to write structural comparison to cache.");
        }
    }
}
