use crate::core::models::dataset::ProteinEntry;
use crate::core::models::structural::{ComparisonKey, StructuralComparisonResult};
use crate::core::sequence::conservation::{
    ConservedRegion, DEFAULT_IDENTITY_THRESHOLD, DEFAULT_WINDOW_SIZE, conservation_score,
    find_conserved_regions,
};
use crate::core::sequence::similarity::{SimilarityError, SimilarityResult, compare};
use crate::engine::aligner::Aligner;
use crate::engine::cache::ComparisonCache;
use crate::engine::comparator::{CompareOptions, StructuralComparator, StructuralRequest};
use crate::engine::error::EngineError;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Sequence comparison failed: {0}")]
    Similarity(#[from] SimilarityError),
    #[error("Structural comparison failed: {0}")]
    Engine(#[from] EngineError),
}

/// Sequence and structure metrics for one target protein against a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    pub subunit: String,
    pub reference_species: String,
    pub target_species: String,
    pub sequence_similarity: SimilarityResult,
    pub conserved_regions: Vec<ConservedRegion>,
    /// Weighted blend of identity and conserved-region density.
    pub overall_score: f64,
    pub structural_comparison: StructuralComparisonResult,
    pub structure_cached: bool,
}

#[instrument(level = "debug", skip_all, fields(reference = %reference.id, target = %target.id))]
pub async fn analyze_pair<A: Aligner, C: ComparisonCache>(
    comparator: &StructuralComparator<A, C>,
    reference: &ProteinEntry,
    target: &ProteinEntry,
    options: CompareOptions,
) -> Result<ComparisonRecord, AnalysisError> {
    let sequence_similarity = compare(&reference.sequence, &target.sequence, None, None)?;
    let conserved_regions = find_conserved_regions(
        &reference.sequence,
        &target.sequence,
        DEFAULT_WINDOW_SIZE,
        DEFAULT_IDENTITY_THRESHOLD,
    );
    let overall_score = conservation_score(&reference.sequence, &target.sequence)?;

    let subunit = target.subunit_label();
    let request = StructuralRequest::new(&reference.structure_files, &target.structure_files)
        .with_key(ComparisonKey::new(subunit.clone(), &target.species_name))
        .with_sequences(&reference.sequence, &target.sequence)
        .with_options(options);
    let outcome = comparator.compare(&request).await?;

    Ok(ComparisonRecord {
        subunit,
        reference_species: reference.species_name.clone(),
        target_species: target.species_name.clone(),
        sequence_similarity,
        conserved_regions,
        overall_score,
        structural_comparison: outcome.result,
        structure_cached: outcome.cached,
    })
}
