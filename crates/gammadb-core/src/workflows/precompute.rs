use crate::core::models::dataset::ProteinEntry;
use crate::core::models::structural::{ComparisonKey, Provenance};
use crate::engine::aligner::Aligner;
use crate::engine::cache::ComparisonCache;
use crate::engine::comparator::{CompareOptions, StructuralComparator, StructuralRequest};
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubunitSummary {
    pub subunit: String,
    pub reference_id: String,
    pub measured: usize,
    pub simulated: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrecomputeSummary {
    pub subunits: Vec<SubunitSummary>,
}

impl PrecomputeSummary {
    pub fn total(&self) -> usize {
        self.subunits.iter().map(|s| s.measured + s.simulated).sum()
    }
}

fn group_by_subunit(entries: &[ProteinEntry]) -> BTreeMap<String, Vec<&ProteinEntry>> {
    let mut groups: BTreeMap<String, Vec<&ProteinEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.subunit_label()).or_default().push(entry);
    }
    groups
}

/// Compares every entry against its subunit's reference and refreshes the cache.
///
/// The human entry of each subunit is the reference, or the first entry when
/// no human entry exists. Existing cache entries are recomputed. A comparison
/// that cannot run at all, such as one with a missing structure file, is
/// stored as a sequence-derived simulation.
#[instrument(skip_all, fields(entries = entries.len()))]
pub async fn precompute<A: Aligner, C: ComparisonCache>(
    comparator: &StructuralComparator<A, C>,
    entries: &[ProteinEntry],
    reporter: &ProgressReporter<'_>,
) -> PrecomputeSummary {
    let groups = group_by_subunit(entries);
    info!(subunits = groups.len(), "Starting structural precomputation.");

    let mut summary = PrecomputeSummary::default();
    for (subunit, proteins) in &groups {
        let Some(reference) = proteins
            .iter()
            .find(|p| p.is_human())
            .or_else(|| proteins.first())
            .copied()
        else {
            continue;
        };
        let targets: Vec<&ProteinEntry> = proteins
            .iter()
            .copied()
            .filter(|p| p.id != reference.id)
            .collect();

        info!(subunit = %subunit, reference = %reference.id, "Processing subunit.");
        reporter.report(Progress::SubunitStart {
            subunit: subunit.clone(),
            comparisons: targets.len() as u64,
        });

        let mut subunit_summary = SubunitSummary {
            subunit: subunit.clone(),
            reference_id: reference.id.clone(),
            measured: 0,
            simulated: 0,
        };
        for target in targets {
            let request = StructuralRequest::new(&reference.structure_files, &target.structure_files)
                .with_key(ComparisonKey::new(subunit.clone(), &target.species_name))
                .with_sequences(&reference.sequence, &target.sequence)
                .with_options(CompareOptions {
                    use_cache: false,
                    simulate: false,
                });

            let outcome = match comparator.compare(&request).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(species = %target.species_name, error = %e, "Comparison failed; storing simulated metrics.");
                    comparator.simulate_and_store(&request)
                }
            };

            let provenance = outcome.result.provenance;
            if provenance == Provenance::Measured {
                subunit_summary.measured += 1;
            } else {
                subunit_summary.simulated += 1;
            }
            reporter.report(Progress::ComparisonFinished {
                species: target.species_name.to_lowercase(),
                provenance,
            });
        }

        reporter.report(Progress::SubunitFinish);
        summary.subunits.push(subunit_summary);
    }

    info!(comparisons = summary.total(), "Structural precomputation complete.");
    summary
}
