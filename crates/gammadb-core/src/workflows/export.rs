use crate::core::models::structural::Provenance;
use crate::engine::cache::{CacheError, ComparisonCache};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to read the comparison cache: {0}")]
    Cache(#[from] CacheError),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    subunit: &'a str,
    species: &'a str,
    rmsd: f64,
    tm_score: f64,
    aligned_length: usize,
    sequence_identity: f64,
    gdt_ts: f64,
    gdt_ha: f64,
    chain_length1: usize,
    chain_length2: usize,
    aligned_residues: usize,
    provenance: Provenance,
}

/// Writes every cached comparison as one CSV row and returns the row count.
pub fn export_csv(cache: &impl ComparisonCache, writer: impl Write) -> Result<usize, ExportError> {
    let entries = cache.entries()?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (key, result) in &entries {
        csv_writer.serialize(ExportRow {
            subunit: key.subunit(),
            species: key.species(),
            rmsd: result.rmsd,
            tm_score: result.tm_score,
            aligned_length: result.aligned_length,
            sequence_identity: result.sequence_identity,
            gdt_ts: result.gdt_ts,
            gdt_ha: result.gdt_ha,
            chain_length1: result.chain_length1,
            chain_length2: result.chain_length2,
            aligned_residues: result.aligned_residues,
            provenance: result.provenance,
        })?;
    }
    csv_writer.flush()?;
    Ok(entries.len())
}
