use crate::core::models::structural::{Provenance, StructuralComparisonResult};
use crate::core::sequence::similarity::round_to;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Aligner output contains no recognizable metrics ({length} bytes)")]
    NoMetrics { length: usize },
}

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

fn metric(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){}\s*[=:]\s*{}", label, NUMBER))
        .expect("metric pattern is a valid regex")
}

static RMSD: LazyLock<Regex> = LazyLock::new(|| metric("RMSD"));
static TM_SCORE: LazyLock<Regex> = LazyLock::new(|| metric("TM-score"));
static ALIGNED_LENGTH: LazyLock<Regex> = LazyLock::new(|| metric("Aligned length"));
static SEQUENCE_IDENTITY: LazyLock<Regex> = LazyLock::new(|| metric("Sequence identity"));
// US-align reports identity as a fraction of the aligned residues.
static SEQ_ID_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| metric("Seq_ID=n_identical/n_aligned"));
static GDT_TS: LazyLock<Regex> = LazyLock::new(|| metric("GDT-TS"));
static GDT_HA: LazyLock<Regex> = LazyLock::new(|| metric("GDT-HA"));
static CHAIN_1: LazyLock<Regex> = LazyLock::new(|| metric("Chain_1"));
static CHAIN_2: LazyLock<Regex> = LazyLock::new(|| metric("Chain_2"));

fn capture(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extracts structural metrics from the aligner's human-readable report.
///
/// Each field is matched independently, case-insensitively, with either `=`
/// or `:` as separator; the first occurrence wins and absent fields stay 0.
/// The aligned length is mirrored into `aligned_residues`. Sequence identity
/// is always a percentage; US-align's `Seq_ID=` fraction is scaled by 100.
///
/// # Errors
///
/// Returns [`ParseError::NoMetrics`] only when not a single field matched.
pub fn parse(output: &str) -> Result<StructuralComparisonResult, ParseError> {
    let rmsd = capture(&RMSD, output);
    let tm_score = capture(&TM_SCORE, output);
    let aligned_length = capture(&ALIGNED_LENGTH, output);
    let sequence_identity = capture(&SEQUENCE_IDENTITY, output).or_else(|| {
        capture(&SEQ_ID_FRACTION, output).map(|fraction| round_to(fraction * 100.0, 4))
    });
    let gdt_ts = capture(&GDT_TS, output);
    let gdt_ha = capture(&GDT_HA, output);
    let chain_length1 = capture(&CHAIN_1, output);
    let chain_length2 = capture(&CHAIN_2, output);

    let found = [
        rmsd,
        tm_score,
        aligned_length,
        sequence_identity,
        gdt_ts,
        gdt_ha,
        chain_length1,
        chain_length2,
    ];
    if found.iter().all(Option::is_none) {
        return Err(ParseError::NoMetrics {
            length: output.len(),
        });
    }

    let aligned_length = aligned_length.unwrap_or(0.0) as usize;
    Ok(StructuralComparisonResult {
        rmsd: rmsd.unwrap_or(0.0),
        tm_score: tm_score.unwrap_or(0.0),
        aligned_length,
        sequence_identity: sequence_identity.unwrap_or(0.0),
        gdt_ts: gdt_ts.unwrap_or(0.0),
        gdt_ha: gdt_ha.unwrap_or(0.0),
        chain_length1: chain_length1.unwrap_or(0.0) as usize,
        chain_length2: chain_length2.unwrap_or(0.0) as usize,
        aligned_residues: aligned_length,
        provenance: Provenance::Measured,
    })
}
