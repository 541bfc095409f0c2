use super::alphabet::{STANDARD_RESIDUES, is_hydrophobic};
use std::collections::BTreeMap;

/// Percentage of each standard residue in `sequence`.
///
/// The denominator is the full sequence length, so gaps and unknown symbols
/// lower every frequency. An empty sequence yields all zeros.
pub fn composition(sequence: &str) -> BTreeMap<char, f64> {
    let mut counts: BTreeMap<char, usize> = STANDARD_RESIDUES.iter().map(|&aa| (aa, 0)).collect();
    let mut total = 0usize;
    for residue in sequence.chars() {
        total += 1;
        if let Some(count) = counts.get_mut(&residue) {
            *count += 1;
        }
    }

    counts
        .into_iter()
        .map(|(aa, count)| {
            let pct = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            (aa, pct)
        })
        .collect()
}

/// Percentage of hydrophobic residues (A I L M F W Y V); `0.0` when empty.
pub fn hydrophobicity(sequence: &str) -> f64 {
    let total = sequence.chars().count();
    if total == 0 {
        return 0.0;
    }
    let hydrophobic = sequence.chars().filter(|&c| is_hydrophobic(c)).count();
    hydrophobic as f64 / total as f64 * 100.0
}
