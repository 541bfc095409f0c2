use super::alphabet::{GAP, are_similar, is_gap};
use super::substitution::substitution_score;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SimilarityError {
    #[error("Cannot compare sequences: both inputs are empty")]
    EmptyInput,
}

/// Position-by-position comparison statistics for two sequences.
///
/// Percentages are relative to `alignment_length`, so gap positions dilute
/// identity, similarity and gaps alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub identity: f64,
    pub similarity: f64,
    pub gaps: f64,
    pub score: i32,
    pub alignment_length: usize,
    pub identical_residues: usize,
    pub similar_residues: usize,
    pub gap_residues: usize,
}

impl SimilarityResult {
    /// Non-gap positions that are neither identical nor chemically similar.
    pub fn dissimilar_residues(&self) -> usize {
        self.alignment_length - self.similar_residues - self.gap_residues
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Compares two sequences position by position.
///
/// When an aligned variant is supplied (and non-empty) it replaces the raw
/// sequence. No alignment is performed here: raw sequences are compared by
/// index, and positions past the end of the shorter one count as gaps.
///
/// # Errors
///
/// Returns [`SimilarityError::EmptyInput`] when both effective sequences are empty.
pub fn compare(
    sequence1: &str,
    sequence2: &str,
    aligned1: Option<&str>,
    aligned2: Option<&str>,
) -> Result<SimilarityResult, SimilarityError> {
    let seq1: Vec<char> = aligned1
        .filter(|s| !s.is_empty())
        .unwrap_or(sequence1)
        .chars()
        .collect();
    let seq2: Vec<char> = aligned2
        .filter(|s| !s.is_empty())
        .unwrap_or(sequence2)
        .chars()
        .collect();

    let alignment_length = seq1.len().max(seq2.len());
    if alignment_length == 0 {
        return Err(SimilarityError::EmptyInput);
    }

    let mut identical_residues = 0;
    let mut similar_residues = 0;
    let mut gap_residues = 0;
    let mut score = 0;

    for i in 0..alignment_length {
        let aa1 = seq1.get(i).copied().unwrap_or(GAP);
        let aa2 = seq2.get(i).copied().unwrap_or(GAP);

        if is_gap(aa1) || is_gap(aa2) {
            gap_residues += 1;
            continue;
        }

        score += substitution_score(aa1, aa2);
        if aa1 == aa2 {
            identical_residues += 1;
            similar_residues += 1;
        } else if are_similar(aa1, aa2) {
            similar_residues += 1;
        }
    }

    let percent = |count: usize| round_to(count as f64 / alignment_length as f64 * 100.0, 2);

    Ok(SimilarityResult {
        identity: percent(identical_residues),
        similarity: percent(similar_residues),
        gaps: percent(gap_residues),
        score,
        alignment_length,
        identical_residues,
        similar_residues,
        gap_residues,
    })
}

pub fn pairwise_identity(sequence1: &str, sequence2: &str) -> Result<f64, SimilarityError> {
    compare(sequence1, sequence2, None, None).map(|r| r.identity)
}

/// Identical positions over the length of the shorter sequence, unrounded.
///
/// Unlike [`compare`], the unmatched tail of the longer sequence is ignored.
/// Returns `0.0` when either sequence is empty.
pub fn overlap_identity(sequence1: &str, sequence2: &str) -> f64 {
    let min_length = sequence1.chars().count().min(sequence2.chars().count());
    if min_length == 0 {
        return 0.0;
    }
    let identical = sequence1
        .chars()
        .zip(sequence2.chars())
        .filter(|(a, b)| a == b)
        .count();
    identical as f64 / min_length as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences_are_fully_identical() {
        let result = compare("MKT", "MKT", None, None).unwrap();
        assert_eq!(
            result,
            SimilarityResult {
                identity: 100.0,
                similarity: 100.0,
                gaps: 0.0,
                score: 15,
                alignment_length: 3,
                identical_residues: 3,
                similar_residues: 3,
                gap_residues: 0,
            }
        );
    }

    #[test]
    fn shorter_sequence_is_padded_with_gaps() {
        let result = compare("MKT", "MK", None, None).unwrap();
        assert_eq!(result.alignment_length, 3);
        assert_eq!(result.gap_residues, 1);
        assert_eq!(result.identical_residues, 2);
        assert_eq!(result.gaps, 33.33);
        assert_eq!(result.identity, 66.67);
    }

    #[test]
    fn counts_partition_the_alignment_for_gapless_input() {
        let s1 = "MLVIDEKRGPSTW";
        let s2 = "MIVLEDRKGASCF";
        let result = compare(s1, s2, None, None).unwrap();

        assert_eq!(result.gaps, 0.0);
        assert_eq!(result.gap_residues, 0);
        let similar_only = result.similar_residues - result.identical_residues;
        assert_eq!(
            result.identical_residues + similar_only + result.dissimilar_residues(),
            result.alignment_length
        );
    }

    #[test]
    fn similar_but_not_identical_residues_count_only_towards_similarity() {
        let result = compare("IKD", "LRE", None, None).unwrap();
        assert_eq!(result.identical_residues, 0);
        assert_eq!(result.similar_residues, 3);
        assert_eq!(result.identity, 0.0);
        assert_eq!(result.similarity, 100.0);
        assert_eq!(result.score, 2 + 2 + 2);
    }

    #[test]
    fn gap_characters_are_skipped_and_do_not_score() {
        let result = compare("", "", Some("M-KT"), Some("MA-T")).unwrap();
        assert_eq!(result.alignment_length, 4);
        assert_eq!(result.gap_residues, 2);
        assert_eq!(result.identical_residues, 2);
        assert_eq!(result.score, 5 + 5);
        assert_eq!(result.gaps, 50.0);
    }

    #[test]
    fn aligned_variants_take_precedence_over_raw_sequences() {
        let raw = compare("MKT", "TKM", None, None).unwrap();
        let aligned = compare("MKT", "TKM", Some("MKT"), Some("MKT")).unwrap();
        assert_eq!(raw.identical_residues, 1);
        assert_eq!(aligned.identical_residues, 3);
    }

    #[test]
    fn empty_aligned_variant_falls_back_to_raw_sequence() {
        let result = compare("MKT", "MKT", Some(""), None).unwrap();
        assert_eq!(result.identity, 100.0);
    }

    #[test]
    fn unknown_symbols_are_never_similar_but_identical_ones_are_identical() {
        let result = compare("XB", "XZ", None, None).unwrap();
        assert_eq!(result.identical_residues, 1);
        assert_eq!(result.similar_residues, 1);
        assert_eq!(result.score, 1 - 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            compare("", "", None, None),
            Err(SimilarityError::EmptyInput)
        );
    }

    #[test]
    fn one_empty_sequence_is_all_gaps() {
        let result = compare("MKT", "", None, None).unwrap();
        assert_eq!(result.gap_residues, 3);
        assert_eq!(result.gaps, 100.0);
        assert_eq!(result.identity, 0.0);
    }

    #[test]
    fn pairwise_identity_matches_compare() {
        assert_eq!(pairwise_identity("MKTA", "MKTV").unwrap(), 75.0);
    }

    #[test]
    fn overlap_identity_ignores_the_unmatched_tail() {
        assert_eq!(overlap_identity("MKT", "MKTAAAA"), 100.0);
        assert_eq!(overlap_identity("MKTA", "MKTV"), 75.0);
        assert_eq!(overlap_identity("", "MKT"), 0.0);
    }
}
