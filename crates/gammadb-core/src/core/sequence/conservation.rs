use super::similarity::{SimilarityError, compare, round_to};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_SIZE: usize = 10;
pub const DEFAULT_IDENTITY_THRESHOLD: f64 = 80.0;

/// A stretch of positions whose windowed identity met the threshold.
///
/// `start` and `end` are 0-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservedRegion {
    pub start: usize,
    pub end: usize,
    pub identity: f64,
}

impl ConservedRegion {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Slides a fixed window over both sequences and keeps windows whose identity
/// is at least `threshold` percent, merging overlapping or adjacent hits.
pub fn find_conserved_regions(
    sequence1: &str,
    sequence2: &str,
    window_size: usize,
    threshold: f64,
) -> Vec<ConservedRegion> {
    let seq1: Vec<char> = sequence1.chars().collect();
    let seq2: Vec<char> = sequence2.chars().collect();
    let min_length = seq1.len().min(seq2.len());

    if window_size == 0 || min_length < window_size {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for start in 0..=(min_length - window_size) {
        let window1: String = seq1[start..start + window_size].iter().collect();
        let window2: String = seq2[start..start + window_size].iter().collect();

        let Ok(similarity) = compare(&window1, &window2, None, None) else {
            continue;
        };
        if similarity.identity >= threshold {
            hits.push(ConservedRegion {
                start,
                end: start + window_size - 1,
                identity: similarity.identity,
            });
        }
    }

    merge_regions(hits)
}

/// Sorts regions by start and folds every region that overlaps or directly
/// follows the previous one into it, keeping the higher identity.
pub fn merge_regions(mut regions: Vec<ConservedRegion>) -> Vec<ConservedRegion> {
    regions.sort_by_key(|r| r.start);

    let mut merged: Vec<ConservedRegion> = Vec::with_capacity(regions.len());
    for region in regions {
        match merged.last_mut() {
            Some(last) if region.start <= last.end + 1 => {
                last.end = last.end.max(region.end);
                last.identity = last.identity.max(region.identity);
            }
            _ => merged.push(region),
        }
    }
    merged
}

/// Blends global identity (70%) with conserved-region density (30%).
pub fn conservation_score(sequence1: &str, sequence2: &str) -> Result<f64, SimilarityError> {
    let similarity = compare(sequence1, sequence2, None, None)?;
    let regions = find_conserved_regions(
        sequence1,
        sequence2,
        DEFAULT_WINDOW_SIZE,
        DEFAULT_IDENTITY_THRESHOLD,
    );

    let identity_part = similarity.identity * 0.7;
    let region_part = regions.len() as f64 / similarity.alignment_length as f64 * 100.0 * 0.3;
    Ok(round_to(identity_part + region_part, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: usize, end: usize, identity: f64) -> ConservedRegion {
        ConservedRegion {
            start,
            end,
            identity,
        }
    }

    fn assert_sorted_and_disjoint(regions: &[ConservedRegion]) {
        for pair in regions.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end + 1 < pair[1].start);
        }
    }

    #[test]
    fn overlapping_windows_merge_and_keep_max_identity() {
        let merged = merge_regions(vec![region(0, 9, 85.0), region(8, 17, 90.0)]);
        assert_eq!(merged, vec![region(0, 17, 90.0)]);
    }

    #[test]
    fn adjacent_windows_merge() {
        let merged = merge_regions(vec![region(10, 19, 80.0), region(0, 9, 95.0)]);
        assert_eq!(merged, vec![region(0, 19, 95.0)]);
    }

    #[test]
    fn separated_windows_stay_apart_and_sorted() {
        let merged = merge_regions(vec![region(30, 39, 90.0), region(0, 9, 85.0)]);
        assert_eq!(merged, vec![region(0, 9, 85.0), region(30, 39, 90.0)]);
    }

    #[test]
    fn contained_window_does_not_shrink_region() {
        let merged = merge_regions(vec![region(0, 20, 81.0), region(5, 10, 99.0)]);
        assert_eq!(merged, vec![region(0, 20, 99.0)]);
    }

    #[test]
    fn identical_sequences_form_one_region_spanning_everything() {
        let seq = "MTELPAPLSYFQNAQMSEDNHLSNTVRSQ";
        let regions = find_conserved_regions(seq, seq, 10, 80.0);
        assert_eq!(regions, vec![region(0, seq.len() - 1, 100.0)]);
    }

    #[test]
    fn divergent_middle_splits_regions() {
        let s1 = "AAAAAAAAAAAAWWWWWWWWWWWWWWWWWWWWAAAAAAAAAAAA";
        let s2 = "AAAAAAAAAAAAKKKKKKKKKKKKKKKKKKKKAAAAAAAAAAAA";
        let regions = find_conserved_regions(s1, s2, 10, 80.0);

        assert_eq!(regions.len(), 2);
        assert_sorted_and_disjoint(&regions);
        assert_eq!(regions[0].start, 0);
        assert_eq!(regions[1].end, s1.len() - 1);
        for r in &regions {
            assert!(r.identity >= 80.0);
            assert!(r.len() >= 10);
        }
    }

    #[test]
    fn window_larger_than_sequences_yields_nothing() {
        assert!(find_conserved_regions("MKT", "MKT", 10, 80.0).is_empty());
        assert!(find_conserved_regions("MKT", "MKT", 0, 80.0).is_empty());
    }

    #[test]
    fn windows_only_cover_the_shorter_sequence() {
        let regions = find_conserved_regions("MKTAYIAKQR", "MKTAYIAKQRQISFVK", 10, 80.0);
        assert_eq!(regions, vec![region(0, 9, 100.0)]);
    }

    #[test]
    fn conservation_score_weights_identity_and_regions() {
        let seq = "MKTAYIAKQR";
        // identity 100 * 0.7 + (1 region / 10) * 100 * 0.3
        assert_eq!(conservation_score(seq, seq).unwrap(), 73.0);
    }

    #[test]
    fn conservation_score_rejects_empty_input() {
        assert!(conservation_score("", "").is_err());
    }
}
