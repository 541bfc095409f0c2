use phf::{Set, phf_set};

/// The twenty standard amino acids in one-letter code, alphabetical.
pub const STANDARD_RESIDUES: [char; 20] = [
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W',
    'Y',
];

pub const GAP: char = '-';

static HYDROPHOBIC: Set<char> = phf_set! { 'A', 'I', 'L', 'M', 'F', 'W', 'Y', 'V' };
static POLAR: Set<char> = phf_set! { 'N', 'C', 'Q', 'S', 'T' };
static POSITIVE: Set<char> = phf_set! { 'R', 'H', 'K' };
static NEGATIVE: Set<char> = phf_set! { 'D', 'E' };
static SPECIAL: Set<char> = phf_set! { 'G', 'P' };

/// Chemical class used to decide whether two non-identical residues count as similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    Hydrophobic,
    Polar,
    PositivelyCharged,
    NegativelyCharged,
    Special,
}

pub fn is_gap(residue: char) -> bool {
    residue == GAP
}

pub fn is_hydrophobic(residue: char) -> bool {
    HYDROPHOBIC.contains(&residue)
}

pub fn residue_class(residue: char) -> Option<ResidueClass> {
    if HYDROPHOBIC.contains(&residue) {
        Some(ResidueClass::Hydrophobic)
    } else if POLAR.contains(&residue) {
        Some(ResidueClass::Polar)
    } else if POSITIVE.contains(&residue) {
        Some(ResidueClass::PositivelyCharged)
    } else if NEGATIVE.contains(&residue) {
        Some(ResidueClass::NegativelyCharged)
    } else if SPECIAL.contains(&residue) {
        Some(ResidueClass::Special)
    } else {
        None
    }
}

/// Residues outside every class are never similar, not even to themselves.
pub fn are_similar(a: char, b: char) -> bool {
    match (residue_class(a), residue_class(b)) {
        (Some(class_a), Some(class_b)) => class_a == class_b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_residue_belongs_to_exactly_one_class() {
        for residue in STANDARD_RESIDUES {
            assert!(
                residue_class(residue).is_some(),
                "{} has no class",
                residue
            );
        }
    }

    #[test]
    fn residue_class_is_case_sensitive_and_rejects_unknown_symbols() {
        assert_eq!(residue_class('a'), None);
        assert_eq!(residue_class('X'), None);
        assert_eq!(residue_class(GAP), None);
    }

    #[test]
    fn are_similar_groups_residues_by_chemistry() {
        assert!(are_similar('I', 'L'));
        assert!(are_similar('K', 'R'));
        assert!(are_similar('D', 'E'));
        assert!(are_similar('G', 'P'));
        assert!(!are_similar('D', 'K'));
        assert!(!are_similar('A', 'S'));
    }

    #[test]
    fn are_similar_is_false_for_unclassified_symbols() {
        assert!(!are_similar('X', 'X'));
        assert!(!are_similar('B', 'D'));
    }

    #[test]
    fn is_gap_only_matches_dash() {
        assert!(is_gap('-'));
        assert!(!is_gap('.'));
        assert!(!is_gap('A'));
    }
}
