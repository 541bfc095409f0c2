use phf::{Map, phf_map};

static BLOSUM62_INDEX: Map<char, usize> = phf_map! {
    'A' => 0, 'R' => 1, 'N' => 2, 'D' => 3, 'C' => 4,
    'Q' => 5, 'E' => 6, 'G' => 7, 'H' => 8, 'I' => 9,
    'L' => 10, 'K' => 11, 'M' => 12, 'F' => 13, 'P' => 14,
    'S' => 15, 'T' => 16, 'W' => 17, 'Y' => 18, 'V' => 19,
};

#[rustfmt::skip]
const BLOSUM62: [[i8; 20]; 20] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4], // V
];

/// BLOSUM62 score for a residue pair.
///
/// Pairs involving a symbol outside the table score `+1` when identical and
/// `-1` otherwise.
pub fn substitution_score(a: char, b: char) -> i32 {
    match (BLOSUM62_INDEX.get(&a), BLOSUM62_INDEX.get(&b)) {
        (Some(&i), Some(&j)) => BLOSUM62[i][j] as i32,
        _ if a == b => 1,
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::alphabet::STANDARD_RESIDUES;

    #[test]
    fn table_is_symmetric() {
        for a in STANDARD_RESIDUES {
            for b in STANDARD_RESIDUES {
                assert_eq!(
                    substitution_score(a, b),
                    substitution_score(b, a),
                    "asymmetric pair {}{}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn diagonal_is_positive_for_every_standard_residue() {
        for a in STANDARD_RESIDUES {
            assert!(substitution_score(a, a) > 0);
        }
    }

    #[test]
    fn known_blosum62_values_are_returned() {
        assert_eq!(substitution_score('A', 'A'), 4);
        assert_eq!(substitution_score('W', 'W'), 11);
        assert_eq!(substitution_score('C', 'C'), 9);
        assert_eq!(substitution_score('I', 'V'), 3);
        assert_eq!(substitution_score('D', 'L'), -4);
        assert_eq!(substitution_score('K', 'R'), 2);
    }

    #[test]
    fn unknown_symbols_fall_back_to_identity_scoring() {
        assert_eq!(substitution_score('X', 'X'), 1);
        assert_eq!(substitution_score('X', 'A'), -1);
        assert_eq!(substitution_score('B', 'Z'), -1);
        assert_eq!(substitution_score('a', 'A'), -1);
    }
}
