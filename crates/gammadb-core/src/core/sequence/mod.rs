//! Amino-acid sequence statistics.
//!
//! - [`alphabet`] - Standard residues and their chemical classes
//! - [`substitution`] - BLOSUM62 pair scores
//! - [`similarity`] - Position-by-position identity, similarity and gap statistics
//! - [`conservation`] - Sliding-window detection of conserved regions
//! - [`composition`] - Residue frequencies and hydrophobicity

pub mod alphabet;
pub mod composition;
pub mod conservation;
pub mod similarity;
pub mod substitution;
