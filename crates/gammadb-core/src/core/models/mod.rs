//! Value types shared across the library.
//!
//! - [`structural`] - Structural comparison results, their provenance and cache keys
//! - [`dataset`] - Protein records of the species dataset and the subunit vocabulary

pub mod dataset;
pub mod structural;
