//! # Workflows Module
//!
//! High-level entry points that tie the sequence statistics of [`crate::core`]
//! to the structural comparison engine.
//!
//! - **Comparison Service** ([`service`]) - Request validation and response shaping
//!   for structural comparisons, cache lookups and availability probes.
//! - **Pairwise Analysis** ([`analyze`]) - Sequence similarity, conserved regions and
//!   structural metrics for one pair of dataset entries.
//! - **Precompute** ([`precompute`]) - Refreshes the cache for every subunit of a dataset
//!   against its reference species.
//! - **Export** ([`export`]) - Tabular export of cached comparisons.

pub mod analyze;
pub mod export;
pub mod precompute;
pub mod service;

#[cfg(test)]
mod test_support;
