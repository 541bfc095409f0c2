//! # γ-Secretase Comparison Library
//!
//! Sequence and structure comparison for the subunits of the γ-secretase complex
//! (PSEN1, PEN-2, APH-1, NCT) across species.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`StructuralComparisonResult`,
//!   `ProteinEntry`), the pairwise similarity engine with its substitution table,
//!   conserved-region detection, and I/O for aligner reports and dataset files.
//!
//! - **[`engine`]: The Orchestrator.** Drives structural comparisons through the cache,
//!   the external aligner subprocess and the seeded simulator, with timeouts and
//!   provenance tagging.
//!
//! - **[`workflows`]: The Public API.** Request handling for the comparison service,
//!   combined pairwise analysis, dataset-wide precomputation and export of cached results.

pub mod core;
pub mod engine;
pub mod workflows;
