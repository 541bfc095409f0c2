//! # Engine Module
//!
//! The structural comparison orchestrator. Given two structure files it produces
//! a [`StructuralComparisonResult`](crate::core::models::structural::StructuralComparisonResult)
//! from one of three sources, in order of preference:
//!
//! 1. the comparison cache, keyed by subunit and target species;
//! 2. the external structural aligner, run as a subprocess and parsed;
//! 3. the simulator, when the aligner is unavailable or fails.
//!
//! Every result carries a [`Provenance`](crate::core::models::structural::Provenance)
//! so measured and simulated metrics are never confused.
//!
//! ## Submodules
//!
//! - **Configuration** ([`config`]) - Aligner invocation limits, cache backend and structure root
//! - **Aligner** ([`aligner`]) - The aligner abstraction and the US-align subprocess runner
//! - **Cache** ([`cache`]) - File-backed and in-memory result stores
//! - **Simulation** ([`simulation`]) - Seeded fallback metrics
//! - **Comparator** ([`comparator`]) - The per-request decision flow
//! - **Progress Monitoring** ([`progress`]) - Progress events for long-running workflows
//! - **Error Handling** ([`error`]) - Failures that reach the caller

pub mod aligner;
pub mod cache;
pub mod comparator;
pub mod config;
pub mod error;
pub mod progress;
pub mod simulation;
