//! # Core Module
//!
//! Stateless building blocks for comparing γ-secretase subunits across species.
//!
//! ## Architecture
//!
//! - **Sequence Statistics** ([`sequence`]) - Residue classes, BLOSUM62 scoring, the
//!   pairwise similarity engine and conserved-region detection
//! - **Data Models** ([`models`]) - Structural comparison results, provenance tags,
//!   cache keys and dataset records
//! - **File I/O** ([`io`]) - Aligner report parsing and dataset documents
//!
//! Nothing in this module performs process or network I/O; the orchestration of
//! the external aligner lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod sequence;
