//! Text and file formats read or written by the library.
//!
//! This module parses the human-readable report of the external structural
//! aligner and reads the species/subunit dataset document through a
//! trait-based interface.

pub mod aligner_output;
pub mod dataset;
pub mod traits;
