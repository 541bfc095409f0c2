use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four chains of the γ-secretase complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subunit {
    Psen1,
    Pen2,
    Aph1,
    Nct,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown subunit '{0}'. Expected one of PSEN1, PEN-2, APH-1, NCT.")]
pub struct UnknownSubunit(pub String);

impl Subunit {
    pub const ALL: [Subunit; 4] = [Subunit::Psen1, Subunit::Pen2, Subunit::Aph1, Subunit::Nct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subunit::Psen1 => "PSEN1",
            Subunit::Pen2 => "PEN-2",
            Subunit::Aph1 => "APH-1",
            Subunit::Nct => "NCT",
        }
    }
}

impl FromStr for Subunit {
    type Err = UnknownSubunit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PSEN1" => Ok(Subunit::Psen1),
            "PEN2" | "PEN-2" => Ok(Subunit::Pen2),
            "APH1" | "APH-1" => Ok(Subunit::Aph1),
            "NCT" => Ok(Subunit::Nct),
            _ => Err(UnknownSubunit(s.to_string())),
        }
    }
}

impl fmt::Display for Subunit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One protein record of the species/subunit dataset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinEntry {
    pub species_name: String,
    pub id: String,
    pub subunits: String,
    pub sequence: String,
    pub structure_files: String,
    #[serde(default)]
    pub complex_structures: Vec<String>,
}

impl ProteinEntry {
    /// Canonical subunit label; unrecognized labels are passed through unchanged.
    pub fn subunit_label(&self) -> String {
        self.subunits
            .parse::<Subunit>()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|_| self.subunits.clone())
    }

    pub fn is_human(&self) -> bool {
        self.species_name.eq_ignore_ascii_case("human")
    }
}
