use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a structural comparison result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed from the output of the external structural aligner.
    Measured,
    /// Synthesized because the aligner was unavailable or failed.
    Simulated,
    /// Persisted before results were tagged.
    #[default]
    Unknown,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provenance::Measured => "measured",
            Provenance::Simulated => "simulated",
            Provenance::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Structure-level similarity between a reference and a target chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralComparisonResult {
    /// Root-mean-square deviation of aligned atoms, in Å.
    pub rmsd: f64,
    pub tm_score: f64,
    pub aligned_length: usize,
    pub sequence_identity: f64,
    #[serde(rename = "gdt_ts", default)]
    pub gdt_ts: f64,
    #[serde(rename = "gdt_ha", default)]
    pub gdt_ha: f64,
    #[serde(default)]
    pub chain_length1: usize,
    #[serde(default)]
    pub chain_length2: usize,
    #[serde(default)]
    pub aligned_residues: usize,
    #[serde(default)]
    pub provenance: Provenance,
}

impl StructuralComparisonResult {
    pub fn is_simulated(&self) -> bool {
        self.provenance == Provenance::Simulated
    }
}

/// Cache key for one (subunit, target species) comparison.
///
/// The species is normalized to lowercase so `Mouse` and `mouse` share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparisonKey {
    subunit: String,
    species: String,
}

impl ComparisonKey {
    pub fn new(subunit: impl Into<String>, species: impl AsRef<str>) -> Self {
        Self {
            subunit: subunit.into(),
            species: species.as_ref().to_lowercase(),
        }
    }

    pub fn subunit(&self) -> &str {
        &self.subunit
    }

    pub fn species(&self) -> &str {
        &self.species
    }
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subunit, self.species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_persisted_field_names() {
        let result = StructuralComparisonResult {
            rmsd: 1.25,
            tm_score: 0.912,
            aligned_length: 420,
            sequence_identity: 0.85,
            gdt_ts: 88.1,
            gdt_ha: 70.2,
            chain_length1: 467,
            chain_length2: 455,
            aligned_residues: 420,
            provenance: Provenance::Measured,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["rmsd"], 1.25);
        assert_eq!(json["tmScore"], 0.912);
        assert_eq!(json["alignedLength"], 420);
        assert_eq!(json["sequenceIdentity"], 0.85);
        assert_eq!(json["gdt_ts"], 88.1);
        assert_eq!(json["gdt_ha"], 70.2);
        assert_eq!(json["chainLength1"], 467);
        assert_eq!(json["chainLength2"], 455);
        assert_eq!(json["alignedResidues"], 420);
        assert_eq!(json["provenance"], "measured");
    }

    #[test]
    fn untagged_legacy_records_deserialize_with_unknown_provenance() {
        let json = r#"{
            "rmsd": 1.1, "tmScore": 0.8, "alignedLength": 300,
            "sequenceIdentity": 75.5, "chainLength1": 400, "chainLength2": 410,
            "alignedResidues": 300
        }"#;
        let result: StructuralComparisonResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.provenance, Provenance::Unknown);
        assert_eq!(result.gdt_ts, 0.0);
        assert!(!result.is_simulated());
    }

    #[test]
    fn comparison_key_lowercases_species_only() {
        let key = ComparisonKey::new("PEN-2", "Mouse");
        assert_eq!(key.subunit(), "PEN-2");
        assert_eq!(key.species(), "mouse");
        assert_eq!(key, ComparisonKey::new("PEN-2", "MOUSE"));
        assert_ne!(key, ComparisonKey::new("pen-2", "mouse"));
        assert_eq!(key.to_string(), "PEN-2/mouse");
    }
}
