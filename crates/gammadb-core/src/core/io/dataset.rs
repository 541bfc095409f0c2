use super::traits::DatasetFile;
use crate::core::models::dataset::ProteinEntry;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed dataset document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Entry '{id}' has an empty {field}")]
    EmptyField { id: String, field: &'static str },
}

/// The JSON array of protein records shipped with the database.
pub struct JsonDataset;

impl JsonDataset {
    pub fn validate(entries: &[ProteinEntry]) -> Result<(), DatasetError> {
        for entry in entries {
            if entry.sequence.trim().is_empty() {
                return Err(DatasetError::EmptyField {
                    id: entry.id.clone(),
                    field: "sequence",
                });
            }
            if entry.species_name.trim().is_empty() {
                return Err(DatasetError::EmptyField {
                    id: entry.id.clone(),
                    field: "species_name",
                });
            }
        }
        Ok(())
    }
}

impl DatasetFile for JsonDataset {
    type Record = ProteinEntry;
    type Error = DatasetError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<ProteinEntry>, DatasetError> {
        let entries: Vec<ProteinEntry> = serde_json::from_reader(reader)?;
        Self::validate(&entries)?;
        Ok(entries)
    }

    fn write_to(records: &[ProteinEntry], writer: &mut impl Write) -> Result<(), DatasetError> {
        serde_json::to_writer_pretty(&mut *writer, records)?;
        writeln!(writer)?;
        Ok(())
    }
}
