use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing dataset documents.
///
/// Implementors handle format-specific parsing and serialization of a
/// collection of records; the path-based helpers are provided on top of the
/// reader/writer methods.
pub trait DatasetFile {
    /// The record type stored in the document.
    type Record;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads all records from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Self::Record>, Self::Error>;

    /// Writes all records to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn write_to(records: &[Self::Record], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads all records from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self::Record>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes all records to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        records: &[Self::Record],
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(records, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
