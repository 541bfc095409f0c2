use crate::error::{CliError, Result};
use std::path::Path;

/// Resolves a sequence argument given inline or as `@path` to a plain-text file.
///
/// FASTA header lines are skipped and whitespace is removed; residues are
/// upper-cased.
pub fn read_sequence_arg(arg: &str) -> Result<String> {
    let raw = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path)).map_err(|e| {
            CliError::Argument(format!("Cannot read sequence file '{}': {}", path, e))
        })?,
        None => arg.to_string(),
    };

    let sequence: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if sequence.is_empty() {
        return Err(CliError::Argument(format!("Sequence '{}' is empty", arg)));
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn inline_sequences_are_normalized() {
        assert_eq!(read_sequence_arg("mkt ayi").unwrap(), "MKTAYI");
    }

    #[test]
    fn file_sequences_skip_fasta_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("psen1.fasta");
        fs::write(&path, ">sp|P49768|PSN1_HUMAN\nMTELPAPLSY\nFQNAQMSEDN\n").unwrap();

        let arg = format!("@{}", path.display());
        assert_eq!(read_sequence_arg(&arg).unwrap(), "MTELPAPLSYFQNAQMSEDN");
    }

    #[test]
    fn missing_file_and_empty_input_are_argument_errors() {
        assert!(matches!(
            read_sequence_arg("@/nonexistent/seq.txt"),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(read_sequence_arg("  "), Err(CliError::Argument(_))));
    }
}
