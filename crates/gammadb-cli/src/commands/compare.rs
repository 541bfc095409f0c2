use super::emit;
use crate::cli::CompareArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::input::read_sequence_arg;
use gammadb::engine::comparator::DefaultComparator;
use gammadb::workflows::service::{self, ComparisonRequest};
use std::io::Read;
use std::path::Path;
use tracing::info;

pub async fn run(args: CompareArgs, config: &AppConfig) -> Result<()> {
    let request = build_request(args)?;
    let comparator = DefaultComparator::from_config(&config.comparison);

    info!("Running structural comparison request.");
    let response = service::handle_comparison(&comparator, &request).await;
    emit(&response)
}

fn read_request(path: &Path) -> Result<ComparisonRequest> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn build_request(args: CompareArgs) -> Result<ComparisonRequest> {
    let mut request = match &args.request {
        Some(path) => read_request(path)?,
        None => ComparisonRequest::default(),
    };

    if args.reference.is_some() {
        request.reference_file = args.reference;
    }
    if args.target.is_some() {
        request.target_file = args.target;
    }
    if args.subunit.is_some() {
        request.subunit = args.subunit;
    }
    if args.species.is_some() {
        request.target_species = args.species;
    }
    if args.no_cache {
        request.use_cache = false;
    }
    if args.simulate {
        request.simulate = true;
    }
    if let Some(seq) = &args.reference_sequence {
        request.reference_sequence = Some(read_sequence_arg(seq)?);
    }
    if let Some(seq) = &args.target_sequence {
        request.target_sequence = Some(read_sequence_arg(seq)?);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flags_override_the_request_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            r#"{"referenceFile": "a.pdb", "targetFile": "b.pdb", "subunit": "NCT", "useCache": true}"#,
        )
        .unwrap();

        let request = build_request(CompareArgs {
            request: Some(path),
            target: Some("c.pdb".to_string()),
            no_cache: true,
            target_sequence: Some("mkt".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(request.reference_file.as_deref(), Some("a.pdb"));
        assert_eq!(request.target_file.as_deref(), Some("c.pdb"));
        assert_eq!(request.subunit.as_deref(), Some("NCT"));
        assert!(!request.use_cache);
        assert!(!request.simulate);
        assert_eq!(request.target_sequence.as_deref(), Some("MKT"));
    }

    #[test]
    fn flags_alone_build_a_request_with_defaults() {
        let request = build_request(CompareArgs {
            reference: Some("a.pdb".to_string()),
            simulate: true,
            ..Default::default()
        })
        .unwrap();
        assert!(request.use_cache);
        assert!(request.simulate);
        assert_eq!(request.target_file, None);
    }
}
