use crate::core::models::structural::{ComparisonKey, StructuralComparisonResult};
use crate::engine::aligner::Aligner;
use crate::engine::cache::ComparisonCache;
use crate::engine::comparator::{CompareOptions, StructuralComparator, StructuralRequest};
use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// A structural comparison request as received from a client.
///
/// Every field is optional on the wire; missing file references are rejected
/// by [`handle_comparison`] rather than by deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonRequest {
    pub reference_file: Option<String>,
    pub target_file: Option<String>,
    pub subunit: Option<String>,
    pub target_species: Option<String>,
    pub use_cache: bool,
    pub simulate: bool,
    pub reference_sequence: Option<String>,
    pub target_sequence: Option<String>,
}

impl Default for ComparisonRequest {
    fn default() -> Self {
        Self {
            reference_file: None,
            target_file: None,
            subunit: None,
            target_species: None,
            use_cache: true,
            simulate: false,
            reference_sequence: None,
            target_sequence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        success: bool,
        data: StructuralComparisonResult,
        cached: bool,
    },
    NotFound {
        success: bool,
        message: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Probe {
        available: bool,
    },
}

/// An HTTP-style status code paired with a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ServiceResponse {
    fn ok(data: StructuralComparisonResult, cached: bool) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Success {
                success: true,
                data,
                cached,
            },
        }
    }

    fn error(status: u16, error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error {
                error: error.into(),
                details,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Runs one structural comparison and shapes the outcome as a response.
///
/// Missing file references yield 400, a missing structure file 404, any
/// other engine failure 500. Tool failures never surface here.
pub async fn handle_comparison<A: Aligner, C: ComparisonCache>(
    comparator: &StructuralComparator<A, C>,
    request: &ComparisonRequest,
) -> ServiceResponse {
    let (Some(reference), Some(target)) = (
        present(&request.reference_file),
        present(&request.target_file),
    ) else {
        return ServiceResponse::error(
            400,
            "Missing required parameters: referenceFile and targetFile",
            None,
        );
    };

    info!("Structural comparison request: {} vs {}", reference, target);
    let mut structural = StructuralRequest::new(reference, target).with_options(CompareOptions {
        use_cache: request.use_cache,
        simulate: request.simulate,
    });
    if let (Some(subunit), Some(species)) = (present(&request.subunit), present(&request.target_species)) {
        structural = structural.with_key(ComparisonKey::new(subunit, species));
    }
    if let (Some(reference_seq), Some(target_seq)) = (
        present(&request.reference_sequence),
        present(&request.target_sequence),
    ) {
        structural = structural.with_sequences(reference_seq, target_seq);
    }

    match comparator.compare(&structural).await {
        Ok(outcome) => ServiceResponse::ok(outcome.result, outcome.cached),
        Err(e @ EngineError::StructureNotFound { .. }) => {
            ServiceResponse::error(404, "Structure file not found", Some(e.to_string()))
        }
        Err(e @ EngineError::InvalidRequest(_)) => {
            ServiceResponse::error(400, "Invalid request", Some(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Structural comparison failed.");
            ServiceResponse::error(500, "Structural comparison failed", Some(e.to_string()))
        }
    }
}

/// Reads a cached comparison without computing anything.
///
/// An unreadable cache is reported as a miss, the same as on the compare path.
pub fn handle_cache_lookup<A: Aligner, C: ComparisonCache>(
    comparator: &StructuralComparator<A, C>,
    subunit: Option<&str>,
    target_species: Option<&str>,
) -> ServiceResponse {
    let subunit = subunit.map(str::trim).filter(|s| !s.is_empty());
    let species = target_species.map(str::trim).filter(|s| !s.is_empty());
    let (Some(subunit), Some(species)) = (subunit, species) else {
        return ServiceResponse::error(
            400,
            "Missing required parameters: subunit and targetSpecies",
            None,
        );
    };

    match comparator.lookup(&ComparisonKey::new(subunit, species)) {
        Some(result) => ServiceResponse::ok(result, true),
        None => ServiceResponse {
            status: 404,
            body: ResponseBody::NotFound {
                success: false,
                message: "No cached result found".to_string(),
            },
        },
    }
}

/// Reports whether the structural aligner can be invoked right now.
pub async fn handle_probe<A: Aligner, C: ComparisonCache>(
    comparator: &StructuralComparator<A, C>,
) -> ServiceResponse {
    ServiceResponse {
        status: 200,
        body: ResponseBody::Probe {
            available: comparator.is_tool_available().await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cache::JsonFileCache;
    use crate::engine::simulation::Simulator;
    use crate::workflows::test_support::{ScriptedAligner, comparator_in};
    use std::fs;
    use tempfile::tempdir;

    fn files(reference: &str, target: &str) -> ComparisonRequest {
        ComparisonRequest {
            reference_file: Some(reference.to_string()),
            target_file: Some(target.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn request_defaults_follow_the_wire_contract() {
        let request: ComparisonRequest =
            serde_json::from_str(r#"{"referenceFile": "a.pdb", "targetSpecies": "Mouse"}"#).unwrap();
        assert!(request.use_cache);
        assert!(!request.simulate);
        assert_eq!(request.reference_file.as_deref(), Some("a.pdb"));
        assert_eq!(request.target_species.as_deref(), Some("Mouse"));
        assert_eq!(request.target_file, None);
    }

    #[tokio::test]
    async fn missing_files_are_a_client_error_without_side_effects() {
        let dir = tempdir().unwrap();
        let comparator = comparator_in(dir.path(), ScriptedAligner::measuring());
        let request = ComparisonRequest {
            subunit: Some("PSEN1".to_string()),
            target_species: Some("mouse".to_string()),
            reference_file: Some("ref.pdb".to_string()),
            ..Default::default()
        };

        let response = handle_comparison(&comparator, &request).await;
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert_eq!(comparator.aligner().invocations(), 0);
        assert!(comparator.cache().entries().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_body_has_data_and_cached_flag() {
        let dir = tempdir().unwrap();
        let comparator = comparator_in(dir.path(), ScriptedAligner::measuring());
        let request = ComparisonRequest {
            subunit: Some("NCT".to_string()),
            target_species: Some("Zebrafish".to_string()),
            ..files("ref.pdb", "target.pdb")
        };

        let first = handle_comparison(&comparator, &request).await;
        assert_eq!(first.status, 200);
        let json = serde_json::to_value(&first.body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["cached"], false);
        assert_eq!(json["data"]["provenance"], "measured");

        let second = handle_comparison(&comparator, &request).await;
        let json = serde_json::to_value(&second.body).unwrap();
        assert_eq!(json["cached"], true);
    }

    #[tokio::test]
    async fn missing_structure_file_is_not_found() {
        let dir = tempdir().unwrap();
        let comparator = comparator_in(dir.path(), ScriptedAligner::measuring());
        let response = handle_comparison(&comparator, &files("ref.pdb", "nowhere.pdb")).await;

        assert_eq!(response.status, 404);
        let json = serde_json::to_value(&response.body).unwrap();
        assert_eq!(json["error"], "Structure file not found");
        assert!(json["details"].as_str().unwrap().contains("nowhere.pdb"));
    }

    #[tokio::test]
    async fn cache_lookup_reports_missing_params_miss_and_hit() {
        let dir = tempdir().unwrap();
        let comparator = comparator_in(dir.path(), ScriptedAligner::measuring());

        assert_eq!(handle_cache_lookup(&comparator, Some("PSEN1"), None).status, 400);

        let miss = handle_cache_lookup(&comparator, Some("PSEN1"), Some("mouse"));
        assert_eq!(miss.status, 404);
        let json = serde_json::to_value(&miss.body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No cached result found");

        let request = ComparisonRequest {
            subunit: Some("PSEN1".to_string()),
            target_species: Some("mouse".to_string()),
            simulate: true,
            ..files("ref.pdb", "target.pdb")
        };
        handle_comparison(&comparator, &request).await;

        let hit = handle_cache_lookup(&comparator, Some("PSEN1"), Some("MOUSE"));
        assert_eq!(hit.status, 200);
        let json = serde_json::to_value(&hit.body).unwrap();
        assert_eq!(json["cached"], true);
        assert_eq!(json["data"]["provenance"], "simulated");
    }

    #[test]
    fn unreadable_cache_is_reported_as_a_miss() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("comparisons.json");
        fs::write(&cache_path, "{ not json").unwrap();
        let comparator = StructuralComparator::new(
            ScriptedAligner::measuring(),
            JsonFileCache::new(&cache_path),
            Simulator::new(Some(5)),
            dir.path().to_path_buf(),
        );

        let response = handle_cache_lookup(&comparator, Some("PSEN1"), Some("mouse"));
        assert_eq!(response.status, 404);
        let json = serde_json::to_value(&response.body).unwrap();
        assert_eq!(json["message"], "No cached result found");
        assert_eq!(fs::read_to_string(&cache_path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn probe_reports_availability() {
        let dir = tempdir().unwrap();
        let available = comparator_in(dir.path(), ScriptedAligner::measuring());
        let unavailable = comparator_in(dir.path(), ScriptedAligner::unavailable());

        let json = serde_json::to_value(&handle_probe(&available).await.body).unwrap();
        assert_eq!(json, serde_json::json!({ "available": true }));
        let json = serde_json::to_value(&handle_probe(&unavailable).await.body).unwrap();
        assert_eq!(json, serde_json::json!({ "available": false }));
    }
}
