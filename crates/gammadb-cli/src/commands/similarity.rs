use super::print_json;
use crate::cli::SimilarityArgs;
use crate::error::{CliError, Result};
use crate::utils::input::read_sequence_arg;
use gammadb::core::sequence::composition::hydrophobicity;
use gammadb::core::sequence::conservation::{conservation_score, find_conserved_regions};
use gammadb::core::sequence::similarity::compare;
use serde_json::json;

pub async fn run(args: SimilarityArgs) -> Result<()> {
    if args.window == 0 {
        return Err(CliError::Argument("--window must be at least 1".to_string()));
    }
    if !(0.0..=100.0).contains(&args.threshold) {
        return Err(CliError::Argument(
            "--threshold must be between 0 and 100".to_string(),
        ));
    }

    let sequence1 = read_sequence_arg(&args.sequence1)?;
    let sequence2 = read_sequence_arg(&args.sequence2)?;
    let aligned1 = args.aligned1.as_deref().map(read_sequence_arg).transpose()?;
    let aligned2 = args.aligned2.as_deref().map(read_sequence_arg).transpose()?;

    let similarity = compare(
        &sequence1,
        &sequence2,
        aligned1.as_deref(),
        aligned2.as_deref(),
    )
    .map_err(|e| CliError::Argument(e.to_string()))?;
    let regions = find_conserved_regions(&sequence1, &sequence2, args.window, args.threshold);
    let score =
        conservation_score(&sequence1, &sequence2).map_err(|e| CliError::Argument(e.to_string()))?;

    print_json(&json!({
        "similarity": similarity,
        "conservedRegions": regions,
        "conservationScore": score,
        "hydrophobicity": {
            "sequence1": hydrophobicity(&sequence1),
            "sequence2": hydrophobicity(&sequence2),
        },
    }))
}
