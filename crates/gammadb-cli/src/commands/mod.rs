pub mod analyze;
pub mod cached;
pub mod compare;
pub mod data;
pub mod export;
pub mod precompute;
pub mod probe;
pub mod similarity;

use crate::error::{CliError, Result};
use gammadb::workflows::service::ServiceResponse;
use serde::Serialize;

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CliError::Other(e.into()))?;
    println!("{}", text);
    Ok(())
}

/// Prints the response body and turns a non-2xx status into an error.
fn emit(response: &ServiceResponse) -> Result<()> {
    print_json(&response.body)?;
    if response.is_success() {
        Ok(())
    } else {
        Err(CliError::Status {
            status: response.status,
        })
    }
}
