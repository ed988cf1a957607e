use std::path::Path;

use serde_json::json;

use crate::errors::CliError;
use crate::files::load_filters;
use crate::ui::{self, OutputFormat};

/// Prints the share id and full content hash of a saved filter.
pub fn hash_filters(filters_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Hashing filter");
    let filters = load_filters(filters_path)?;

    let hashed = filters
        .content_hash()
        .and_then(|hash| filters.share_id().map(|id| (hash, id)));
    let (content_hash, share_id) = hashed.map_err(|e| {
        ui::error_with_details("Failed to hash filter", &e.to_string());
        CliError::InputError
    })?;
    ui::success(&format!("Hashed {} rule(s)", filters.rule_count()));

    match output_format {
        OutputFormat::Pretty => ui::raw_output(share_id.as_str()),
        OutputFormat::Json => ui::json_output(&json!({
            "shareId": share_id.as_str(),
            "contentHash": content_hash,
        })),
    }

    Ok(())
}
