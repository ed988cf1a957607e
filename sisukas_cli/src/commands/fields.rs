use serde::Serialize;

use crate::cli::SourceArgs;
use crate::errors::CliError;
use crate::files::load_registry;
use crate::ui::{self, OutputFormat};

/// A field as printed in JSON mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldSummary<'a> {
    key: &'a str,
    label: &'a str,
    category: &'static str,
    default_relation: &'static str,
    relations: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_values: Option<&'a [String]>,
}

/// Lists the course fields filters can refer to.
pub fn list_fields(sources: &SourceArgs, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing filter fields");
    let registry = load_registry(sources)?;
    let blueprints: Vec<_> = registry.iter().collect();
    ui::success(&format!("Found {} fields", blueprints.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_field_list(&blueprints),
        OutputFormat::Json => {
            let summaries: Vec<FieldSummary> = blueprints
                .iter()
                .map(|blueprint| FieldSummary {
                    key: blueprint.key(),
                    label: blueprint.label(),
                    category: blueprint.category().as_str(),
                    default_relation: blueprint.default_relation(),
                    relations: blueprint.valid_relations(),
                    valid_values: blueprint.valid_values(),
                })
                .collect();
            ui::json_output(&summaries)
        }
    }

    Ok(())
}
