use std::path::Path;

use sisukas_core::{apply_filters, build_rule_groups, describe_groups, from_wire};

use crate::cli::SourceArgs;
use crate::errors::CliError;
use crate::files::{load_courses, load_filters, load_registry};
use crate::ui::{self, OutputFormat};

/// Applies a saved filter to a course catalog and prints the matching courses.
pub fn filter_courses(
    courses_path: &Path,
    filters_path: &Path,
    sources: &SourceArgs,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Filtering courses");
    let registry = load_registry(sources)?;
    let courses = load_courses(courses_path)?;
    let filters = load_filters(filters_path)?;

    let configs = from_wire(&filters, &registry);
    if configs.len() < filters.rule_count() {
        ui::warning(&format!(
            "Skipped {} rule(s) for unknown fields",
            filters.rule_count() - configs.len()
        ));
    }

    let groups = build_rule_groups(&configs, &registry).map_err(|e| {
        ui::error_with_details("Failed to build filter", &e.to_string());
        CliError::FilterError
    })?;
    ui::info(&format!("Filter: {}", describe_groups(&groups)));

    let matched = apply_filters(&groups, &courses);
    ui::success(&format!(
        "{} of {} courses match",
        matched.len(),
        courses.len()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_course_list(&matched),
        OutputFormat::Json => ui::json_output(&matched),
    }

    Ok(())
}
