//! Loading catalog, filter and source files

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use sisukas_core::{
    BlueprintRegistry, Course, MembershipSets, Period, SerializedFilters, course_registry,
};

use crate::cli::SourceArgs;
use crate::errors::CliError;
use crate::ui;

fn read_file(path: &Path) -> Result<String, CliError> {
    ui::debug(&format!("Reading '{}'", path.display()));
    std::fs::read_to_string(path).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to read '{}'", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let source = read_file(path)?;
    serde_json::from_str(&source).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to parse '{}'", path.display()),
            &e.to_string(),
        );
        CliError::InputError
    })
}

pub fn load_courses(path: &Path) -> Result<Vec<Course>, CliError> {
    load_json(path)
}

pub fn load_filters(path: &Path) -> Result<SerializedFilters, CliError> {
    let source = read_file(path)?;
    SerializedFilters::from_json(&source).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to parse filters in '{}'", path.display()),
            &e.to_string(),
        );
        CliError::InputError
    })
}

/// Build the course registry, backed by the given source files or by empty
/// sources when none are given.
pub fn load_registry(sources: &SourceArgs) -> Result<BlueprintRegistry<Course>, CliError> {
    let memberships = match &sources.memberships {
        Some(path) => {
            let map: HashMap<String, HashMap<String, Vec<String>>> = load_json(path)?;
            MembershipSets::from_map(map)
        }
        None => MembershipSets::new(),
    };
    let periods: Vec<Period> = match &sources.periods {
        Some(path) => load_json(path)?,
        None => Vec::new(),
    };

    course_registry(Arc::new(memberships), Arc::from(periods)).map_err(|e| {
        ui::error_with_details("Failed to set up course fields", &e.to_string());
        CliError::FilterError
    })
}
