//! Terminal output helpers

use std::fmt;

use clap::ValueEnum;
use console::style;
use serde::Serialize;
use sisukas_core::{Blueprint, Course};

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Status lines go to stderr so stdout stays parseable in JSON mode.
pub fn header(message: &str) {
    eprintln!("{}", style(message).bold());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("i").cyan(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

pub fn error_with_details(message: &str, details: &str) {
    error(message);
    eprintln!("  {}", style(details).dim());
}

pub fn debug(message: &str) {
    log::debug!("{}", message);
}

pub fn raw_output(output: &str) {
    println!("{}", output);
}

pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

pub fn pretty_output_course_list(courses: &[&Course]) {
    for course in courses {
        println!(
            "{}  {}  {}",
            style(&course.code).cyan().bold(),
            course.name,
            style(format!("{} cr", course.credits)).dim()
        );
        println!(
            "    {}  {}",
            style(course.course_span()).dim(),
            style(&course.organization).dim()
        );
    }
}

pub fn pretty_output_field_list<E>(blueprints: &[&Blueprint<E>]) {
    for blueprint in blueprints {
        println!(
            "{} {} ({})",
            style(blueprint.key()).cyan().bold(),
            style(format!("[{}]", blueprint.category())).dim(),
            blueprint.label()
        );
        println!(
            "    {} {}",
            style(blueprint.default_relation()).bold(),
            blueprint
                .valid_relations()
                .into_iter()
                .filter(|relation| *relation != blueprint.default_relation())
                .collect::<Vec<_>>()
                .join(", ")
        );
        if let Some(values) = blueprint.valid_values() {
            println!("    values: {}", values.join(", "));
        }
        let sets = blueprint.available_sets();
        if !sets.is_empty() {
            println!("    sets: {}", sets.join(", "));
        }
        let periods = blueprint.periods();
        if !periods.is_empty() {
            let ids: Vec<&str> = periods.iter().map(|p| p.id.as_str()).collect();
            println!("    periods: {}", ids.join(", "));
        }
    }
}
