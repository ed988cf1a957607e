//! Typed filtering engine for the course catalog.
//!
//! A filter is assembled from per-field [`Blueprint`]s. Each blueprint validates a
//! `(relation, value)` pair and produces an immutable [`Rule`]. Rules are grouped
//! into OR-of-AND [`FilterRuleGroups`] and evaluated in memory, and the flat
//! [`FilterConfig`] list a form edits round-trips through the [`SerializedFilters`]
//! wire format shared with the filters service.

pub mod blueprint;
pub mod builder;
pub mod compare;
pub mod config;
pub mod course;
pub mod filter;
mod filter_errors;
pub mod rule;
pub mod source;
pub mod value;
pub mod wire;

pub use blueprint::{Blueprint, BlueprintRegistry, Category, course_registry};
pub use builder::RuleBuilder;
pub use compare::{DateRange, MatchOptions, NumericRange};
pub use config::{BooleanOp, FilterConfig};
pub use course::Course;
pub use filter::{
    FilterRuleGroups, RuleGroup, apply_filters, build_rule_groups, describe_groups, filter_iter,
    matches_groups,
};
pub use filter_errors::FilterError;
pub use rule::Rule;
pub use source::{MembershipSets, MembershipSource, Period};
pub use value::FilterValue;
pub use wire::{
    HashId, SerializedFilters, SerializedGroup, SerializedRule, WireError, from_wire, to_wire,
};
