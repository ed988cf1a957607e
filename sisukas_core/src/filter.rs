//! Applying OR-of-AND rule groups to a collection

use log::debug;

use crate::FilterError;
use crate::blueprint::BlueprintRegistry;
use crate::config::{FilterConfig, group_by_connective};
use crate::rule::Rule;

/// Rules that must all hold.
pub type RuleGroup<E> = Vec<Rule<E>>;

/// Groups of which at least one must hold. No groups means no filtering.
pub type FilterRuleGroups<E> = Vec<RuleGroup<E>>;

/// Whether `entity` satisfies every rule of at least one group.
///
/// Stops at the first failing rule of a group and at the first passing group.
pub fn matches_groups<E>(groups: &[RuleGroup<E>], entity: &E) -> bool {
    groups.is_empty()
        || groups
            .iter()
            .any(|group| group.iter().all(|rule| rule.evaluate(entity)))
}

/// Entities matching `groups`, in their original order.
pub fn apply_filters<'a, E>(groups: &[RuleGroup<E>], entities: &'a [E]) -> Vec<&'a E> {
    let matched: Vec<&E> = filter_iter(groups, entities).collect();
    debug!(
        "Filter with {} groups kept {} of {} entities",
        groups.len(),
        matched.len(),
        entities.len()
    );
    matched
}

/// Lazily filter any iterator of entity references.
pub fn filter_iter<'a, 'g, E, I>(
    groups: &'g [RuleGroup<E>],
    entities: I,
) -> impl Iterator<Item = &'a E>
where
    E: 'a,
    I: IntoIterator<Item = &'a E>,
{
    entities
        .into_iter()
        .filter(move |entity| matches_groups(groups, entity))
}

/// Build rule groups from configs, splitting on `OR` the same way the wire format
/// does. Fails on the first config that does not build, naming its id.
pub fn build_rule_groups<E>(
    configs: &[FilterConfig],
    registry: &BlueprintRegistry<E>,
) -> Result<FilterRuleGroups<E>, FilterError> {
    let groups = group_by_connective(configs)
        .into_iter()
        .map(|group| {
            group
                .iter()
                .map(|config| {
                    registry
                        .create_rule(&config.blueprint_key, &config.relation, config.value.clone())
                        .map_err(|error| FilterError::Config {
                            id: config.id,
                            error: Box::new(error),
                        })
                })
                .collect::<Result<RuleGroup<E>, FilterError>>()
        })
        .collect::<Result<FilterRuleGroups<E>, FilterError>>()?;

    debug!(
        "Built {} rule groups from {} configs",
        groups.len(),
        configs.len()
    );
    Ok(groups)
}

/// One line summary such as `(code starts with "CS-") or (level equals "basic-studies")`.
pub fn describe_groups<E>(groups: &[RuleGroup<E>]) -> String {
    if groups.is_empty() {
        return "all".to_string();
    }

    groups
        .iter()
        .map(|group| {
            let rules: Vec<String> = group.iter().map(Rule::describe).collect();
            format!("({})", rules.join(" and "))
        })
        .collect::<Vec<_>>()
        .join(" or ")
}
