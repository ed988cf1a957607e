//! Draft state for a rule while a form is being filled in

use log::debug;

use crate::FilterError;
use crate::blueprint::Blueprint;
use crate::config::{BooleanOp, FilterConfig};
use crate::rule::Rule;
use crate::value::FilterValue;

/// Accumulates a relation and a value for one blueprint.
///
/// Setters only record state. The value is validated when [`build`](Self::build)
/// hands the draft to the blueprint, and [`is_complete`](Self::is_complete) answers
/// whether that would succeed.
#[derive(Debug)]
pub struct RuleBuilder<'a, E> {
    blueprint: &'a Blueprint<E>,
    relation: Option<String>,
    value: Option<FilterValue>,
}

impl<'a, E> RuleBuilder<'a, E> {
    /// Start a draft with the blueprint's default relation preselected.
    pub fn new(blueprint: &'a Blueprint<E>) -> Self {
        Self {
            blueprint,
            relation: Some(blueprint.default_relation().to_string()),
            value: None,
        }
    }

    /// Resume editing a saved config.
    pub fn from_config(blueprint: &'a Blueprint<E>, config: &FilterConfig) -> Self {
        Self {
            blueprint,
            relation: Some(config.relation.clone()),
            value: config.value.clone(),
        }
    }

    pub fn blueprint(&self) -> &'a Blueprint<E> {
        self.blueprint
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    /// Choose a relation. Rejects relations the field does not accept; switching to
    /// a nullary relation drops the current value.
    pub fn set_relation(&mut self, relation: &str) -> Result<&mut Self, FilterError> {
        if !self.blueprint.is_valid_relation(relation) {
            return Err(FilterError::InvalidRelation {
                field: self.blueprint.key().to_string(),
                relation: relation.to_string(),
                valid: self
                    .blueprint
                    .valid_relations()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            });
        }

        if self.blueprint.is_nullary(relation) {
            self.value = None;
        }
        self.relation = Some(relation.to_string());
        Ok(self)
    }

    pub fn set_value(&mut self, value: impl Into<FilterValue>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(&mut self) -> &mut Self {
        self.value = None;
        self
    }

    /// Membership fields: the set to test against, e.g. a curriculum code.
    pub fn set_identifier(&mut self, identifier: &str) -> &mut Self {
        self.set_value(identifier)
    }

    /// Period fields: the selected period ids.
    pub fn set_period_ids<S: AsRef<str>>(&mut self, period_ids: &[S]) -> &mut Self {
        let ids: Vec<String> = period_ids.iter().map(|id| id.as_ref().to_string()).collect();
        self.set_value(ids)
    }

    /// Whether [`build`](Self::build) would succeed right now. Never fails.
    pub fn is_complete(&self) -> bool {
        self.build().is_ok()
    }

    pub fn build(&self) -> Result<Rule<E>, FilterError> {
        let relation = self.relation.as_deref().ok_or_else(|| FilterError::MissingRelation {
            field: self.blueprint.key().to_string(),
        })?;
        self.blueprint.create_rule(relation, self.value.clone())
    }

    /// The draft as a config, or `None` while no relation is chosen.
    pub fn to_config(&self, id: u64, boolean_op: BooleanOp) -> Option<FilterConfig> {
        let relation = self.relation.clone()?;
        Some(FilterConfig {
            id,
            blueprint_key: self.blueprint.key().to_string(),
            relation,
            value: self.value.clone(),
            boolean_op,
        })
    }

    /// Back to the blueprint's default relation with no value.
    pub fn reset(&mut self) -> &mut Self {
        debug!("Resetting draft for '{}'", self.blueprint.key());
        self.relation = Some(self.blueprint.default_relation().to_string());
        self.value = None;
        self
    }

    /// Clear the relation as well as the value.
    pub fn clear(&mut self) -> &mut Self {
        self.relation = None;
        self.value = None;
        self
    }
}
