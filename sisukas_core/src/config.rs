//! Flat, form-facing filter configuration

use serde::{Deserialize, Serialize};

use crate::value::FilterValue;

/// Connective joining a config to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOp {
    #[default]
    And,
    Or,
}

/// One rule as a form edits it: which field, which relation, which value, and
/// how it connects to the previous config in the list.
///
/// `boolean_op` on the first config of a list is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub id: u64,
    pub blueprint_key: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
    #[serde(default)]
    pub boolean_op: BooleanOp,
}

impl FilterConfig {
    pub fn new(id: u64, blueprint_key: &str, relation: &str) -> Self {
        Self {
            id,
            blueprint_key: blueprint_key.to_string(),
            relation: relation.to_string(),
            value: None,
            boolean_op: BooleanOp::And,
        }
    }

    pub fn with_value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_op(mut self, boolean_op: BooleanOp) -> Self {
        self.boolean_op = boolean_op;
        self
    }
}

/// Split configs into AND-groups. Every `OR` after the first config starts a new
/// group, so `a AND b OR c` becomes `[[a, b], [c]]`.
pub fn group_by_connective(configs: &[FilterConfig]) -> Vec<&[FilterConfig]> {
    let mut groups = Vec::new();
    let mut start = 0;

    for (index, config) in configs.iter().enumerate() {
        if index > 0 && config.boolean_op == BooleanOp::Or {
            groups.push(&configs[start..index]);
            start = index;
        }
    }
    if start < configs.len() {
        groups.push(&configs[start..]);
    }

    groups
}
