//! The filters wire format
//!
//! A saved filter is `{"groups": [{"rules": [{"field", "relation", "value"}]}]}`.
//! Groups are OR-combined and the rules inside a group AND-combined, so the
//! per-config connective is carried by group boundaries instead of being stored.
//! Values keep their native JSON shape (see [`FilterValue`]).

mod hash;
mod wire_errors;

pub use hash::{HashId, SHARE_ID_LENGTH, canonical_json, content_hash};
pub use wire_errors::WireError;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::blueprint::BlueprintRegistry;
use crate::config::{BooleanOp, FilterConfig, group_by_connective};
use crate::value::FilterValue;

/// One rule on the wire. Nullary relations have no `value` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRule {
    pub field: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl SerializedRule {
    pub fn new(field: &str, relation: &str, value: Option<FilterValue>) -> Self {
        Self {
            field: field.to_string(),
            relation: relation.to_string(),
            value,
        }
    }
}

/// `is_must` is always written, because the filters service hashes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializedGroup {
    pub rules: Vec<SerializedRule>,
    #[serde(default)]
    pub is_must: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializedFilters {
    pub groups: Vec<SerializedGroup>,
}

impl SerializedFilters {
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compact JSON with sorted keys, the form the filters service hashes.
    pub fn to_canonical_json(&self) -> Result<String, WireError> {
        canonical_json(self)
    }

    /// SHA-256 of the canonical form, as lowercase hex.
    pub fn content_hash(&self) -> Result<String, WireError> {
        content_hash(self)
    }

    /// The id the filters service would store this payload under.
    pub fn share_id(&self) -> Result<HashId, WireError> {
        HashId::from_digest(&self.content_hash()?, SHARE_ID_LENGTH)
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }
}

/// Serialize configs into groups. Every `OR` after the first config closes the
/// current group and starts a new one.
pub fn to_wire(configs: &[FilterConfig]) -> SerializedFilters {
    let groups: Vec<SerializedGroup> = group_by_connective(configs)
        .into_iter()
        .map(|group| SerializedGroup {
            rules: group
                .iter()
                .map(|config| {
                    SerializedRule::new(
                        &config.blueprint_key,
                        &config.relation,
                        config.value.clone(),
                    )
                })
                .collect(),
            is_must: false,
        })
        .collect();

    debug!(
        "Serialized {} filter configs into {} groups",
        configs.len(),
        groups.len()
    );
    SerializedFilters { groups }
}

/// Read configs back from the wire, resolving each field against `registry`.
///
/// Rules naming an unknown field are dropped with a warning. The first kept rule of
/// every group after the first kept one gets `OR`, all others `AND`. Ids are
/// assigned sequentially from 1.
pub fn from_wire<E>(
    filters: &SerializedFilters,
    registry: &BlueprintRegistry<E>,
) -> Vec<FilterConfig> {
    let mut configs: Vec<FilterConfig> = Vec::with_capacity(filters.rule_count());

    for group in &filters.groups {
        let mut opens_group = true;
        for rule in &group.rules {
            if !registry.contains(&rule.field) {
                warn!(
                    "Dropping filter rule for unknown field '{}' ({})",
                    rule.field, rule.relation
                );
                continue;
            }

            let boolean_op = if opens_group && !configs.is_empty() {
                BooleanOp::Or
            } else {
                BooleanOp::And
            };
            opens_group = false;

            configs.push(FilterConfig {
                id: configs.len() as u64 + 1,
                blueprint_key: rule.field.clone(),
                relation: rule.relation.clone(),
                value: rule.value.clone(),
                boolean_op,
            });
        }
    }

    debug!("Loaded {} filter configs from the wire", configs.len());
    configs
}
